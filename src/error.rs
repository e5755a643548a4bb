
use std::path::PathBuf;

use thiserror::Error;


/// Reason an item (segment, syllable, file) was dropped.
/// Never fatal, callers log it and continue with the next item.
#[derive(Debug, Error)]
pub enum Skip {
    #[error("inadmissible line ({0})")]
    Inadmissible(&'static str),

    #[error("conversion failed: {0}")]
    Conversion(String),

    #[error("pinyin does not align: {chars} chars, {syllables} syllables")]
    Misaligned { chars: usize, syllables: usize },

    #[error("no pinyin")]
    EmptyPinyin,

    #[error("unknown final in syllable {0:?}")]
    UnknownFinal(String),

    #[error("{0}: not valid UTF-8")]
    Decode(PathBuf),

    #[error("{0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
}

/// Errors which stop the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}: not a directory")]
    NotADirectory(PathBuf),

    #[error("no .txt files found in {0}")]
    NoInputFiles(PathBuf),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
