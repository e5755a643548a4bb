
use std::io::{BufReader, BufWriter, Read, Write};
use std::fs::File;
use std::path::{Path, PathBuf};

use encoding_rs::UTF_8;
use walkdir::WalkDir;

use super::error::Skip;


/// Returns `.txt` files under the directory, recursively, in path order.
/// The extension is matched case-insensitively.
pub fn find_txt_files(dirpath: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dirpath)
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("{}", e);
                None
            }
        })
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path()
                     .extension()
                     .map_or(false, |ext| ext.eq_ignore_ascii_case("txt")))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    files
}

/// Reads UTF-8 file content as string.
/// A leading BOM is removed, malformed content rejects the whole file.
pub fn read_utf8_file(path: &Path) -> Result<String, Skip> {
    let mut buf = Vec::new();
    let f = File::open(path).map_err(|e| Skip::Io(path.to_path_buf(), e))?;
    let mut reader = BufReader::new(f);
    reader.read_to_end(&mut buf).map_err(|e| Skip::Io(path.to_path_buf(), e))?;

    let bytes = buf.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&buf);
    UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
         .map(|cow| cow.into_owned())
         .ok_or_else(|| Skip::Decode(path.to_path_buf()))
}

/// Writes lines terminated by `\n`, creating parent directories.
pub fn write_lines(path: &Path, lines: &[String]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let f = File::create(path)?;
    let mut writer = BufWriter::new(f);
    for line in lines {
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Returns number of cores available to the process.
pub fn get_core_count() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}
