

use std::collections::HashSet;
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;

mod batch;
mod classifier;
mod collector;
mod error;
mod flypy;
mod formatter;
mod normalizer;
mod simplifier;
mod transcriber;
mod util;

use batch::*;
use collector::*;
use error::*;
use formatter::*;
use normalizer::*;
use simplifier::*;
use util::*;


/// Builds pinyin dictionaries for input methods from a directory of text files.
#[derive(Debug, Parser)]
#[command(name = "pinyindic", version)]
struct Cli {
    /// Directory searched recursively for .txt files
    input_dir: PathBuf,

    /// Output path prefix, every target appends its own suffix
    output_prefix: PathBuf,

    /// Targets to write, all of them when omitted
    #[arg(short, long = "target", value_enum)]
    targets: Vec<Target>,

    /// Keep every valid segment of a line, or only the last one
    #[arg(long, value_enum, default_value = "all")]
    aggregation: Aggregation,

    /// Only write CJK-only candidates to the rime target
    #[arg(long)]
    rime_cjk_only: bool,

    /// Skip traditional to simplified conversion
    #[arg(long)]
    no_simplify: bool,

    /// Number of workers, defaults to the available cores
    #[arg(short, long)]
    jobs: Option<usize>,
}

/// Collects candidates of every line in the files.
/// Unreadable files are logged and skipped.
fn collect_files<S: Simplifier>(normalizer: &Normalizer<S>, files: &[PathBuf]) -> Collector {
    let mut collector = Collector::new();
    for path in files {
        let content = match read_utf8_file(path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("skipped {}", e);
                continue;
            }
        };
        for line in content.lines() {
            collector.ingest_line(normalizer, line);
        }
    }
    collector
}

/// Collects sorted unique candidates from the files, one batch of files per worker.
fn build_candidates(files: &[PathBuf], cli: &Cli, workers: usize) -> Result<Vec<String>, Error> {
    let aggregation = cli.aggregation;
    let simplify = !cli.no_simplify;

    let collector = scatter_gather(files, workers, |batch| {
        // Every worker owns its converter.
        let collector = if simplify {
            collect_files(&Normalizer::new(OpenCcSimplifier::new(), aggregation), batch)
        } else {
            collect_files(&Normalizer::new(Passthrough, aggregation), batch)
        };
        Ok::<_, Infallible>(collector)
    }, |mut a: Collector, b: Collector| {
        a.merge(b);
        a
    })?.unwrap_or_default();

    let stats = collector.stats;
    log::info!("lines: {}, comments: {}, empty: {}, english: {}, rejected: {}, with candidates: {}",
               stats.lines, stats.comments, stats.empty, stats.english, stats.rejected, stats.productive);
    log::info!("{} unique candidates", collector.len());

    Ok(collector.finalize())
}

/// Attaches pinyin to every candidate.
fn build_entries(candidates: Vec<String>) -> Vec<Entry> {
    candidates.into_par_iter().map(|text| {
        let syllables = match transcriber::syllables(&text) {
            Ok(s) => Some(s),
            Err(e) => {
                log::debug!("{:?}: {}", text, e);
                None
            }
        };
        Entry { text, syllables }
    }).collect()
}

fn target_path(prefix: &Path, target: Target) -> PathBuf {
    let mut s = OsString::from(prefix.as_os_str());
    s.push(target.suffix());
    PathBuf::from(s)
}

/// Renders and writes every target concurrently, one file per target.
fn write_targets(entries: &[Entry], targets: &[Target], prefix: &Path, options: &RenderOptions) -> Result<(), Error> {
    let results: Vec<std::io::Result<()>> = targets.par_iter().map(|&target| -> std::io::Result<()> {
        let lines = target.render(entries, options);
        let path = target_path(prefix, target);
        if let Err(e) = write_lines(&path, &lines) {
            log::error!("failed to write {}: {}", path.display(), e);
            return Err(e);
        }
        log::info!("wrote {} lines to {}", lines.len(), path.display());
        Ok(())
    }).collect();

    for r in results {
        r?;
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<(), Error> {
    if !cli.input_dir.is_dir() {
        return Err(Error::NotADirectory(cli.input_dir.clone()));
    }

    let files = find_txt_files(&cli.input_dir);
    if files.is_empty() {
        return Err(Error::NoInputFiles(cli.input_dir.clone()));
    }
    log::info!("found {} .txt files in {}", files.len(), cli.input_dir.display());

    let workers = cli.jobs.unwrap_or_else(get_core_count);
    let candidates = build_candidates(&files, cli, workers)?;

    let targets: Vec<Target> = if cli.targets.is_empty() {
        Target::ALL.to_vec()
    } else {
        let mut seen = HashSet::new();
        cli.targets.iter().copied().filter(|t| seen.insert(*t)).collect()
    };

    let entries = build_entries(candidates);
    let options = RenderOptions { rime_cjk_only: cli.rime_cjk_only };
    write_targets(&entries, &targets, &cli.output_prefix, &options)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
