
// Collects unique candidates from corpus lines.

use std::collections::HashSet;

use rayon::prelude::*;

use super::classifier::{is_admissible, is_alphabet, COMMENT_MARKERS};
use super::normalizer::Normalizer;
use super::simplifier::Simplifier;


/// Line counters, summed across workers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineStats {
    pub lines: usize,
    pub comments: usize,
    pub empty: usize,
    pub english: usize,
    pub rejected: usize,
    pub productive: usize,
}

impl LineStats {
    pub fn add(&mut self, other: &LineStats) {
        self.lines += other.lines;
        self.comments += other.comments;
        self.empty += other.empty;
        self.english += other.english;
        self.rejected += other.rejected;
        self.productive += other.productive;
    }
}

#[derive(Debug, Default)]
pub struct Collector {
    candidates: HashSet<String>,
    pub stats: LineStats,
}

impl Collector {
    pub fn new() -> Collector {
        Collector::default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn insert(&mut self, candidate: String) -> bool {
        self.candidates.insert(candidate)
    }

    /// Normalizes a raw line and keeps its candidates.
    pub fn ingest_line<S: Simplifier>(&mut self, normalizer: &Normalizer<S>, line: &str) {
        self.stats.lines += 1;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.stats.empty += 1;
            return;
        }
        if COMMENT_MARKERS.iter().any(|m| trimmed.starts_with(m)) {
            self.stats.comments += 1;
            return;
        }
        if is_alphabet(trimmed) {
            self.stats.english += 1;
            return;
        }

        match normalizer.normalize(trimmed) {
            Ok(candidates) if !candidates.is_empty() => {
                self.stats.productive += 1;
                for c in candidates {
                    self.insert(c);
                }
            }
            Ok(_) => self.stats.rejected += 1,
            Err(_) => self.stats.rejected += 1,
        }
    }

    /// Union with the set of another worker.
    pub fn merge(&mut self, other: Collector) {
        if self.candidates.len() < other.candidates.len() {
            let mine = std::mem::replace(&mut self.candidates, other.candidates);
            self.candidates.extend(mine);
        } else {
            self.candidates.extend(other.candidates);
        }
        self.stats.add(&other.stats);
    }

    /// Candidates sorted by code point, validated once more.
    pub fn finalize(self) -> Vec<String> {
        let mut lines: Vec<String> = self.candidates
            .into_iter()
            .map(|s| String::from(s.trim()))
            .filter(|s| is_admissible(s))
            .collect();
        // UTF-8 byte order equals code point order.
        lines.par_sort_unstable();
        lines.dedup();
        lines
    }
}
