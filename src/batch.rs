
// Splits work into contiguous batches, runs one batch per worker and merges results.

use std::ops::Range;
use std::panic::{catch_unwind, AssertUnwindSafe};

use rayon::{prelude::*, ThreadPoolBuilder};

use super::error::Error;


/// Splits `len` items into at most `workers` contiguous ranges of near equal size.
/// Empty ranges are never returned.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, len);
    let size = (len - 1) / workers + 1;
    (0..len).step_by(size).map(|start| start..start + size.min(len - start)).collect()
}

/// Runs `job` on each batch in its own worker and folds the successful results with `merge`.
///
/// A batch which fails or panics is logged and contributes nothing. `merge` must be
/// associative and commutative, results arrive in no particular order.
pub fn scatter_gather<T, R, E, J, M>(items: &[T], workers: usize, job: J, merge: M) -> Result<Option<R>, Error>
where
    T: Sync,
    R: Send,
    E: std::fmt::Display + Send,
    J: Fn(&[T]) -> Result<R, E> + Sync,
    M: Fn(R, R) -> R + Sync + Send,
{
    // No more threads than batches.
    let workers = workers.clamp(1, items.len().max(1));
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| Error::ThreadPool(e.to_string()))?;

    let batches = partition(items.len(), workers);
    log::debug!("{} items in {} batches", items.len(), batches.len());

    let result = pool.install(|| {
        batches.into_par_iter().enumerate().filter_map(|(i, range)| {
            let batch = &items[range.clone()];
            match catch_unwind(AssertUnwindSafe(|| job(batch))) {
                Ok(Ok(r)) => Some(r),
                Ok(Err(e)) => {
                    log::warn!("batch {} (items {}..{}) failed: {}", i, range.start, range.end, e);
                    None
                }
                Err(_) => {
                    log::warn!("batch {} (items {}..{}) panicked", i, range.start, range.end);
                    None
                }
            }
        }).reduce_with(|a, b| merge(a, b))
    });
    Ok(result)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_contiguously() {
        assert_eq!(partition(10, 3), vec![0..4, 4..8, 8..10]);
        assert_eq!(partition(2, 8), vec![0..1, 1..2]);
        assert_eq!(partition(5, 1), vec![0..5]);
        assert_eq!(partition(0, 4), Vec::<Range<usize>>::new());
        assert_eq!(partition(3, 0), vec![0..3]);
        assert_eq!(partition(5, usize::MAX), vec![0..1, 1..2, 2..3, 3..4, 4..5]);
        assert_eq!(partition(usize::MAX, 1).len(), 1);
    }

    #[test]
    fn covers_every_item_once() {
        for len in 0..40 {
            for workers in 1..9 {
                let covered: Vec<usize> = partition(len, workers).into_iter().flatten().collect();
                assert_eq!(covered, (0..len).collect::<Vec<_>>());
                assert!(partition(len, workers).len() <= workers);
            }
        }
    }

    #[test]
    fn sums_batches() {
        let items: Vec<u64> = (1..=100).collect();
        let total = scatter_gather(&items, 4, |b| Ok::<_, String>(b.iter().sum::<u64>()), |a, b| a + b);
        assert_eq!(total.unwrap(), Some(5050));
    }

    #[test]
    fn failed_batches_are_dropped() {
        let items: Vec<u64> = (0..8).collect();
        let total = scatter_gather(&items, 4, |b| {
            if b.contains(&2) {
                Err(String::from("bad batch"))
            } else if b.contains(&4) {
                panic!("worker died");
            } else {
                Ok(b.iter().sum::<u64>())
            }
        }, |a, b| a + b);
        // Batches are [0, 1], [2, 3], [4, 5], [6, 7].
        assert_eq!(total.unwrap(), Some(1 + 6 + 7));
    }

    #[test]
    fn huge_worker_count_is_clamped() {
        let items: Vec<u64> = (1..=4).collect();
        let total = scatter_gather(&items, usize::MAX, |b| Ok::<_, String>(b.iter().sum::<u64>()), |a, b| a + b);
        assert_eq!(total.unwrap(), Some(10));
    }

    #[test]
    fn empty_input_gives_nothing() {
        let items: Vec<u64> = Vec::new();
        let total = scatter_gather(&items, 4, |b| Ok::<_, String>(b.len()), |a, b| a + b);
        assert_eq!(total.unwrap(), None);
    }
}
