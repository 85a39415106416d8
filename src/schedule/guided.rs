use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Chunk, ChunkSource, Schedule};

/// Claimed blocks of `max(c, remaining / (T · factor))` rows.
///
/// Large blocks early amortize claim overhead, small blocks late limit tail imbalance.
pub struct GuidedChunks {
    rows: usize,
    workers: usize,
    min_chunk: usize,
    /// `workers · factor`, saturated.
    divisor: usize,
    cursor: AtomicUsize,
}

impl GuidedChunks {
    pub fn new(rows: usize, workers: usize, min_chunk: usize, factor: usize) -> Self {
        assert!(
            workers >= 1 && min_chunk >= 1 && factor >= 1,
            "validated by ScheduleOptions::build"
        );
        let divisor = workers.saturating_mul(factor);
        Self { rows, workers, min_chunk, divisor, cursor: AtomicUsize::new(0) }
    }

    /// Size offered when `remaining` rows are unclaimed.
    pub fn offer(&self, remaining: usize) -> usize {
        (remaining / self.divisor)
            .max(self.min_chunk)
            .min(remaining)
    }
}

// SAFETY: each claim is a compare-exchange from `start` to `start + size` with
// `size <= rows - start`, so claims are in bounds and back to back.
unsafe impl ChunkSource for GuidedChunks {
    fn begin_iteration(&self) {
        self.cursor.store(0, Ordering::Relaxed);
    }

    fn next_chunk(&self, _worker: usize) -> Option<Chunk> {
        let mut start = self.cursor.load(Ordering::Relaxed);
        loop {
            if start >= self.rows {
                return None;
            }
            let size = self.offer(self.rows - start);
            match self.cursor.compare_exchange_weak(
                start,
                start + size,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return Some(Chunk::new(start, start + size)),
                Err(seen) => start = seen,
            }
        }
    }

    fn schedule(&self) -> Schedule {
        Schedule::Guided
    }

    fn workers(&self) -> usize {
        self.workers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::drain_round_robin;

    #[test]
    fn sizes_shrink_toward_minimum() {
        let src = GuidedChunks::new(100, 4, 2, 1);
        let sizes: Vec<usize> = drain_round_robin(&src).iter().map(|(_, c)| c.len()).collect();
        assert_eq!(sizes[0], 25);
        assert_eq!(sizes[1], 18);
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]), "sizes grew: {:?}", sizes);
        let (last, body) = sizes.split_last().unwrap();
        assert!(body.iter().all(|&s| s >= 2));
        assert!(*last >= 1);
        assert_eq!(sizes.iter().sum::<usize>(), 100);
    }

    #[test]
    fn factor_divides_first_offer() {
        let src = GuidedChunks::new(100, 2, 1, 5);
        assert_eq!(src.offer(100), 10);
        assert_eq!(src.offer(3), 1);
        assert_eq!(src.offer(0), 0);
    }

    #[test]
    fn huge_factor_degrades_to_minimum_chunks() {
        let src = GuidedChunks::new(12, 4, 5, usize::MAX);
        assert_eq!(src.divisor, usize::MAX);
        assert_eq!(src.offer(12), 5);
        let drawn = drain_round_robin(&src);
        let sizes: Vec<usize> = drawn.iter().map(|(_, c)| c.len()).collect();
        assert_eq!(sizes, vec![5, 5, 2]);
    }

    #[test]
    fn huge_minimum_is_one_chunk() {
        let src = GuidedChunks::new(10, 3, usize::MAX, 1);
        assert_eq!(drain_round_robin(&src), vec![(0, Chunk::new(0, 10))]);
    }
}
