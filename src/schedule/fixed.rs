use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Chunk, ChunkSource, Schedule};

/// Static round-robin blocks: block `k` belongs to worker `k mod T`.
///
/// The assignment is computed once and replayed identically every iteration.
pub struct FixedChunks {
    per_worker: Vec<Vec<Chunk>>,
    cursors: Vec<AtomicUsize>,
}

impl FixedChunks {
    pub fn new(rows: usize, workers: usize, chunk: usize) -> Self {
        assert!(workers >= 1 && chunk >= 1, "validated by ScheduleOptions::build");
        let mut per_worker = vec![Vec::new(); workers];
        for (k, start) in (0..rows).step_by(chunk).enumerate() {
            per_worker[k % workers].push(Chunk::new(start, start.saturating_add(chunk).min(rows)));
        }
        let cursors = (0..workers).map(|_| AtomicUsize::new(0)).collect();
        Self { per_worker, cursors }
    }

    /// Blocks owned by `worker`, in processing order.
    pub fn assignment(&self, worker: usize) -> &[Chunk] {
        &self.per_worker[worker]
    }
}

// SAFETY: the blocks are built once as consecutive ranges of `[0, rows)` and each worker
// walks only its own list, once per iteration.
unsafe impl ChunkSource for FixedChunks {
    fn begin_iteration(&self) {
        for c in &self.cursors {
            c.store(0, Ordering::Relaxed);
        }
    }

    fn next_chunk(&self, worker: usize) -> Option<Chunk> {
        let mine = self.per_worker.get(worker)?;
        // Only `worker` advances its own cursor.
        let pos = self.cursors[worker].fetch_add(1, Ordering::Relaxed);
        mine.get(pos).copied()
    }

    fn schedule(&self) -> Schedule {
        Schedule::Fixed
    }

    fn workers(&self) -> usize {
        self.per_worker.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::drain_round_robin;

    #[test]
    fn round_robin_blocks() {
        let src = FixedChunks::new(10, 2, 3);
        assert_eq!(src.assignment(0), &[Chunk::new(0, 3), Chunk::new(6, 9)]);
        assert_eq!(src.assignment(1), &[Chunk::new(3, 6), Chunk::new(9, 10)]);
    }

    #[test]
    fn replays_identically() {
        let src = FixedChunks::new(37, 3, 4);
        let first = drain_round_robin(&src);
        let second = drain_round_robin(&src);
        assert_eq!(first, second);
        assert!(first.iter().all(|(w, c)| src.assignment(*w).contains(c)));
    }

    #[test]
    fn idle_workers_get_nothing() {
        let src = FixedChunks::new(2, 4, 1);
        src.begin_iteration();
        assert_eq!(src.next_chunk(3), None);
        assert_eq!(src.next_chunk(1), Some(Chunk::new(1, 2)));
    }

    #[test]
    fn huge_chunk_is_one_block() {
        let src = FixedChunks::new(10, 3, usize::MAX);
        assert_eq!(src.assignment(0), &[Chunk::new(0, 10)]);
        assert!(src.assignment(1).is_empty() && src.assignment(2).is_empty());
    }
}
