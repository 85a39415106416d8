use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Chunk, ChunkSource, Schedule};

/// Fixed-size blocks claimed first come, first served from one shared cursor.
///
/// Which worker gets which block is decided by the race on the cursor; only the
/// partition of `[0, n)` is guaranteed.
pub struct DynamicChunks {
    rows: usize,
    workers: usize,
    chunk: usize,
    cursor: AtomicUsize,
}

impl DynamicChunks {
    pub fn new(rows: usize, workers: usize, chunk: usize) -> Self {
        assert!(workers >= 1 && chunk >= 1, "validated by ScheduleOptions::build");
        // A chunk longer than the range is the whole range.
        let chunk = chunk.min(rows.max(1));
        Self { rows, workers, chunk, cursor: AtomicUsize::new(0) }
    }
}

// SAFETY: the cursor only moves forward and never past `rows`, so every claimed range is
// in bounds and starts where the previous claim ended.
unsafe impl ChunkSource for DynamicChunks {
    fn begin_iteration(&self) {
        self.cursor.store(0, Ordering::Relaxed);
    }

    fn next_chunk(&self, _worker: usize) -> Option<Chunk> {
        let (rows, chunk) = (self.rows, self.chunk);
        let start = self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| {
                (cur < rows).then(|| cur.saturating_add(chunk).min(rows))
            })
            .ok()?;
        Some(Chunk::new(start, start.saturating_add(chunk).min(rows)))
    }

    fn schedule(&self) -> Schedule {
        Schedule::Dynamic
    }

    fn workers(&self) -> usize {
        self.workers
    }
}
