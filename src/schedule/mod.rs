//! Work distribution for the row-update loop.
//!
//! A [`ChunkSource`] hands out contiguous row ranges to workers, one iteration at a time.
//! Every implementation guarantees that the chunks drawn between two calls to
//! [`ChunkSource::begin_iteration`] partition `[0, n)` exactly, which is what makes the
//! concurrent writes into the next iterate sound.
//!
//! Policies:
//! - [`FixedChunks`]: blocks assigned round-robin once, replayed every iteration.
//! - [`DynamicChunks`]: fixed-size blocks claimed from a shared cursor.
//! - [`GuidedChunks`]: claimed blocks shrinking with the remaining work.

pub mod chunk;
pub mod dynamic;
pub mod fixed;
pub mod guided;
pub mod policy;

pub use chunk::Chunk;
pub use dynamic::DynamicChunks;
pub use fixed::FixedChunks;
pub use guided::GuidedChunks;
pub use policy::{Schedule, ScheduleOptions};

/// Source of row chunks for the workers of one solve.
///
/// # Safety
/// Between two calls to `begin_iteration`, the chunks returned by `next_chunk` (across all
/// workers and threads) must lie within `[0, n)` for the row count the source was built for,
/// and must never overlap. The sweep writes each drawn chunk of the next iterate through an
/// unchecked mutable view, so a source that repeats or overlaps rows causes a data race.
///
/// Implementing the trait therefore needs `unsafe impl`:
///
/// ```compile_fail
/// use parjacobi::{Chunk, ChunkSource, Schedule};
///
/// struct Repeat;
///
/// impl ChunkSource for Repeat {
///     fn begin_iteration(&self) {}
///     fn next_chunk(&self, _worker: usize) -> Option<Chunk> {
///         Some(Chunk::new(0, 1))
///     }
///     fn schedule(&self) -> Schedule {
///         Schedule::Dynamic
///     }
///     fn workers(&self) -> usize {
///         2
///     }
/// }
/// ```
pub unsafe trait ChunkSource: Send + Sync {
    /// Rewind for a new iteration. Must not be called while workers are drawing.
    fn begin_iteration(&self);
    /// Next chunk for `worker`, or `None` once this worker has nothing left this iteration.
    fn next_chunk(&self, worker: usize) -> Option<Chunk>;
    /// Policy implemented by this source.
    fn schedule(&self) -> Schedule;
    /// Number of workers the source was built for.
    fn workers(&self) -> usize;
}

/// Draw one whole iteration serially, polling workers in turn.
///
/// Returns `(worker, chunk)` pairs in draw order. Rewinds the source first.
pub fn drain_round_robin(source: &dyn ChunkSource) -> Vec<(usize, Chunk)> {
    source.begin_iteration();
    let workers = source.workers();
    let mut done = vec![false; workers];
    let mut out = Vec::new();
    while done.iter().any(|d| !d) {
        for (w, finished) in done.iter_mut().enumerate() {
            if *finished {
                continue;
            }
            match source.next_chunk(w) {
                Some(c) => out.push((w, c)),
                None => *finished = true,
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sorted chunks must tile `[0, n)` with no gap or overlap.
    fn assert_partition(n: usize, mut chunks: Vec<Chunk>) {
        chunks.sort_by_key(|c| c.start);
        let mut expected = 0;
        for c in &chunks {
            assert_eq!(c.start, expected, "gap or overlap at {}", expected);
            assert!(!c.is_empty());
            expected = c.end;
        }
        assert_eq!(expected, n);
    }

    #[test]
    fn all_policies_partition_serially() {
        for &kind in &[Schedule::Fixed, Schedule::Dynamic, Schedule::Guided] {
            for &n in &[0usize, 1, 7, 64, 1000] {
                for &workers in &[1usize, 2, 3, 8] {
                    for chunk in [None, Some(1), Some(5), Some(2000)] {
                        let opts = ScheduleOptions::new(kind).with_chunk_size(chunk);
                        let source = opts.build(n, workers).unwrap();
                        let drawn = drain_round_robin(source.as_ref());
                        assert_partition(n, drawn.into_iter().map(|(_, c)| c).collect());
                    }
                }
            }
        }
    }

    #[test]
    fn all_policies_partition_under_contention() {
        let n = 997;
        let workers = 4;
        for &kind in &[Schedule::Fixed, Schedule::Dynamic, Schedule::Guided] {
            let source = ScheduleOptions::new(kind)
                .with_chunk_size(Some(3))
                .build(n, workers)
                .unwrap();
            for _ in 0..3 {
                source.begin_iteration();
                let chunks: Vec<Chunk> = std::thread::scope(|s| {
                    let handles: Vec<_> = (0..workers)
                        .map(|w| {
                            let src = source.as_ref();
                            s.spawn(move || {
                                let mut mine = Vec::new();
                                while let Some(c) = src.next_chunk(w) {
                                    mine.push(c);
                                }
                                mine
                            })
                        })
                        .collect();
                    handles.into_iter().flat_map(|h| h.join().unwrap()).collect()
                });
                assert_partition(n, chunks);
            }
        }
    }

    #[test]
    fn oversized_chunk_is_a_single_chunk() {
        for &kind in &[Schedule::Fixed, Schedule::Dynamic, Schedule::Guided] {
            let source = ScheduleOptions::new(kind)
                .with_chunk_size(Some(50))
                .build(10, 4)
                .unwrap();
            let drawn = drain_round_robin(source.as_ref());
            assert_eq!(drawn, vec![(0, Chunk::new(0, 10))]);
        }
    }
}
