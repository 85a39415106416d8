//! Fork-join execution of one Jacobi sweep across a fixed set of workers.
//!
//! A [`Team`] runs the same closure once per worker and returns when every worker is done;
//! that return is the end-of-iteration barrier. [`SharedSlice`] lets workers write disjoint
//! chunks of the next iterate concurrently.

use std::marker::PhantomData;

use crate::error::JError;
use crate::schedule::Chunk;

pub trait Team {
    /// Number of workers.
    fn size(&self) -> usize;
    /// Run `op(worker)` for every worker and collect the results in worker order.
    fn fork_join<R, F>(&self, op: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync,
        R: Send;
}

#[cfg(feature = "rayon")]
pub mod rayon_team;
#[cfg(feature = "rayon")]
pub use rayon_team::RayonTeam;

/// Runs the logical workers one after another on the calling thread.
#[derive(Debug, Clone, Copy)]
pub struct SerialTeam {
    size: usize,
}

impl SerialTeam {
    pub fn new(size: usize) -> Result<Self, JError> {
        if size == 0 {
            return Err(JError::InvalidWorkerCount);
        }
        Ok(Self { size })
    }
}

impl Team for SerialTeam {
    fn size(&self) -> usize {
        self.size
    }
    fn fork_join<R, F>(&self, op: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync,
        R: Send,
    {
        (0..self.size).map(op).collect()
    }
}

/// Team selected for a solve: a private thread pool when parallelism is available,
/// otherwise the serial team.
pub enum WorkerTeam {
    Serial(SerialTeam),
    #[cfg(feature = "rayon")]
    Rayon(RayonTeam),
}

impl WorkerTeam {
    pub fn new(workers: usize) -> Result<Self, JError> {
        if workers == 0 {
            return Err(JError::InvalidWorkerCount);
        }
        #[cfg(feature = "rayon")]
        {
            if workers > 1 {
                return Ok(WorkerTeam::Rayon(RayonTeam::new(workers)?));
            }
        }
        Ok(WorkerTeam::Serial(SerialTeam::new(workers)?))
    }

    pub fn is_parallel(&self) -> bool {
        match self {
            WorkerTeam::Serial(_) => false,
            #[cfg(feature = "rayon")]
            WorkerTeam::Rayon(_) => true,
        }
    }
}

impl Team for WorkerTeam {
    fn size(&self) -> usize {
        match self {
            WorkerTeam::Serial(team) => team.size(),
            #[cfg(feature = "rayon")]
            WorkerTeam::Rayon(team) => team.size(),
        }
    }
    fn fork_join<R, F>(&self, op: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync,
        R: Send,
    {
        match self {
            WorkerTeam::Serial(team) => team.fork_join(op),
            #[cfg(feature = "rayon")]
            WorkerTeam::Rayon(team) => team.fork_join(op),
        }
    }
}

/// Mutable slice shared by the workers of one sweep, written chunk by chunk.
pub struct SharedSlice<'a, T> {
    ptr: *mut T,
    len: usize,
    _marker: PhantomData<&'a mut [T]>,
}

// Access is restricted to disjoint chunks, see `chunk_mut`.
unsafe impl<T: Send> Send for SharedSlice<'_, T> {}
unsafe impl<T: Send> Sync for SharedSlice<'_, T> {}

impl<'a, T> SharedSlice<'a, T> {
    pub fn new(slice: &'a mut [T]) -> Self {
        Self { ptr: slice.as_mut_ptr(), len: slice.len(), _marker: PhantomData }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Mutable view of `chunk`.
    ///
    /// # Safety
    /// No other live reference obtained from this slice may overlap `chunk`. Chunks drawn
    /// from one `ChunkSource` iteration satisfy this.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn chunk_mut(&self, chunk: Chunk) -> &mut [T] {
        assert!(chunk.start <= chunk.end && chunk.end <= self.len, "chunk {:?} out of bounds", chunk);
        // SAFETY: in bounds per the assert; exclusivity per the caller's contract.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.add(chunk.start), chunk.len()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{Schedule, ScheduleOptions};

    #[test]
    fn serial_team_visits_every_worker_in_order() {
        let team = SerialTeam::new(3).unwrap();
        assert_eq!(team.fork_join(|w| w * 10), vec![0, 10, 20]);
        assert_eq!(SerialTeam::new(0).err(), Some(JError::InvalidWorkerCount));
    }

    #[test]
    fn worker_team_rejects_zero_workers() {
        assert!(matches!(WorkerTeam::new(0), Err(JError::InvalidWorkerCount)));
        let one = WorkerTeam::new(1).unwrap();
        assert!(!one.is_parallel());
        assert_eq!(one.size(), 1);
    }

    #[test]
    fn workers_fill_disjoint_chunks() {
        let n = 103;
        let workers = 4;
        let team = WorkerTeam::new(workers).unwrap();
        let source = ScheduleOptions::new(Schedule::Dynamic)
            .with_chunk_size(Some(5))
            .build(n, workers)
            .unwrap();
        let mut out = vec![usize::MAX; n];
        source.begin_iteration();
        {
            let shared = SharedSlice::new(&mut out);
            let counts = team.fork_join(|w| {
                let mut rows = 0;
                while let Some(c) = source.next_chunk(w) {
                    // SAFETY: chunks of one iteration are disjoint.
                    let dst = unsafe { shared.chunk_mut(c) };
                    for (k, v) in dst.iter_mut().enumerate() {
                        *v = c.start + k;
                    }
                    rows += c.len();
                }
                rows
            });
            assert_eq!(counts.iter().sum::<usize>(), n);
        }
        assert_eq!(out, (0..n).collect::<Vec<_>>());
    }
}
