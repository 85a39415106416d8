// rayon-based worker team

use log::debug;

use super::Team;
use crate::error::JError;

/// Private rayon pool with exactly the requested number of threads.
///
/// Built per solve; the global rayon pool is never touched.
pub struct RayonTeam {
    pool: rayon::ThreadPool,
}

impl RayonTeam {
    pub fn new(workers: usize) -> Result<Self, JError> {
        if workers == 0 {
            return Err(JError::InvalidWorkerCount);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("parjacobi-worker-{}", i))
            .build()
            .map_err(|e| JError::ThreadPool(e.to_string()))?;
        debug!("worker pool ready: {} threads", pool.current_num_threads());
        Ok(Self { pool })
    }
}

impl Team for RayonTeam {
    fn size(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn fork_join<R, F>(&self, op: F) -> Vec<R>
    where
        F: Fn(usize) -> R + Sync,
        R: Send,
    {
        self.pool.broadcast(|ctx| op(ctx.index()))
    }
}
