//! Parallel Jacobi solver facade.
//!
//! Validates the system and the parameters, builds the worker team and the chunk source
//! once per solve, runs the [`Controller`] and packages the result.
//!
//! # Usage
//!
//! ```rust
//! use parjacobi::{JacobiOptions, Schedule, solve};
//! use parjacobi::matrix::fixtures::model_problem;
//!
//! let (a, b) = model_problem::<f64>(64);
//! let opts = JacobiOptions::default()
//!     .with_worker_count(2)
//!     .with_schedule(Schedule::Guided)
//!     .with_chunk_size(Some(4));
//! let (x, stats) = solve(&a, &b, &opts).unwrap();
//! assert!(stats.converged());
//! assert_eq!(x.len(), 64);
//! ```

use std::time::Instant;

use log::debug;
use num_traits::{Float, NumCast};

use crate::config::JacobiOptions;
use crate::core::traits::{MatShape, MatrixGet};
use crate::error::JError;
use crate::matrix::System;
use crate::parallel::{Team, WorkerTeam};
use crate::schedule::ScheduleOptions;
use crate::solver::LinearSolver;
use crate::solver::controller::Controller;
use crate::utils::convergence::{Convergence, ConvergenceState, SolveStats, SolveStatus};

/// Jacobi iteration with a configurable worker count and work-distribution policy.
#[derive(Debug, Clone)]
pub struct JacobiSolver<T> {
    pub conv: Convergence<T>,
    pub workers: usize,
    pub schedule: ScheduleOptions,
}

impl<T: Float + Send + Sync> JacobiSolver<T> {
    pub fn new(tol: T, max_iters: usize, workers: usize, schedule: ScheduleOptions) -> Result<Self, JError> {
        let conv = Convergence::new(tol, max_iters)?;
        schedule.validate(workers)?;
        Ok(Self { conv, workers, schedule })
    }

    pub fn from_options(opts: &JacobiOptions) -> Result<Self, JError> {
        let invalid = JError::InvalidTolerance(opts.tolerance);
        let tol = <T as NumCast>::from(opts.tolerance).ok_or_else(|| invalid.clone())?;
        // Report the caller's value when the cast flushes it to zero or infinity.
        Self::new(tol, opts.max_iterations, opts.worker_count, opts.schedule_options()).map_err(|e| match e {
            JError::InvalidTolerance(_) => invalid,
            other => other,
        })
    }

    /// Solve from the caller's initial guess, returning the final iterate and stats.
    pub fn solve_from<M>(&self, a: &M, b: &[T], initial: Vec<T>) -> Result<(Vec<T>, SolveStats<T>), JError>
    where
        M: MatrixGet<T> + MatShape + Sync + ?Sized,
    {
        let system = System::new(a, b)?;
        let n = system.n();
        if initial.len() != n {
            return Err(JError::DimensionMismatch(format!(
                "initial guess has length {}, matrix order is {}",
                initial.len(),
                n
            )));
        }
        let source = self.schedule.build(n, self.workers)?;
        let team = WorkerTeam::new(self.workers)?;
        debug!(
            "jacobi: n = {}, workers = {} ({}), schedule = {}, tol = {:.3e}, max_iters = {}",
            n,
            team.size(),
            if team.is_parallel() { "pool" } else { "serial" },
            self.schedule,
            self.conv.tol.to_f64().unwrap_or(f64::NAN),
            self.conv.max_iters
        );

        let start = Instant::now();
        let mut ctl = Controller::new(self.conv, initial);
        ctl.run(&team, source.as_ref(), system);
        let elapsed = start.elapsed();

        let (x, iterations, final_norm, state) = ctl.finish();
        let status = match state {
            ConvergenceState::Converged => SolveStatus::Converged,
            _ => SolveStatus::Exhausted,
        };
        Ok((x, SolveStats { iterations, final_norm, elapsed, status }))
    }
}

impl<M, T> LinearSolver<M, Vec<T>> for JacobiSolver<T>
where
    M: MatrixGet<T> + MatShape + Sync + ?Sized,
    T: Float + Send + Sync,
{
    type Error = JError;
    type Scalar = T;

    fn solve(&mut self, a: &M, b: &Vec<T>, x: &mut Vec<T>) -> Result<SolveStats<T>, JError> {
        let (solution, stats) = self.solve_from(a, b, x.clone())?;
        *x = solution;
        Ok(stats)
    }
}

/// Solve `A·x = b` from a zero initial guess with the given options.
pub fn solve<M, T>(a: &M, b: &[T], opts: &JacobiOptions) -> Result<(Vec<T>, SolveStats<T>), JError>
where
    M: MatrixGet<T> + MatShape + Sync + ?Sized,
    T: Float + Send + Sync,
{
    let solver = JacobiSolver::<T>::from_options(opts)?;
    solver.solve_from(a, b, vec![T::zero(); b.len()])
}
