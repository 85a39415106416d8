//! Convergence controller: drives distribute → update → reduce → swap until the update
//! norm reaches the tolerance or the iteration cap is hit.

use log::{debug, trace, warn};
use num_traits::Float;

use crate::core::traits::{MatShape, MatrixGet};
use crate::matrix::System;
use crate::parallel::{SharedSlice, Team};
use crate::schedule::ChunkSource;
use crate::solver::kernel;
use crate::utils::convergence::{Convergence, ConvergenceState};
use crate::utils::reduce::MaxNorm;

/// The two iterate buffers. Sweeps read `current` and write `next`; `swap` publishes `next`.
#[derive(Debug, Clone)]
pub struct Iterate<T> {
    pub current: Vec<T>,
    pub next: Vec<T>,
}

impl<T: Float> Iterate<T> {
    pub fn new(initial: Vec<T>) -> Self {
        let next = vec![T::zero(); initial.len()];
        Self { current: initial, next }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    pub fn into_current(self) -> Vec<T> {
        self.current
    }
}

/// One Jacobi sweep over all rows: every worker draws chunks until the source is empty,
/// tracking a local max change; the partial maxima are merged once all workers returned.
///
/// `next` is fully overwritten; `current` is untouched.
pub fn sweep<M, T, W>(
    team: &W,
    source: &dyn ChunkSource,
    system: System<'_, M, T>,
    iterate: &mut Iterate<T>,
) -> T
where
    M: MatrixGet<T> + MatShape + Sync + ?Sized,
    T: Float + Send + Sync,
    W: Team + ?Sized,
{
    let (a, b) = (system.matrix(), system.rhs());
    let Iterate { current, next } = iterate;
    let current: &[T] = current;
    let next = SharedSlice::new(next);
    source.begin_iteration();
    let partials = team.fork_join(|worker| {
        let mut local = MaxNorm::identity();
        while let Some(chunk) = source.next_chunk(worker) {
            // SAFETY: `ChunkSource` implementors guarantee disjoint in-bounds chunks per iteration.
            let out = unsafe { next.chunk_mut(chunk) };
            local = MaxNorm::combine(local, kernel::update_chunk(a, b, current, chunk, out));
        }
        local
    });
    MaxNorm::reduce(partials)
}

/// RUNNING → CONVERGED | EXHAUSTED state machine over an [`Iterate`].
pub struct Controller<T> {
    conv: Convergence<T>,
    iterate: Iterate<T>,
    iteration: usize,
    norm: T,
    state: ConvergenceState,
}

impl<T> Controller<T>
where
    T: Float + Send + Sync,
{
    pub fn new(conv: Convergence<T>, initial: Vec<T>) -> Self {
        Self {
            conv,
            iterate: Iterate::new(initial),
            iteration: 0,
            norm: T::infinity(),
            state: ConvergenceState::Running,
        }
    }

    pub fn state(&self) -> ConvergenceState {
        self.state
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Update norm of the last sweep (infinite before the first one).
    pub fn norm(&self) -> T {
        self.norm
    }

    pub fn current(&self) -> &[T] {
        &self.iterate.current
    }

    /// Perform one iteration and return the new state. No-op once terminal.
    pub fn step<M, W>(&mut self, team: &W, source: &dyn ChunkSource, system: System<'_, M, T>) -> ConvergenceState
    where
        M: MatrixGet<T> + MatShape + Sync + ?Sized,
        W: Team + ?Sized,
    {
        if self.state != ConvergenceState::Running {
            return self.state;
        }
        self.norm = sweep(team, source, system, &mut self.iterate);
        self.iterate.swap();
        self.iteration += 1;
        trace!("iter {}: norm = {:.6e}", self.iteration, self.norm.to_f64().unwrap_or(f64::NAN));
        self.state = self.conv.check(self.norm, self.iteration);
        self.state
    }

    /// Iterate to a terminal state.
    ///
    /// With a zero iteration cap a trial sweep measures the change one step would make
    /// without committing it, so an initial guess that is already a fixed point reports
    /// convergence.
    pub fn run<M, W>(&mut self, team: &W, source: &dyn ChunkSource, system: System<'_, M, T>) -> ConvergenceState
    where
        M: MatrixGet<T> + MatShape + Sync + ?Sized,
        W: Team + ?Sized,
    {
        if self.conv.max_iters == 0 && self.state == ConvergenceState::Running {
            self.norm = sweep(team, source, system, &mut self.iterate);
            self.state = if self.norm <= self.conv.tol {
                ConvergenceState::Converged
            } else {
                ConvergenceState::Exhausted
            };
        }
        while self.state == ConvergenceState::Running {
            self.step(team, source, system);
        }
        let norm = self.norm.to_f64().unwrap_or(f64::NAN);
        match self.state {
            ConvergenceState::Converged => {
                debug!("converged after {} iterations, norm = {:.3e}", self.iteration, norm)
            }
            ConvergenceState::Exhausted => warn!(
                "iteration limit {} reached, norm = {:.3e} > tol = {:.3e}",
                self.conv.max_iters,
                norm,
                self.conv.tol.to_f64().unwrap_or(f64::NAN)
            ),
            ConvergenceState::Running => unreachable!("loop exits on a terminal state"),
        }
        self.state
    }

    /// Consume the controller, yielding `(solution, iterations, final_norm, state)`.
    pub fn finish(self) -> (Vec<T>, usize, T, ConvergenceState) {
        (self.iterate.into_current(), self.iteration, self.norm, self.state)
    }
}
