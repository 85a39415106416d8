//! Convergence tracking & stopping criteria for the Jacobi iteration.

use std::fmt;
use std::time::Duration;

use crate::error::JError;
use num_traits::Float;

/// Stopping criteria: update norm tolerance and iteration cap.
#[derive(Debug, Clone, Copy)]
pub struct Convergence<T> {
    pub tol: T,
    pub max_iters: usize,
}

/// State of the convergence controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceState {
    Running,
    Converged,
    Exhausted,
}

/// How a solve ended. Exhaustion is a reported outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The update norm dropped to the tolerance.
    Converged,
    /// The iteration cap was reached first; the last iterate is returned as is.
    Exhausted,
}

#[derive(Clone, Debug)]
pub struct SolveStats<T> {
    pub iterations: usize,
    /// Max-abs change of the last sweep.
    pub final_norm: T,
    pub elapsed: Duration,
    pub status: SolveStatus,
}

impl<T> SolveStats<T> {
    pub fn converged(&self) -> bool {
        self.status == SolveStatus::Converged
    }
}

impl<T: Float> fmt::Display for SolveStats<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let norm = self.final_norm.to_f64().unwrap_or(f64::NAN);
        writeln!(f, "Num of iterations: {}", self.iterations)?;
        writeln!(f, "Norm: {:.2e}", norm)?;
        write!(f, "Time: {:.2} sec", self.elapsed.as_secs_f64())?;
        if self.status == SolveStatus::Exhausted {
            write!(f, " (iteration limit reached)")?;
        }
        Ok(())
    }
}

impl<T: Copy + Float> Convergence<T> {
    /// Rejects non-positive or non-finite tolerances. A zero cap is allowed.
    pub fn new(tol: T, max_iters: usize) -> Result<Self, JError> {
        if !tol.is_finite() || tol <= T::zero() {
            return Err(JError::InvalidTolerance(tol.to_f64().unwrap_or(f64::NAN)));
        }
        Ok(Self { tol, max_iters })
    }

    /// State after `iteration` completed sweeps, the last of which changed the iterate by `norm`.
    ///
    /// Convergence wins when both criteria hold on the same sweep.
    pub fn check(&self, norm: T, iteration: usize) -> ConvergenceState {
        if norm <= self.tol {
            ConvergenceState::Converged
        } else if iteration >= self.max_iters {
            ConvergenceState::Exhausted
        } else {
            ConvergenceState::Running
        }
    }
}
