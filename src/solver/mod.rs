//! Solver interfaces and the parallel Jacobi solver.

use crate::utils::convergence::SolveStats;

/// Common interface for iterative solvers.
pub trait LinearSolver<M: ?Sized, V> {
    type Error;
    type Scalar: Copy + PartialOrd;
    /// Solve A·x = b. `x` holds the initial guess on entry and the result on exit.
    /// Returns iteration stats (including convergence info).
    fn solve(&mut self, a: &M, b: &V, x: &mut V) -> Result<SolveStats<Self::Scalar>, Self::Error>;
}

pub mod controller;
pub mod jacobi;
pub mod kernel;

pub use controller::{Controller, Iterate};
pub use jacobi::{JacobiSolver, solve};
