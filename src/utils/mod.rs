//! Convergence bookkeeping, the max reduction and residual helpers.

pub mod convergence;
pub mod reduce;
pub mod residual;

pub use convergence::{Convergence, ConvergenceState, SolveStats, SolveStatus};
pub use reduce::MaxNorm;
pub use residual::{residual, residual_inf_norm};
