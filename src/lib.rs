//! parjacobi: parallel Jacobi iteration over faer dense matrices
//!
//! This crate solves dense, diagonally dominant linear systems with the stationary Jacobi
//! method. The per-row update loop is split across a fixed team of worker threads under a
//! run-time selectable work-distribution policy (static round-robin blocks, dynamically
//! claimed blocks, or guided shrinking blocks), and the per-iteration convergence norm is
//! an explicit max reduction over worker-local partials.

pub mod parallel;

pub mod config;
pub mod core;
pub mod error;
pub mod matrix;
pub mod schedule;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::JacobiOptions;
pub use crate::core::traits::{MatShape, MatrixGet};
pub use error::JError;
pub use matrix::System;
pub use parallel::{SerialTeam, Team, WorkerTeam};
pub use schedule::{Chunk, ChunkSource, Schedule, ScheduleOptions};
pub use solver::{JacobiSolver, LinearSolver, solve};
pub use utils::{MaxNorm, residual_inf_norm};

// Re-export SolveStats at the crate root for convenience
pub use utils::convergence::{SolveStats, SolveStatus};
