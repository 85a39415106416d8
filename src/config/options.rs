//! Command-line or API options for a Jacobi solve.
//!
//! `JacobiOptions` gathers everything a caller chooses for one solve: problem size (used
//! by fixture-driven callers such as the demo), tolerance, iteration cap, worker count and
//! the work-distribution policy with its chunk size. Defaults follow the classic benchmark
//! setup: 1000 rows, ε = 1e-6, 1000 iterations, one worker per CPU, `static` with chunks of 32.

use std::fmt;

use crate::error::JError;
use crate::schedule::{Schedule, ScheduleOptions};

/// Solver parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct JacobiOptions {
    /// Order of the generated system (fixture-driven callers only)
    pub size: usize,

    /// Update-norm tolerance ε
    pub tolerance: f64,

    /// Iteration cap
    pub max_iterations: usize,

    /// Number of worker threads
    pub worker_count: usize,

    /// Work-distribution policy (static, dynamic, guided)
    pub schedule: Schedule,

    /// Rows per chunk; `None` picks the policy default
    pub chunk_size: Option<usize>,

    /// Extra divisor for guided chunk sizing
    pub guided_factor: usize,
}

impl Default for JacobiOptions {
    fn default() -> Self {
        Self {
            size: 1000,
            tolerance: 1e-6,
            max_iterations: 1000,
            worker_count: default_worker_count(),
            schedule: Schedule::Fixed,
            chunk_size: Some(32),
            guided_factor: 1,
        }
    }
}

#[cfg(feature = "rayon")]
fn default_worker_count() -> usize {
    num_cpus::get().max(1)
}

#[cfg(not(feature = "rayon"))]
fn default_worker_count() -> usize {
    1
}

impl JacobiOptions {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }
    pub fn with_chunk_size(mut self, chunk_size: Option<usize>) -> Self {
        self.chunk_size = chunk_size;
        self
    }
    pub fn with_guided_factor(mut self, guided_factor: usize) -> Self {
        self.guided_factor = guided_factor;
        self
    }

    /// Set the policy from its name (`static`/`fixed`, `dynamic`, `guided`).
    pub fn set_schedule_name(&mut self, name: &str) -> Result<(), JError> {
        self.schedule = name.parse()?;
        Ok(())
    }

    pub fn schedule_options(&self) -> ScheduleOptions {
        ScheduleOptions::new(self.schedule)
            .with_chunk_size(self.chunk_size)
            .with_guided_factor(self.guided_factor)
    }

    /// Check every parameter the solver would reject.
    pub fn validate(&self) -> Result<(), JError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(JError::InvalidTolerance(self.tolerance));
        }
        self.schedule_options().validate(self.worker_count)
    }
}

impl fmt::Display for JacobiOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parameters:")?;
        writeln!(f, "  Size of system: {}x{}", self.size, self.size)?;
        writeln!(f, "  Accuracy: {:e}", self.tolerance)?;
        writeln!(f, "  Max num of iterations: {}", self.max_iterations)?;
        writeln!(f, "  Threads: {}", self.worker_count)?;
        write!(f, "  Schedule: {}", self.schedule_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let opts = JacobiOptions::default();
        assert!(opts.worker_count >= 1);
        assert_eq!(opts.schedule, Schedule::Fixed);
        assert_eq!(opts.chunk_size, Some(32));
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn schedule_by_name() {
        let mut opts = JacobiOptions::default();
        opts.set_schedule_name("guided").unwrap();
        assert_eq!(opts.schedule, Schedule::Guided);
        assert_eq!(opts.set_schedule_name("runtime"), Err(JError::UnknownSchedule("runtime".into())));
        assert_eq!(opts.schedule, Schedule::Guided);
    }

    #[test]
    fn validate_catches_each_parameter() {
        let base = JacobiOptions::default();
        assert!(base.clone().with_tolerance(-1.0).validate().is_err());
        assert!(base.clone().with_tolerance(f64::NAN).validate().is_err());
        assert_eq!(base.clone().with_worker_count(0).validate(), Err(JError::InvalidWorkerCount));
        assert_eq!(base.clone().with_chunk_size(Some(0)).validate(), Err(JError::InvalidChunkSize));
        let guided = base.with_schedule(Schedule::Guided).with_guided_factor(0);
        assert_eq!(guided.validate(), Err(JError::InvalidGuidedFactor));
    }

    #[test]
    fn display_lists_parameters() {
        let opts = JacobiOptions::default()
            .with_size(10)
            .with_worker_count(4)
            .with_schedule(Schedule::Dynamic)
            .with_chunk_size(Some(16));
        let text = opts.to_string();
        assert!(text.contains("Size of system: 10x10"));
        assert!(text.contains("Accuracy: 1e-6"));
        assert!(text.contains("Threads: 4"));
        assert!(text.ends_with("Schedule: dynamic with chunk_size=16"));
    }
}
