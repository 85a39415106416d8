//! Policy selection and per-solve construction of chunk sources.

use std::fmt;
use std::str::FromStr;

use super::{ChunkSource, DynamicChunks, FixedChunks, GuidedChunks};
use crate::error::JError;

/// Work-distribution policy for the row-update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Schedule {
    /// Contiguous blocks assigned round-robin once and reused every iteration.
    #[default]
    Fixed,
    /// Fixed-size blocks claimed by whichever worker is free first.
    Dynamic,
    /// Claimed blocks sized by the remaining work, never below the chunk size.
    Guided,
}

impl Schedule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Schedule::Fixed => "static",
            Schedule::Dynamic => "dynamic",
            Schedule::Guided => "guided",
        }
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Schedule {
    type Err = JError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" | "fixed" => Ok(Schedule::Fixed),
            "dynamic" => Ok(Schedule::Dynamic),
            "guided" => Ok(Schedule::Guided),
            _ => Err(JError::UnknownSchedule(s.to_string())),
        }
    }
}

/// Policy plus its parameters.
///
/// `chunk_size = None` picks the policy default: one contiguous block per worker for
/// [`Schedule::Fixed`], single rows for the claiming policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptions {
    pub kind: Schedule,
    pub chunk_size: Option<usize>,
    /// Divisor applied on top of the worker count when sizing guided chunks.
    pub guided_factor: usize,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self::new(Schedule::Fixed)
    }
}

impl ScheduleOptions {
    pub fn new(kind: Schedule) -> Self {
        Self { kind, chunk_size: None, guided_factor: 1 }
    }

    pub fn with_chunk_size(mut self, chunk_size: Option<usize>) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_guided_factor(mut self, factor: usize) -> Self {
        self.guided_factor = factor;
        self
    }

    /// Check the parameters without building anything.
    pub fn validate(&self, workers: usize) -> Result<(), JError> {
        if workers == 0 {
            return Err(JError::InvalidWorkerCount);
        }
        if self.chunk_size == Some(0) {
            return Err(JError::InvalidChunkSize);
        }
        if self.kind == Schedule::Guided && self.guided_factor == 0 {
            return Err(JError::InvalidGuidedFactor);
        }
        Ok(())
    }

    /// Chunk size actually used for `rows` rows and `workers` workers.
    pub fn effective_chunk_size(&self, rows: usize, workers: usize) -> usize {
        match (self.kind, self.chunk_size) {
            (_, Some(c)) => c,
            (Schedule::Fixed, None) => rows.div_ceil(workers.max(1)).max(1),
            (Schedule::Dynamic | Schedule::Guided, None) => 1,
        }
    }

    /// Build the chunk source for one solve over `rows` rows.
    pub fn build(&self, rows: usize, workers: usize) -> Result<Box<dyn ChunkSource>, JError> {
        self.validate(workers)?;
        let chunk = self.effective_chunk_size(rows, workers);
        let source: Box<dyn ChunkSource> = match self.kind {
            Schedule::Fixed => Box::new(FixedChunks::new(rows, workers, chunk)),
            Schedule::Dynamic => Box::new(DynamicChunks::new(rows, workers, chunk)),
            Schedule::Guided => {
                Box::new(GuidedChunks::new(rows, workers, chunk, self.guided_factor))
            }
        };
        Ok(source)
    }
}

impl fmt::Display for ScheduleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.chunk_size {
            Some(c) => write!(f, "{} with chunk_size={}", self.kind, c)?,
            None => write!(f, "{} with default chunk_size", self.kind)?,
        }
        if self.kind == Schedule::Guided && self.guided_factor != 1 {
            write!(f, ", guided_factor={}", self.guided_factor)?;
        }
        Ok(())
    }
}
