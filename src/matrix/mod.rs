//! Matrix module: system validation and problem fixtures.

pub mod system;
pub use system::System;
pub mod fixtures;
