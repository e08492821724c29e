//! Navigation tuning
//!
//! Board-agnostic tuning structures, persisted as a CRC-guarded
//! [`TuningData`] block.

pub mod tuning;
pub mod types;

pub use tuning::{ConfigError, TuningData, TUNING_MAGIC, TUNING_VERSION};
pub use types::{NavTuning, PursuitConfig};
