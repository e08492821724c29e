//! Differential steering toward a target line.

pub mod controller;

pub use controller::{PursuitError, PursuitOutput, PursuitState, TargetLine};
