//! Integer-only trigonometry
//!
//! Works in the engine angle domain: `u16` counts with a full circle at
//! [`ANGLE_MAX`], so a quarter turn is 4096 and wrapping is a bit mask.
//! Sine and cosine results are scaled to ±[`OUTPUT_SCALE`]. The lookup
//! tables behind everything are built at compile time.

mod lookup;
mod tables;

pub use lookup::{fast_sqrt, magnitude, TrigTables, TABLES};

/// Engine angle counts in one full circle.
pub const ANGLE_MAX: u16 = 16384;

/// Scale of sine and cosine outputs.
pub const OUTPUT_SCALE: i16 = 8192;
