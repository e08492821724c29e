//! Application angle units and the adapter onto the trig engine
//!
//! The application measures headings in tenths of a degree wrapping at
//! [`ANGLE_360`], with trig outputs at a ×1000 scale. Conversions to
//! and from the engine domain are one multiply and one shift each way.

mod adapter;
mod units;

pub use adapter::{atan2, cos, from_engine, magnitude, sin, to_engine};
pub use units::{normalize, signed_difference};

/// One full turn in application units (tenths of a degree).
pub const ANGLE_360: i16 = 3600;

/// Half a turn.
pub const ANGLE_180: i16 = 1800;

/// A quarter turn.
pub const ANGLE_90: i16 = 900;
