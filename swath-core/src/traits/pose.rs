//! Position and heading source trait
//!
//! Implemented by the localization layer (GPS plus IMU fusion on the
//! production board) and polled once per control tick.

use crate::geometry::Point;

/// Errors that can occur when reading the pose
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PoseError {
    /// No position fix is currently available
    NoFix,
    /// The sensor has not finished initializing
    NotReady,
}

/// Source of the mower's current position and heading
pub trait PoseSource {
    /// Check if a position fix is currently held
    fn has_fix(&self) -> bool;

    /// Current position in millimeters
    fn position(&mut self) -> Result<Point, PoseError>;

    /// Current compass heading in tenths of a degree, `[0, 3600)`
    fn heading(&mut self) -> Result<i16, PoseError>;
}
