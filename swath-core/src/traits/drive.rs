//! Differential drive actuator trait
//!
//! Implemented by the wheel control layer. Speed interpolation toward
//! the target happens behind this trait; the navigation core only
//! states where the speeds should end up and how fast to get there.

/// Full-scale wheel speed in counts
pub const MAX_SPEED: i16 = 1000;

/// Half of full scale, the default cruising speed
pub const HALF_SPEED: i16 = 500;

/// Errors that can occur when commanding the drive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveError {
    /// The drive is disabled, commands are not accepted
    Disabled,
    /// A speed outside `±MAX_SPEED` was requested
    InvalidSpeed,
}

/// Two-wheel differential drive
pub trait DriveActuator {
    /// Command both wheel speeds, ramping over `ramp_ms`
    fn set_target_speed(&mut self, left: i16, right: i16, ramp_ms: u32) -> Result<(), DriveError>;

    /// Ramp both wheels to a stop
    fn stop(&mut self, ramp_ms: u32) -> Result<(), DriveError> {
        self.set_target_speed(0, 0, ramp_ms)
    }
}
