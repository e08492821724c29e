//! Navigation tuning type definitions
//!
//! These types carry every field-adjustable navigation parameter.
//! The persisted form wraps them in a checksummed [`TuningData`]
//! block.
//!
//! [`TuningData`]: super::TuningData

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gains and limits for the line-pursuit steering controller.
///
/// Gains are in thousandths: a `cte_gain` of 1000 converts 1 mm of
/// cross-track error into 1 count of steering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PursuitConfig {
    /// Steering per unit of cross-track error (thousandths)
    pub cte_gain: i32,
    /// Steering per unit of heading error (thousandths)
    pub heading_gain: i32,
    /// Distance ahead of the nearest point to aim for (mm)
    pub lookahead_mm: i32,
    /// Forward speed both wheels share before steering (counts)
    pub base_speed: i16,
    /// Magnitude limit for each wheel command (counts)
    pub max_output: i16,
    /// Distance to the line end that counts as arrival (mm)
    pub completion_threshold_mm: i32,
}

impl PursuitConfig {
    pub const fn new() -> Self {
        Self {
            cte_gain: 1000,
            heading_gain: 2000,
            lookahead_mm: 1000,
            base_speed: 500,
            max_output: 1000,
            completion_threshold_mm: 300,
        }
    }
}

impl Default for PursuitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete navigation tuning set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NavTuning {
    /// Steering controller gains and limits
    pub pursuit: PursuitConfig,
    /// Spacing between successive mowing rings (mm)
    pub ring_spacing_mm: i32,
    /// Distance within which a position counts as on the perimeter (mm)
    pub on_path_threshold_mm: i32,
}

impl NavTuning {
    pub const fn new() -> Self {
        Self {
            pursuit: PursuitConfig::new(),
            ring_spacing_mm: 150,
            on_path_threshold_mm: 500,
        }
    }
}

impl Default for NavTuning {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pursuit_defaults() {
        let config = PursuitConfig::default();
        assert_eq!(config.cte_gain, 1000);
        assert_eq!(config.heading_gain, 2000);
        assert_eq!(config.base_speed, 500);
        assert_eq!(config.max_output, 1000);
    }

    #[test]
    fn test_nav_tuning_defaults() {
        let tuning = NavTuning::default();
        assert_eq!(tuning.ring_spacing_mm, 150);
        assert_eq!(tuning.on_path_threshold_mm, 500);
        assert_eq!(tuning.pursuit, PursuitConfig::default());
    }
}
