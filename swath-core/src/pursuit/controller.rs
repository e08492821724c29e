//! Line pursuit steering
//!
//! Steers the differential drive along a target line segment by
//! blending cross-track error with the heading error toward a
//! lookahead point. Pure integer math throughout; one evaluation per
//! control tick.

use crate::angle::{atan2, normalize, signed_difference, ANGLE_90};
use crate::config::PursuitConfig;
use crate::geometry::{normalize_vector, vector_length, Point};

/// Segment the mower is asked to drive, start to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TargetLine {
    pub start: Point,
    pub end: Point,
}

impl TargetLine {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
}

/// Everything one tick of the controller reads.
///
/// The caller owns this state and threads it through each tick; the
/// controller keeps nothing between evaluations.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PursuitState {
    /// Current position in millimeters
    pub position: Point,
    /// Current compass heading, tenths of a degree
    pub heading_x10: i16,
    /// Line to follow; ticking without one is an error
    pub line: Option<TargetLine>,
    /// Gains and limits
    pub config: PursuitConfig,
}

impl PursuitState {
    pub const fn new(config: PursuitConfig) -> Self {
        Self {
            position: Point::new(0, 0),
            heading_x10: 0,
            line: None,
            config,
        }
    }

    /// Evaluates one control tick.
    ///
    /// Arrival within the completion threshold reports complete with
    /// both wheels stopped. Otherwise steering grows with distance
    /// right of the line and with the clockwise heading error toward
    /// the lookahead point, slowing the left wheel and speeding the
    /// right.
    pub fn tick(&self) -> Result<PursuitOutput, PursuitError> {
        let line = self.line.ok_or(PursuitError::NoTargetLine)?;
        let config = &self.config;

        if self.position.distance_to(line.end) < config.completion_threshold_mm {
            return Ok(PursuitOutput {
                left_speed: 0,
                right_speed: 0,
                steering: 0,
                cross_track_mm: 0,
                heading_error_x10: 0,
                complete: true,
            });
        }

        let cross_track_mm = cross_track_error(self.position, line);
        let target = lookahead_point(self.position, line, config.lookahead_mm);
        let bearing = bearing_to(self.position, target);
        let heading_error_x10 = signed_difference(bearing, self.heading_x10);

        let raw = (config.cte_gain as i64 * cross_track_mm as i64
            + config.heading_gain as i64 * heading_error_x10 as i64)
            / 1000;
        let limit = (config.max_output / 2) as i64;
        let steering = raw.clamp(-limit, limit) as i16;

        let max = config.max_output as i32;
        let left_speed = (config.base_speed as i32 - steering as i32).clamp(-max, max) as i16;
        let right_speed = (config.base_speed as i32 + steering as i32).clamp(-max, max) as i16;

        Ok(PursuitOutput {
            left_speed,
            right_speed,
            steering,
            cross_track_mm,
            heading_error_x10,
            complete: false,
        })
    }
}

/// One tick's wheel commands and the errors behind them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PursuitOutput {
    pub left_speed: i16,
    pub right_speed: i16,
    /// Applied correction after clamping, counts
    pub steering: i16,
    /// Signed distance from the line, positive right of travel
    pub cross_track_mm: i32,
    /// Shortest rotation from heading to the target bearing
    pub heading_error_x10: i16,
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PursuitError {
    /// Ticked with no line set.
    NoTargetLine,
}

/// Signed perpendicular distance from the line through `line`, in
/// millimeters. The sign follows the start-to-end direction;
/// reflecting the position across the line negates it exactly. Lines
/// shorter than 10 mm yield zero instead of dividing by near-zero.
fn cross_track_error(position: Point, line: TargetLine) -> i32 {
    let line_vec = line.end - line.start;
    let pos_vec = position - line.start;

    let line_length = vector_length(line_vec.x, line_vec.y);
    if line_length < 10 {
        return 0;
    }

    let cross =
        pos_vec.x as i64 * line_vec.y as i64 - pos_vec.y as i64 * line_vec.x as i64;
    (cross / line_length as i64) as i32
}

/// Point `lookahead_mm` beyond the nearest point on the line, capped
/// at the end so the aim never leaves the segment.
fn lookahead_point(position: Point, line: TargetLine, lookahead_mm: i32) -> Point {
    let nearest = position.project_onto_segment(line.start, line.end);
    let line_vec = line.end - line.start;
    let (dir_x, dir_y) = normalize_vector(line_vec.x, line_vec.y);

    let look = Point::new(
        nearest.x + (dir_x as i64 * lookahead_mm as i64 / 1000) as i32,
        nearest.y + (dir_y as i64 * lookahead_mm as i64 / 1000) as i32,
    );

    let len_sq =
        line_vec.x as i64 * line_vec.x as i64 + line_vec.y as i64 * line_vec.y as i64;
    let advance = (look.x - line.start.x) as i64 * line_vec.x as i64
        + (look.y - line.start.y) as i64 * line_vec.y as i64;
    if advance > len_sq {
        line.end
    } else {
        look
    }
}

/// Compass bearing from one point toward another, tenths of a degree.
///
/// `atan2` returns the mathematical angle (0 = east, counter-clockwise
/// positive); the IMU reports a compass heading (0 = north, clockwise
/// positive). The conversion is the single 90-degree rotation plus
/// negation applied here and nowhere else.
fn bearing_to(from: Point, to: Point) -> i16 {
    normalize(ANGLE_90 - atan2(to.y - from.y, to.x - from.x))
}
