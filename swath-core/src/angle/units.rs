//! Wrapping arithmetic in application angle units

use super::{ANGLE_180, ANGLE_360};

/// Wraps an angle into `[0, 3600)`.
///
/// Loops subtract or add one period per pass; an `i16` is never more
/// than ten periods out, so the loops are bounded.
pub fn normalize(angle: i16) -> i16 {
    let mut a = angle;
    while a >= ANGLE_360 {
        a -= ANGLE_360;
    }
    while a < 0 {
        a += ANGLE_360;
    }
    a
}

/// Signed shortest turn from `current` to `target`, in `(-1800, 1800]`.
///
/// Positive means turn counter-clockwise. An exact half turn always
/// reads +1800, never the negative endpoint.
pub fn signed_difference(target: i16, current: i16) -> i16 {
    let mut d = target as i32 - current as i32;
    while d > ANGLE_180 as i32 {
        d -= ANGLE_360 as i32;
    }
    while d <= -(ANGLE_180 as i32) {
        d += ANGLE_360 as i32;
    }
    d as i16
}
