//! Bridge between application angle units and the engine trig domain
//!
//! Application code thinks in tenths of a degree (wrap 3600) and a
//! ×1000 output scale; the trig tables think in 16384 counts per turn
//! and a ×8192 output scale. Both directions convert with one multiply
//! and one shift; the multipliers below are calibrated so round trips
//! land within ±1 tenth.

use crate::trig::{self, TABLES};

use super::units::normalize;

/// 16384/3600 in Q10.
const TO_ENGINE_MUL: u32 = 4660;

/// 3600/16384 in Q10; the ratio is exact.
const FROM_ENGINE_MUL: u32 = 225;

/// 1000/8192 in Q10; the ratio is exact.
const OUTPUT_MUL: i32 = 125;

/// Largest component magnitude the engine primitives accept directly.
const NATIVE_RANGE: u32 = 32767;

/// Application angle (tenths of a degree) to engine counts, `[0, 16384)`.
pub fn to_engine(angle: i16) -> u16 {
    let normalized = normalize(angle) as u32;
    ((normalized * TO_ENGINE_MUL) >> 10) as u16
}

/// Engine counts back to tenths of a degree, `[0, 3600)`.
pub fn from_engine(angle: u16) -> i16 {
    let wrapped = (angle & (trig::ANGLE_MAX - 1)) as u32;
    ((wrapped * FROM_ENGINE_MUL) >> 10) as i16
}

/// Sine of an application angle, scaled to ±1000.
pub fn sin(angle: i16) -> i16 {
    rescale_output(TABLES.sin(to_engine(angle)))
}

/// Cosine of an application angle, scaled to ±1000. `cos(0)` is
/// exactly 1000.
pub fn cos(angle: i16) -> i16 {
    rescale_output(TABLES.cos(to_engine(angle)))
}

/// Angle of the vector `(x, y)` in tenths of a degree, `[0, 3600)`.
///
/// Wide components are halved in lock step until both fit the engine's
/// native range; the ratio, and so the angle, is preserved.
/// `atan2(0, 0)` returns 0.
pub fn atan2(y: i32, x: i32) -> i16 {
    let mut y = y;
    let mut x = x;
    while y.unsigned_abs() > NATIVE_RANGE || x.unsigned_abs() > NATIVE_RANGE {
        y >>= 1;
        x >>= 1;
    }
    from_engine(TABLES.atan2(y as i16, x as i16))
}

/// Euclidean length of `(x, y)` for components of any `i32` size.
///
/// Halves both components in lock step until they fit the engine's
/// native range, runs the CORDIC reduction, then shifts the result
/// back up.
pub fn magnitude(x: i32, y: i32) -> i32 {
    let mut x = x;
    let mut y = y;
    let mut shift = 0;
    while x.unsigned_abs() > NATIVE_RANGE || y.unsigned_abs() > NATIVE_RANGE {
        x >>= 1;
        y >>= 1;
        shift += 1;
    }
    let reduced = trig::magnitude(x, y) as i64;
    (reduced << shift).min(i32::MAX as i64) as i32
}

fn rescale_output(value: i16) -> i16 {
    ((value as i32 * OUTPUT_MUL) >> 10) as i16
}
