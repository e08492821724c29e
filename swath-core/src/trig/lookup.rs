//! Table lookups with linear interpolation, plus the table-free
//! magnitude and square-root primitives

use super::tables::{
    arcsine_table, arctan_table, sine_quarter_table, ASIN_TABLE_SIZE, ATAN_TABLE_SIZE,
    SIN_TABLE_SIZE,
};
use super::{ANGLE_MAX, OUTPUT_SCALE};

const ANGLE_MASK: u16 = ANGLE_MAX - 1;

/// Maps an in-quadrant position (0..=4096) to table index + fraction.
const SIN_RECIPROCAL: u32 = (((SIN_TABLE_SIZE - 1) as u32) << 16) / 4096;

/// Maps a sine value (0..=8192) to table index + fraction.
const ASIN_RECIPROCAL: u32 = ((ASIN_TABLE_SIZE as u32) << 16) / 8192;

/// log2 of the arctangent table size.
const ATAN_TABLE_BITS: u32 = 7;

/// Reciprocal of the accumulated CORDIC rotation gain, in Q16.
const CORDIC_GAIN: i64 = 39_797;

const MAGNITUDE_ITERATIONS: u32 = 12;

/// The three lookup tables, built in const evaluation.
pub struct TrigTables {
    sine: [i16; SIN_TABLE_SIZE],
    atan: [u16; ATAN_TABLE_SIZE + 1],
    asin: [u16; ASIN_TABLE_SIZE + 1],
}

/// Shared instance. The arrays live in read-only memory.
pub static TABLES: TrigTables = TrigTables::new();

impl TrigTables {
    pub const fn new() -> Self {
        Self {
            sine: sine_quarter_table(),
            atan: arctan_table(),
            asin: arcsine_table(),
        }
    }

    /// Sine of an engine angle, scaled to `[-8192, 8192]`.
    ///
    /// The angle wraps at 16384 counts per turn, so any `u16` input is
    /// valid. `sin(4096)` is exactly 8192.
    pub fn sin(&self, angle: u16) -> i16 {
        let a = angle & ANGLE_MASK;
        let quadrant = a >> 12;
        let mut position = (a & 0x0FFF) as u32;

        // Odd quadrants run the quarter wave backwards
        if quadrant & 1 != 0 {
            position = 0x1000 - position;
        }

        let scaled = position * SIN_RECIPROCAL;
        let index = ((scaled >> 16) as usize).min(SIN_TABLE_SIZE - 1);
        let fraction = ((scaled >> 8) & 0xFF) as i32;

        // Neighbor clamps at the table end; wrapping would fold the
        // 90° seam back to zero
        let y0 = self.sine[index] as i32;
        let y1 = self.sine[(index + 1).min(SIN_TABLE_SIZE - 1)] as i32;
        let value = (y0 + (((y1 - y0) * fraction) >> 8)) as i16;

        if quadrant >= 2 {
            -value
        } else {
            value
        }
    }

    /// Cosine as a quarter-turn phase lead over [`Self::sin`].
    pub fn cos(&self, angle: u16) -> i16 {
        self.sin(angle.wrapping_add(ANGLE_MAX / 4))
    }

    /// Angle of the vector `(x, y)` in `[0, 16384)` counts.
    ///
    /// One integer division per call; the octant is folded onto the
    /// arctangent table and unfolded through a quadrant offset/sign
    /// pair. `atan2(0, 0)` returns 0 by convention. Callers with
    /// coordinates wider than `i16` pre-scale them (see the angle
    /// adapter).
    pub fn atan2(&self, y: i16, x: i16) -> u16 {
        if x == 0 {
            return if y > 0 {
                ANGLE_MAX / 4
            } else if y < 0 {
                ANGLE_MAX / 4 * 3
            } else {
                0
            };
        }

        let abs_x = (x as i32).unsigned_abs();
        let abs_y = (y as i32).unsigned_abs();
        let quadrant = (((x < 0) as usize) << 1) | ((y < 0) as usize);

        let angle = if abs_x >= abs_y {
            let ratio = (abs_y << (ATAN_TABLE_BITS + 8)) / abs_x;
            self.atan_lookup(ratio) as i32
        } else {
            let ratio = (abs_x << (ATAN_TABLE_BITS + 8)) / abs_y;
            (ANGLE_MAX as i32) / 4 - self.atan_lookup(ratio) as i32
        };

        const QUADRANT_OFFSET: [i32; 4] = [0, 16384, 8192, 8192];
        const QUADRANT_SIGN: [i32; 4] = [1, -1, -1, 1];

        let composed = QUADRANT_OFFSET[quadrant] + QUADRANT_SIGN[quadrant] * angle;
        (composed as u16) & ANGLE_MASK
    }

    /// Arcsine of a value in `[-8192, 8192]`, returned in `[0, 16384)`
    /// counts: `[0, 4096]` for non-negative inputs, mirrored into
    /// `[12288, 16384)` for negative ones.
    ///
    /// Out-of-range inputs clamp. `asin(8192)` is exactly 4096 and
    /// `asin(-8192)` exactly 12288.
    pub fn asin(&self, value: i16) -> u16 {
        let abs = (value as i32).unsigned_abs().min(OUTPUT_SCALE as u32);

        let scaled = abs * ASIN_RECIPROCAL;
        let index = (scaled >> 16) as usize;
        let fraction = ((scaled >> 8) & 0xFF) as i32;

        let y0 = self.asin[index] as i32;
        let y1 = self.asin[(index + 1).min(ASIN_TABLE_SIZE)] as i32;
        let angle = (y0 + (((y1 - y0) * fraction) >> 8)) as u16;

        if value < 0 {
            (ANGLE_MAX - angle) & ANGLE_MASK
        } else {
            angle
        }
    }

    /// Interpolated read of `atan[ratio]` where `ratio` carries 7 index
    /// bits and 8 fraction bits. The sentinel entry absorbs the exact
    /// 45° ratio.
    fn atan_lookup(&self, ratio: u32) -> u16 {
        let index = (ratio >> 8) as usize;
        let fraction = (ratio & 0xFF) as i32;

        let y0 = self.atan[index] as i32;
        let y1 = self.atan[(index + 1).min(ATAN_TABLE_SIZE)] as i32;
        (y0 + (((y1 - y0) * fraction) >> 8)) as u16
    }
}

/// Euclidean length of `(x, y)` by CORDIC vectoring: twelve
/// shift-and-add rotations drive the vector onto the x axis, then one
/// multiply compensates the accumulated rotation gain.
///
/// Accurate to about ±1 part in 1000 for components within `i16`
/// range; wider vectors should be pre-scaled (see the angle adapter).
pub fn magnitude(x: i32, y: i32) -> u32 {
    let mut mx = (x as i64).abs();
    let mut my = (y as i64).abs();

    for i in 0..MAGNITUDE_ITERATIONS {
        let x_shift = mx >> i;
        let y_shift = my >> i;

        // y stays signed: every iteration rotates, so the gain the
        // final multiply undoes is the same for every input
        if my >= 0 {
            mx += y_shift;
            my -= x_shift;
        } else {
            mx -= y_shift;
            my += x_shift;
        }
    }

    ((mx * CORDIC_GAIN) >> 16) as u32
}

/// `floor(sqrt(x))` by binary search. No division, no floating point.
pub fn fast_sqrt(x: u32) -> u32 {
    if x < 2 {
        return x;
    }

    let mut start: u32 = 1;
    let mut end: u32 = (x >> 1) + 1;
    let mut result: u32 = 0;

    while start <= end {
        let mid = (start + end) >> 1;
        let square = (mid as u64) * (mid as u64);

        if square == x as u64 {
            return mid;
        }
        if square < x as u64 {
            result = mid;
            start = mid + 1;
        } else {
            end = mid - 1;
        }
    }
    result
}
