//! Compile-time builders for the trig lookup tables
//!
//! Everything here runs in const evaluation. The firmware image carries
//! the finished tables in read-only memory; no table is ever computed at
//! runtime.

pub(super) const SIN_TABLE_SIZE: usize = 128;
pub(super) const ATAN_TABLE_SIZE: usize = 128;
pub(super) const ASIN_TABLE_SIZE: usize = 128;

/// Arctangent of 2^-k for k = 0.., in engine angle counts (2048 = 45°).
/// The last two steps both round to 1 count.
const ATAN_STEPS: [i32; 13] = [2048, 1209, 639, 324, 163, 81, 41, 20, 10, 5, 3, 1, 1];

/// Bhaskara I's sine approximation over the half wave.
///
/// `x` spans `[0, 16384]` mapping `[0°, 180°]`; the result spans
/// `[0, 8192]`. Worst-case error against the true sine is about 0.16%.
const fn bhaskara_sine(x: i32) -> i32 {
    let t = (x * (16384 - x)) >> 14;
    (4 * t * 8192) / (20480 - t)
}

/// Quarter-wave sine table: entry `i` holds `sin(i/127 · 90°)` at scale
/// 8192. Entry 0 is 0 and entry 127 is exactly 8192.
pub(super) const fn sine_quarter_table() -> [i16; SIN_TABLE_SIZE] {
    let mut table = [0i16; SIN_TABLE_SIZE];
    let mut i = 0;
    while i < SIN_TABLE_SIZE {
        let x = (i as i32 * 8192) / (SIN_TABLE_SIZE as i32 - 1);
        table[i] = bhaskara_sine(x) as i16;
        i += 1;
    }
    table
}

/// Arctangent table: entry `i` holds `atan(i/128)` in engine counts,
/// so the range is `[0, 2048]`. One sentinel entry past the end makes
/// the 45° ratio an exact lookup instead of a wrap.
///
/// Each entry is computed by CORDIC vectoring: rotate `(16384, y)` onto
/// the x axis in shift-and-add steps, accumulating the known step
/// angles. Endpoints are pinned so the octant seams are exact.
pub(super) const fn arctan_table() -> [u16; ATAN_TABLE_SIZE + 1] {
    let mut table = [0u16; ATAN_TABLE_SIZE + 1];
    let mut i = 1;
    while i < ATAN_TABLE_SIZE {
        let mut x: i32 = 16384;
        let mut y: i32 = (i as i32 * 16384) / ATAN_TABLE_SIZE as i32;
        let mut angle: i32 = 0;

        let mut k = 0;
        while k < ATAN_STEPS.len() {
            let x_new;
            let y_new;
            if y > 0 {
                x_new = x + (y >> k);
                y_new = y - (x >> k);
                angle += ATAN_STEPS[k];
            } else {
                x_new = x - (y >> k);
                y_new = y + (x >> k);
                angle -= ATAN_STEPS[k];
            }
            x = x_new;
            y = y_new;
            k += 1;
        }

        if angle < 0 {
            angle = 0;
        }
        if angle > 2048 {
            angle = 2048;
        }
        table[i] = angle as u16;
        i += 1;
    }
    table[0] = 0;
    table[ATAN_TABLE_SIZE] = 2048;
    table
}

/// Arcsine table: entry `i` holds the angle in `[0, 4096]` whose sine
/// is `i/128 · 8192`, found by binary search over the sine
/// approximation. One sentinel entry past the end pins `asin(8192)` to
/// exactly a quarter turn.
pub(super) const fn arcsine_table() -> [u16; ASIN_TABLE_SIZE + 1] {
    let mut table = [0u16; ASIN_TABLE_SIZE + 1];
    let mut i = 0;
    while i < ASIN_TABLE_SIZE {
        let target = (i as i32 * 8192) / ASIN_TABLE_SIZE as i32;

        // Engine angles; 4096 is a quarter turn, sine domain is doubled
        let mut low: i32 = 0;
        let mut high: i32 = 4096;
        while high - low > 1 {
            let mid = (low + high) / 2;
            if bhaskara_sine(2 * mid) < target {
                low = mid;
            } else {
                high = mid;
            }
        }
        table[i] = ((low + high) / 2) as u16;
        i += 1;
    }
    table[ASIN_TABLE_SIZE] = 4096;
    table
}
