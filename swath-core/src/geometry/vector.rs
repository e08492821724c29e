//! Scalar vector math over millimeter-scaled integers
//!
//! Unit vectors carry a scale of [`UNIT_SCALE`] so direction survives
//! integer arithmetic. Every function is pure and divisions truncate
//! toward zero.

/// Length of a unit vector after [`normalize_vector`].
pub const UNIT_SCALE: i32 = 1000;

/// `floor(sqrt(n))` by the bit-pair method. `n <= 0` returns 0.
pub fn integer_sqrt(n: i32) -> i32 {
    if n <= 0 {
        return 0;
    }
    let mut n = n;
    let mut result = 0;
    let mut bit = 1i32 << 30;

    while bit > n {
        bit >>= 2;
    }
    while bit != 0 {
        if n >= result + bit {
            n -= result + bit;
            result = (result >> 1) + bit;
        } else {
            result >>= 1;
        }
        bit >>= 2;
    }
    result
}

/// 64-bit companion of [`integer_sqrt`] for squared distances.
pub fn integer_sqrt64(n: i64) -> i64 {
    if n <= 0 {
        return 0;
    }
    let mut n = n;
    let mut result = 0;
    let mut bit = 1i64 << 62;

    while bit > n {
        bit >>= 2;
    }
    while bit != 0 {
        if n >= result + bit {
            n -= result + bit;
            result = (result >> 1) + bit;
        } else {
            result >>= 1;
        }
        bit >>= 2;
    }
    result
}

/// Euclidean length of `(x, y)`.
///
/// Components beyond ±32767 are halved before squaring and the result
/// doubled, trading the low bit of accuracy for freedom from overflow.
pub fn vector_length(x: i32, y: i32) -> i32 {
    if x.abs() > 32767 || y.abs() > 32767 {
        let hx = (x >> 1) as i64;
        let hy = (y >> 1) as i64;
        let doubled = 2 * integer_sqrt64(hx * hx + hy * hy);
        return doubled.min(i32::MAX as i64) as i32;
    }
    integer_sqrt(x * x + y * y)
}

/// Scales `(x, y)` so its length becomes [`UNIT_SCALE`]. Zero vectors
/// stay zero.
pub fn normalize_vector(x: i32, y: i32) -> (i32, i32) {
    let len = vector_length(x, y);
    if len == 0 {
        return (0, 0);
    }
    let nx = (x as i64 * UNIT_SCALE as i64 / len as i64) as i32;
    let ny = (y as i64 * UNIT_SCALE as i64 / len as i64) as i32;
    (nx, ny)
}

/// Dot product of two vectors already at unit scale; the result is
/// divided back down so it stays at unit scale (1000 = parallel).
pub fn dot_product(x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
    ((x1 as i64 * x2 as i64 + y1 as i64 * y2 as i64) / UNIT_SCALE as i64) as i32
}

/// Z component of the cross product of two unit-scale vectors, divided
/// back down to unit scale. Positive when `(x2, y2)` lies
/// counter-clockwise of `(x1, y1)`.
pub fn cross_product(x1: i32, y1: i32, x2: i32, y2: i32) -> i32 {
    ((x1 as i64 * y2 as i64 - y1 as i64 * x2 as i64) / UNIT_SCALE as i64) as i32
}

/// Linear interpolation from `a` to `b` with `t` in thousandths.
pub fn lerp(a: i32, b: i32, t: i32) -> i32 {
    (a as i64 + (b as i64 - a as i64) * t as i64 / 1000) as i32
}
