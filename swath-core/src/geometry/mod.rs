//! Integer geometry over millimeter coordinates
//!
//! Scalar vector primitives plus the `Point`/`Bounds` types and
//! segment queries built on them. No trig tables here; everything is
//! exact integer arithmetic except where a function documents its
//! approximation.

pub mod point;
pub mod vector;

pub use point::{angle_between, Bounds, Point};
pub use vector::{
    cross_product, dot_product, integer_sqrt, integer_sqrt64, lerp, normalize_vector,
    vector_length, UNIT_SCALE,
};
