//! Board-agnostic navigation geometry for the mower firmware
//!
//! This crate contains all navigation logic that does not depend on
//! specific hardware implementations:
//!
//! - Fixed-point trigonometry (table-driven sine, atan2, asin)
//! - Integer vector and point geometry
//! - Angle unit conversions between engine and application domains
//! - Perimeter path storage and inward offset generation
//! - Line-pursuit steering controller
//! - Hardware abstraction traits (pose source, drive actuator)
//! - Tuning parameter storage with integrity checks
//!
//! Everything here is integer-only. No float instruction is ever
//! emitted, so the crate runs at full speed on cores without an FPU.

#![no_std]
#![deny(unsafe_code)]

pub mod angle;
pub mod config;
pub mod geometry;
pub mod path;
pub mod pursuit;
pub mod traits;
pub mod trig;
