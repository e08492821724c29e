//! Persisted byte layouts for the Swath navigation core
//!
//! This crate pins the exact byte-level form of data that leaves the
//! navigation core: recorded perimeters exported to a host, or blobs
//! handed to whatever storage layer the firmware provides. The layouts
//! are contracts: a perimeter recorded by one firmware build must decode
//! on any other.
//!
//! # Perimeter record
//!
//! A closed perimeter of `count` waypoints serializes as the absolute
//! origin followed by `count - 1` relative offsets, all little-endian:
//!
//! ```text
//! ┌──────────┬──────────┬─────────┬─────────┬────
//! │ origin x │ origin y │ dx, dy  │ dx, dy  │ ...
//! │ i32      │ i32      │ i16 i16 │ i16 i16 │
//! └──────────┴──────────┴─────────┴─────────┴────
//! ```
//!
//! Transport framing and integrity checks belong to the layer that moves
//! the bytes; the record itself carries none.

#![no_std]
#![deny(unsafe_code)]

pub mod perimeter;

pub use perimeter::{PathDelta, PerimeterRecord, WireError, DELTA_SIZE, ORIGIN_SIZE};
