//! Hardware abstraction traits
//!
//! Board-agnostic capability traits the navigation core consumes and
//! produces to. Firmware implements these against the real sensors
//! and motor drivers; tests implement them with mocks.

pub mod drive;
pub mod pose;

pub use drive::{DriveActuator, DriveError, HALF_SPEED, MAX_SPEED};
pub use pose::{PoseError, PoseSource};
