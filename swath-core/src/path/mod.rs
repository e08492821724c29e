//! Perimeter recording and derived mowing rings.

pub mod offset;
pub mod waypoints;

pub use offset::{OffsetError, PathOffsetGenerator, MAX_OFFSET_POINTS};
pub use waypoints::{
    PathError, PointIter, WaypointPath, MAX_WAYPOINTS, ON_PATH_THRESHOLD_MM,
};
