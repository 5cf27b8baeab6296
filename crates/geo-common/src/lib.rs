//! Geographic primitives shared across the mapraster workspace.

pub mod bbox;
pub mod crs;
pub mod longitude;

pub use bbox::BoundingBox;
pub use crs::{CrsCode, CrsParseError};
pub use longitude::{normalize_longitude, ring_crosses_antimeridian, to_lon180};
