//! Geographic primitives on a spherical Earth.
//!
//! Purpose
//! - Great-circle distance, bearings and destination points for road
//!   centerlines given as longitude/latitude pairs.
//! - A small equirectangular `LocalFrame` that converts between degrees and
//!   meters around a reference point. Every step that works in meters
//!   (offsetting, footprint transforms, collision tests) goes through it.
//!
//! Conventions
//! - Coordinates are WGS84 degrees, `lon` first (GeoJSON order).
//! - Bearings are compass degrees in `[0, 360)`: 0 = north, 90 = east.
//! - Local frames are east/north meters (`x` = east, `y` = north).

mod sphere;
mod types;

pub use sphere::{destination, haversine_m, initial_bearing_deg, normalize_bearing};
pub use types::{LocalFrame, LonLat, EARTH_RADIUS_M};
