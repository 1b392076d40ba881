//! Road model: centerlines, road classes, arc length and collision buffers.
//!
//! - `Centerline`: ordered geographic points plus a `RoadClass` tag.
//! - `ArcTable`: cumulative great-circle lengths with interpolation by arc
//!   length (`station_at`), skipping zero-length segments.
//! - `RoadBuffer`: everything within a class-dependent radius of a centerline,
//!   evaluated in a shared `LocalFrame`.
//!
//! Buffer radii grow with road class (primary ≥ secondary ≥ tertiary ≥ other).

mod arc;
mod buffer;
mod types;

pub use arc::{ArcTable, Station};
pub use buffer::{build_buffers, site_frame, RoadBuffer};
pub use types::{BufferRadii, Centerline, RoadClass};

#[cfg(test)]
mod tests;
