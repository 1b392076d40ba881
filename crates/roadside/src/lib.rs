//! Roadside footprint layout along road centerlines.
//!
//! Given road centerlines (lon/lat polylines with a class tag) and a catalog of
//! footprint templates, `layout::layout` fills both sides of every road with
//! evenly spaced footprints facing the road, keeping each one out of the
//! buffer of every other road.
//!
//! Modules
//! - `geo`: spherical distances, bearings, destinations and a local meter frame.
//! - `ring`: planar ring/segment predicates and the 2D affine map.
//! - `road`: centerlines, arc-length stations and class-dependent buffers.
//! - `template`: footprint outlines and the forgiving catalog loader.
//! - `layout`: slot selection and the placement driver.
//! - `site`: area, perimeter and edge metrics of a drawn boundary.
//! - `geojson`: reading roads/boundaries and writing placements/buffers.
//!
//! API Policy
//! - Internal to this workspace; no stability promise across versions.

pub mod geo;
pub mod geojson;
pub mod layout;
pub mod ring;
pub mod road;
pub mod site;
pub mod template;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for callers that just want to run a layout.
pub mod prelude {
    pub use crate::geo::{LocalFrame, LonLat};
    pub use crate::geojson::{
        boundary_from_geojson, buffers_to_feature_collection, centerlines_from_geojson,
        layout_to_feature_collection, GeoJsonError,
    };
    pub use crate::layout::{layout, Layout, LayoutCfg, LayoutWarning, PlacedFootprint, Side};
    pub use crate::road::{build_buffers, site_frame, BufferRadii, Centerline, RoadClass};
    pub use crate::site::{SiteError, SiteMetrics};
    pub use crate::template::{catalog_from_json, load_catalog, Catalog, FootprintTemplate};
    pub use nalgebra::Vector2 as Vec2;
}
