//! Roadside footprint layout.
//!
//! Purpose
//! - Fill both sides of every road centerline with footprint templates:
//!   greedy, evenly spaced, offset from the centerline, oriented to face it,
//!   and kept off every other road's buffer.
//!
//! Model
//! - Per (road, side): usable length = total − 2·clearance; draw templates
//!   from the injected RNG until none fits `Σ width + (n−1)·spacing <= usable`
//!   (a misfit is redrawn among those that still fit); assign
//!   running arc positions from `clearance`; place each footprint centered on
//!   its slot; drop candidates that hit another road's buffer (or an earlier
//!   footprint when `avoid_overlaps` is on). Slots are never renumbered.
//! - Pure: same inputs and same RNG state give the same `Layout`.
//!
//! Code cross-refs: `road::{ArcTable,RoadBuffer}`, `template::FootprintTemplate`,
//! `geo::LocalFrame`, `ring::Affine2`.

mod config;
mod engine;
mod select;
mod types;

pub use config::{LayoutCfg, LayoutError};
pub use engine::layout;
pub use select::{select_slots, Selection, Slot};
pub use types::{Layout, LayoutStats, LayoutWarning, PlacedFootprint, Side};
