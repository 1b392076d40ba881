//! Result types of a layout run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::LonLat;

/// Side of the road relative to its direction of travel (first → last point).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Processing order within a road.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// Turn from the road bearing towards this side, degrees.
    #[inline]
    pub fn turn_deg(&self) -> f64 {
        match self {
            Side::Left => -90.0,
            Side::Right => 90.0,
        }
    }

    #[inline]
    pub fn letter(&self) -> char {
        match self {
            Side::Left => 'L',
            Side::Right => 'R',
        }
    }
}

/// A template instance placed next to a road. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlacedFootprint {
    /// `"{road}-{L|R}-{slot}"`.
    pub id: String,
    pub template_id: String,
    /// Center of the footprint's front edge.
    pub anchor: LonLat,
    /// Compass bearing the front edge faces (towards the road), `[0, 360)`.
    pub orientation_deg: f64,
    pub side: Side,
    /// Closed ring (first point repeated at the end).
    pub world_polygon: Vec<LonLat>,
    pub source_road: usize,
    /// Arc-length position of the anchor along the source road (m).
    pub arc_position_m: f64,
    /// Template width along the road (m).
    pub width_m: f64,
    pub color_tag: String,
}

/// Non-fatal conditions met during a run.
#[derive(Clone, Debug, PartialEq)]
pub enum LayoutWarning {
    InvalidConfig { reason: String },
    TemplateInvalid { template_id: String, reason: String },
    NoUsableTemplates,
    DegenerateCenterline { road: usize, reason: String },
    SlotLimitReached { road: usize, side: Side },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "config rejected: {reason}"),
            Self::TemplateInvalid {
                template_id,
                reason,
            } => write!(f, "template {template_id} skipped: {reason}"),
            Self::NoUsableTemplates => write!(f, "no usable templates"),
            Self::DegenerateCenterline { road, reason } => {
                write!(f, "road {road} skipped: {reason}")
            }
            Self::SlotLimitReached { road, side } => {
                write!(f, "road {road} side {side:?}: slot limit reached")
            }
        }
    }
}

/// Counters for candidates that did not make it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LayoutStats {
    pub candidate_slots: usize,
    pub discarded_by_buffer: usize,
    pub discarded_by_overlap: usize,
}

/// Output of `layout`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    pub placements: Vec<PlacedFootprint>,
    pub warnings: Vec<LayoutWarning>,
    pub stats: LayoutStats,
}

impl Layout {
    /// Placements of one (road, side) in slot order.
    pub fn on(&self, road: usize, side: Side) -> impl Iterator<Item = &PlacedFootprint> + '_ {
        self.placements
            .iter()
            .filter(move |p| p.source_road == road && p.side == side)
    }
}
