//! Layout parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::road::BufferRadii;

/// Error for parameter sets the engine refuses to run with.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    InvalidConfig { reason: String },
}

impl LayoutError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid layout config: {reason}"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Spacing, offsets and collision settings for `layout`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutCfg {
    /// Edge-to-edge gap between neighbours on the same side, along the road (m).
    #[serde(alias = "edgeSpacingMeters")]
    pub edge_spacing_m: f64,
    /// Distance from the centerline to the footprint's front edge (m).
    #[serde(alias = "roadOffsetMeters")]
    pub road_offset_m: f64,
    /// Kept free at both ends of every centerline (m).
    #[serde(alias = "endClearanceMeters")]
    pub end_clearance_m: f64,
    pub buffer_radii: BufferRadii,
    /// Also reject footprints overlapping an already placed one.
    pub avoid_overlaps: bool,
    /// Upper bound on slots per (road, side); guards near-zero widths.
    pub max_slots_per_side: usize,
}

impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            edge_spacing_m: 5.0,
            road_offset_m: 10.0,
            end_clearance_m: 5.0,
            buffer_radii: BufferRadii::default(),
            avoid_overlaps: true,
            max_slots_per_side: 1024,
        }
    }
}

impl LayoutCfg {
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (name, v) in [
            ("edge_spacing_m", self.edge_spacing_m),
            ("road_offset_m", self.road_offset_m),
            ("end_clearance_m", self.end_clearance_m),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LayoutError::invalid(format!(
                    "{name} must be finite and >= 0 (got {v})"
                )));
            }
        }
        if !self.buffer_radii.is_monotonic() {
            return Err(LayoutError::invalid(
                "buffer radii must be finite, >= 0 and non-increasing from primary to other",
            ));
        }
        if self.max_slots_per_side == 0 {
            return Err(LayoutError::invalid("max_slots_per_side must be > 0"));
        }
        Ok(())
    }
}
