//! Road classes, centerlines and per-class buffer radii.

use serde::{Deserialize, Serialize};

use crate::geo::LonLat;

/// Coarse road hierarchy; selects the collision buffer radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadClass {
    Primary,
    Secondary,
    Tertiary,
    #[default]
    Other,
}

impl RoadClass {
    /// Parse a free-form tag (`"primary"`, `"Secondary_link"`, `"trunk"`, ...).
    /// Unknown tags map to `Other`.
    pub fn from_tag(tag: &str) -> Self {
        let t = tag.trim().to_ascii_lowercase();
        let t = t.strip_suffix("_link").unwrap_or(&t);
        match t {
            "motorway" | "trunk" | "primary" => Self::Primary,
            "secondary" => Self::Secondary,
            "tertiary" => Self::Tertiary,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Other => "other",
        }
    }
}

/// Buffer radius (meters from the centerline) per road class.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferRadii {
    pub primary_m: f64,
    pub secondary_m: f64,
    pub tertiary_m: f64,
    pub other_m: f64,
}

impl Default for BufferRadii {
    fn default() -> Self {
        Self {
            primary_m: 12.0,
            secondary_m: 9.0,
            tertiary_m: 6.0,
            other_m: 4.0,
        }
    }
}

impl BufferRadii {
    #[inline]
    pub fn radius_for(&self, class: RoadClass) -> f64 {
        match class {
            RoadClass::Primary => self.primary_m,
            RoadClass::Secondary => self.secondary_m,
            RoadClass::Tertiary => self.tertiary_m,
            RoadClass::Other => self.other_m,
        }
    }

    /// Finite, non-negative, and non-increasing from primary down to other.
    pub fn is_monotonic(&self) -> bool {
        let r = [self.primary_m, self.secondary_m, self.tertiary_m, self.other_m];
        r.iter().all(|v| v.is_finite() && *v >= 0.0) && r.windows(2).all(|w| w[0] >= w[1])
    }
}

/// Road centerline: ordered points (≥2 to be usable) and a class tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Centerline {
    pub points: Vec<LonLat>,
    #[serde(default)]
    pub class: RoadClass,
}

impl Centerline {
    pub fn new(points: Vec<LonLat>, class: RoadClass) -> Self {
        Self { points, class }
    }
}
