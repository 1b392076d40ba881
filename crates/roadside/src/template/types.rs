use nalgebra::Vector2;
use std::fmt;

use crate::ring::{self, close_ring};

/// Slack allowed between an outline's bounds and its declared extent (m).
const EXTENT_TOL_M: f64 = 1e-6;

/// Why a template cannot be placed.
#[derive(Clone, Debug, PartialEq)]
pub enum TemplateIssue {
    NonPositiveWidth(f64),
    NonPositiveLength(f64),
    TooFewVertices(usize),
    NonFiniteVertex,
    ZeroArea,
    /// Outline leaves `[-width/2, width/2] × [0, length]`.
    NotNormalized,
}

impl fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveWidth(w) => write!(f, "width must be positive (got {w})"),
            Self::NonPositiveLength(l) => write!(f, "length must be positive (got {l})"),
            Self::TooFewVertices(n) => write!(f, "outline needs at least 3 vertices (got {n})"),
            Self::NonFiniteVertex => write!(f, "outline has a non-finite vertex"),
            Self::ZeroArea => write!(f, "outline encloses no area"),
            Self::NotNormalized => write!(
                f,
                "outline exceeds its declared width/length or is not centered on x = 0 with front at y = 0"
            ),
        }
    }
}

/// Reusable footprint outline with its bounding width (along the road) and length (away from it).
#[derive(Clone, Debug, PartialEq)]
pub struct FootprintTemplate {
    pub id: String,
    pub width: f64,
    pub length: f64,
    /// Closed ring in the template frame.
    pub polygon: Vec<Vector2<f64>>,
    pub color_tag: String,
}

impl FootprintTemplate {
    /// Axis-aligned `width × length` rectangle in the template frame.
    pub fn rectangle(id: impl Into<String>, width: f64, length: f64, color_tag: impl Into<String>) -> Self {
        let hw = 0.5 * width;
        let mut polygon = vec![
            Vector2::new(-hw, 0.0),
            Vector2::new(hw, 0.0),
            Vector2::new(hw, length),
            Vector2::new(-hw, length),
        ];
        close_ring(&mut polygon);
        Self {
            id: id.into(),
            width,
            length,
            polygon,
            color_tag: color_tag.into(),
        }
    }

    /// Normalize an arbitrary outline into the template frame: shift so the
    /// bounding box is centered on `x = 0` and starts at `y = 0`; width and
    /// length come from the bounds. `None` for fewer than 3 vertices or
    /// non-finite input.
    pub fn from_outline(
        id: impl Into<String>,
        outline: &[Vector2<f64>],
        color_tag: impl Into<String>,
    ) -> Option<Self> {
        let verts = ring::open(outline);
        if verts.len() < 3 || verts.iter().any(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return None;
        }
        let (lo, hi) = ring::bounds(verts)?;
        let shift = Vector2::new(0.5 * (lo.x + hi.x), lo.y);
        let mut polygon: Vec<_> = verts.iter().map(|v| v - shift).collect();
        close_ring(&mut polygon);
        Some(Self {
            id: id.into(),
            width: hi.x - lo.x,
            length: hi.y - lo.y,
            polygon,
            color_tag: color_tag.into(),
        })
    }

    /// Placement preconditions: positive finite extent and a real outline.
    pub fn validate(&self) -> Result<(), TemplateIssue> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(TemplateIssue::NonPositiveWidth(self.width));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(TemplateIssue::NonPositiveLength(self.length));
        }
        let verts = ring::open(&self.polygon);
        if verts.len() < 3 {
            return Err(TemplateIssue::TooFewVertices(verts.len()));
        }
        if verts.iter().any(|v| !(v.x.is_finite() && v.y.is_finite())) {
            return Err(TemplateIssue::NonFiniteVertex);
        }
        if ring::signed_area(verts).abs() <= ring::EPS {
            return Err(TemplateIssue::ZeroArea);
        }
        let (lo, hi) = ring::bounds(verts).ok_or(TemplateIssue::TooFewVertices(0))?;
        let hw = 0.5 * self.width;
        if lo.x < -hw - EXTENT_TOL_M
            || hi.x > hw + EXTENT_TOL_M
            || lo.y < -EXTENT_TOL_M
            || hi.y > self.length + EXTENT_TOL_M
        {
            return Err(TemplateIssue::NotNormalized);
        }
        Ok(())
    }
}
