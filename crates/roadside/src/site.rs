//! Site boundary metrics: area, perimeter, edge lengths and bearings.

use serde::Serialize;
use std::fmt;

use crate::geo::{haversine_m, initial_bearing_deg, LocalFrame, LonLat};
use crate::ring;

#[derive(Debug, Clone, PartialEq)]
pub enum SiteError {
    TooFewPoints(usize),
    NonFinite,
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPoints(n) => write!(f, "boundary needs 3 distinct points (got {n})"),
            Self::NonFinite => write!(f, "boundary has a non-finite coordinate"),
        }
    }
}

impl std::error::Error for SiteError {}

/// One boundary edge.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EdgeMetrics {
    pub from: LonLat,
    pub to: LonLat,
    pub length_m: f64,
    pub bearing_deg: f64,
}

/// Derived values of a drawn site boundary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteMetrics {
    pub area_m2: f64,
    pub perimeter_m: f64,
    pub edges: Vec<EdgeMetrics>,
}

impl SiteMetrics {
    /// Boundary may be open or closed; consecutive duplicates are ignored.
    /// Area is unsigned (either winding).
    pub fn from_boundary(points: &[LonLat]) -> Result<Self, SiteError> {
        if points.iter().any(|p| !p.is_finite()) {
            return Err(SiteError::NonFinite);
        }
        let mut verts: Vec<LonLat> = Vec::with_capacity(points.len());
        for p in points {
            if verts.last() != Some(p) {
                verts.push(*p);
            }
        }
        if verts.len() > 1 && verts.first() == verts.last() {
            verts.pop();
        }
        if verts.len() < 3 {
            return Err(SiteError::TooFewPoints(verts.len()));
        }
        let frame = LocalFrame::centered_on(&verts).ok_or(SiteError::NonFinite)?;
        let local: Vec<_> = verts.iter().map(|p| frame.to_local(*p)).collect();
        let edges: Vec<EdgeMetrics> = (0..verts.len())
            .map(|k| {
                let from = verts[k];
                let to = verts[(k + 1) % verts.len()];
                EdgeMetrics {
                    from,
                    to,
                    length_m: haversine_m(from, to),
                    bearing_deg: initial_bearing_deg(from, to),
                }
            })
            .collect();
        Ok(Self {
            area_m2: ring::signed_area(&local).abs(),
            perimeter_m: edges.iter().map(|e| e.length_m).sum(),
            edges,
        })
    }
}
