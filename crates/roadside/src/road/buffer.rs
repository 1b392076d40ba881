//! Collision buffers around centerlines.

use nalgebra::Vector2;

use super::types::{BufferRadii, Centerline, RoadClass};
use crate::geo::{LocalFrame, LonLat};
use crate::ring::{self, close_ring};

/// Region within `radius_m` of a centerline (round caps and joins), in a local frame.
#[derive(Clone, Debug)]
pub struct RoadBuffer {
    /// Index of the source centerline.
    pub road: usize,
    pub class: RoadClass,
    pub radius_m: f64,
    line: Vec<Vector2<f64>>,
}

impl RoadBuffer {
    pub fn new(road: usize, centerline: &Centerline, radius_m: f64, frame: &LocalFrame) -> Self {
        let line = centerline
            .points
            .iter()
            .filter(|p| p.is_finite())
            .map(|p| frame.to_local(*p))
            .collect();
        Self {
            road,
            class: centerline.class,
            radius_m,
            line,
        }
    }

    /// Centerline vertices in the buffer's local frame.
    #[inline]
    pub fn line(&self) -> &[Vector2<f64>] {
        &self.line
    }

    /// True if the filled ring (same local frame) reaches into the buffer.
    /// A ring straddling the centerline always intersects, even for radius 0.
    pub fn intersects(&self, ring_local: &[Vector2<f64>]) -> bool {
        let d = ring::ring_polyline_distance(ring_local, &self.line);
        d <= 0.0 || d < self.radius_m
    }

    /// One closed quad per non-degenerate segment, in degrees. Joins and caps are
    /// not drawn; this is for display only, `intersects` is the exact test.
    pub fn segment_quads(&self, frame: &LocalFrame) -> Vec<Vec<LonLat>> {
        self.line
            .windows(2)
            .filter_map(|w| {
                let dir = w[1] - w[0];
                let len = dir.norm();
                if len <= ring::EPS {
                    return None;
                }
                let n = Vector2::new(-dir.y, dir.x) * (self.radius_m / len);
                let mut quad: Vec<LonLat> = [w[0] + n, w[1] + n, w[1] - n, w[0] - n]
                    .into_iter()
                    .map(|v| frame.to_geo(v))
                    .collect();
                close_ring(&mut quad);
                Some(quad)
            })
            .collect()
    }
}

/// Shared metric frame for a set of centerlines: centered on their bounding box.
pub fn site_frame(centerlines: &[Centerline]) -> LocalFrame {
    let all: Vec<LonLat> = centerlines
        .iter()
        .flat_map(|c| c.points.iter().copied())
        .collect();
    LocalFrame::centered_on(&all).unwrap_or_else(|| LocalFrame::new(LonLat::new(0.0, 0.0)))
}

/// Buffers for every centerline, indexed like the input.
pub fn build_buffers(
    centerlines: &[Centerline],
    radii: &BufferRadii,
    frame: &LocalFrame,
) -> Vec<RoadBuffer> {
    centerlines
        .iter()
        .enumerate()
        .map(|(i, c)| RoadBuffer::new(i, c, radii.radius_for(c.class), frame))
        .collect()
}
