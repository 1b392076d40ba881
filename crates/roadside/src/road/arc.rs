//! Arc-length parameterization of a centerline.

use crate::geo::{destination, haversine_m, initial_bearing_deg, normalize_bearing, LonLat};

/// Segments shorter than this are treated as coincident points.
const ZERO_SEGMENT_M: f64 = 1e-6;

/// Point and travel direction at an arc-length position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Station {
    pub point: LonLat,
    pub bearing_deg: f64,
    /// Index of the segment `(k, k+1)` containing the station.
    pub segment: usize,
}

/// Cumulative great-circle lengths along a polyline.
#[derive(Clone, Debug)]
pub struct ArcTable<'a> {
    points: &'a [LonLat],
    cum: Vec<f64>,
}

impl<'a> ArcTable<'a> {
    pub fn new(points: &'a [LonLat]) -> Self {
        let mut cum = Vec::with_capacity(points.len());
        let mut acc = 0.0;
        for (k, p) in points.iter().enumerate() {
            if k > 0 {
                acc += haversine_m(points[k - 1], *p);
            }
            cum.push(acc);
        }
        Self { points, cum }
    }

    /// Total length in meters (0 for fewer than two points).
    #[inline]
    pub fn total_m(&self) -> f64 {
        self.cum.last().copied().unwrap_or(0.0)
    }

    /// Cumulative length at each vertex.
    #[inline]
    pub fn cumulative(&self) -> &[f64] {
        &self.cum
    }

    #[inline]
    fn segment_len(&self, k: usize) -> f64 {
        self.cum[k + 1] - self.cum[k]
    }

    /// Interpolate position and bearing at arc length `s` (clamped to `[0, total]`).
    ///
    /// Zero-length segments are skipped, so the bearing always comes from a real
    /// segment: the first non-zero segment whose end lies at or beyond `s`.
    /// Returns `None` if the polyline has no segment of non-zero length.
    pub fn station_at(&self, s: f64) -> Option<Station> {
        if self.points.len() < 2 {
            return None;
        }
        let s = s.clamp(0.0, self.total_m());
        let mut chosen = None;
        let mut last_real = None;
        for k in 0..self.points.len() - 1 {
            if self.segment_len(k) <= ZERO_SEGMENT_M {
                continue;
            }
            last_real = Some(k);
            if s <= self.cum[k + 1] {
                chosen = Some(k);
                break;
            }
        }
        let k = chosen.or(last_real)?;
        let a = self.points[k];
        let b = self.points[k + 1];
        let len = self.segment_len(k);
        let local = (s - self.cum[k]).clamp(0.0, len);
        let point = destination(a, initial_bearing_deg(a, b), local);
        // Great-circle bearings drift along a segment; take the one at the station.
        let bearing_deg = if len - local > ZERO_SEGMENT_M {
            initial_bearing_deg(point, b)
        } else {
            normalize_bearing(initial_bearing_deg(b, a) + 180.0)
        };
        Some(Station {
            point,
            bearing_deg,
            segment: k,
        })
    }
}
