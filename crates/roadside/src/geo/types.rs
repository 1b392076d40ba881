//! Coordinate types and the meters↔degrees conversion frame.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Mean Earth radius (IUGG), meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Smallest cosine used when scaling longitudes; keeps frames near the poles finite.
const MIN_COS_LAT: f64 = 1e-6;

/// Geographic point in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }

    #[inline]
    pub fn to_array(self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl From<[f64; 2]> for LonLat {
    #[inline]
    fn from(a: [f64; 2]) -> Self {
        Self::new(a[0], a[1])
    }
}

/// Equirectangular tangent frame around `origin`.
///
/// Maps degrees to east/north meters with a fixed scale taken at the origin
/// latitude. Accurate to well under a meter over a few kilometers, which is
/// the size of a site.
#[derive(Clone, Copy, Debug)]
pub struct LocalFrame {
    origin: LonLat,
    m_per_deg_lon: f64,
    m_per_deg_lat: f64,
}

impl LocalFrame {
    pub fn new(origin: LonLat) -> Self {
        let m_per_deg_lat = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        let cos_lat = origin.lat.to_radians().cos().abs().max(MIN_COS_LAT);
        Self {
            origin,
            m_per_deg_lon: m_per_deg_lat * cos_lat,
            m_per_deg_lat,
        }
    }

    /// Frame centered on the bounding box of `points`; `None` for an empty or non-finite set.
    pub fn centered_on(points: &[LonLat]) -> Option<Self> {
        let mut lo = LonLat::new(f64::INFINITY, f64::INFINITY);
        let mut hi = LonLat::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in points.iter().filter(|p| p.is_finite()) {
            lo.lon = lo.lon.min(p.lon);
            lo.lat = lo.lat.min(p.lat);
            hi.lon = hi.lon.max(p.lon);
            hi.lat = hi.lat.max(p.lat);
        }
        if !(lo.is_finite() && hi.is_finite()) {
            return None;
        }
        Some(Self::new(LonLat::new(
            0.5 * (lo.lon + hi.lon),
            0.5 * (lo.lat + hi.lat),
        )))
    }

    #[inline]
    pub fn origin(&self) -> LonLat {
        self.origin
    }

    /// Meters per degree of (longitude, latitude) at the origin.
    #[inline]
    pub fn meters_per_degree(&self) -> (f64, f64) {
        (self.m_per_deg_lon, self.m_per_deg_lat)
    }

    /// Degrees → local east/north meters.
    #[inline]
    pub fn to_local(&self, p: LonLat) -> Vector2<f64> {
        let dlon = wrap_lon_delta(p.lon - self.origin.lon);
        Vector2::new(
            dlon * self.m_per_deg_lon,
            (p.lat - self.origin.lat) * self.m_per_deg_lat,
        )
    }

    /// Local east/north meters → degrees.
    #[inline]
    pub fn to_geo(&self, v: Vector2<f64>) -> LonLat {
        LonLat::new(
            self.origin.lon + v.x / self.m_per_deg_lon,
            self.origin.lat + v.y / self.m_per_deg_lat,
        )
    }
}

#[inline]
fn wrap_lon_delta(d: f64) -> f64 {
    (d + 180.0).rem_euclid(360.0) - 180.0
}
