//! Great-circle formulas (haversine distance, bearings, destination).

use super::types::{LonLat, EARTH_RADIUS_M};

/// Normalize a compass bearing into `[0, 360)`.
#[inline]
pub fn normalize_bearing(deg: f64) -> f64 {
    let b = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if b >= 360.0 {
        0.0
    } else {
        b
    }
}

/// Great-circle distance in meters (haversine).
pub fn haversine_m(a: LonLat, b: LonLat) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = phi2 - phi1;
    let dlambda = (b.lon - a.lon).to_radians();
    let h = (dphi * 0.5).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda * 0.5).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Initial great-circle bearing from `a` towards `b`, compass degrees.
///
/// Coincident points give 0.
pub fn initial_bearing_deg(a: LonLat, b: LonLat) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dlambda = (b.lon - a.lon).to_radians();
    let y = dlambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dlambda.cos();
    normalize_bearing(y.atan2(x).to_degrees())
}

/// Point reached from `p` after `distance_m` along the great circle with the given initial bearing.
pub fn destination(p: LonLat, bearing_deg: f64, distance_m: f64) -> LonLat {
    let delta = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let phi1 = p.lat.to_radians();
    let lambda1 = p.lon.to_radians();
    let sin_phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos()).clamp(-1.0, 1.0);
    let phi2 = sin_phi2.asin();
    let lambda2 = lambda1
        + (theta.sin() * delta.sin() * phi1.cos()).atan2(delta.cos() - phi1.sin() * sin_phi2);
    let lon = (lambda2.to_degrees() + 540.0).rem_euclid(360.0) - 180.0;
    LonLat::new(lon, phi2.to_degrees())
}
