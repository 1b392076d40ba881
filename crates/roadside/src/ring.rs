//! Planar rings and segments in a local metric frame.
//!
//! Purpose
//! - Shared predicates for footprints and road buffers once both live in the
//!   same `LocalFrame` (east/north meters): shoelace area, centroid, segment
//!   intersection and distance, point-in-ring, ring overlap.
//! - `Affine2` places template rings: rotate by a compass bearing, then translate.
//!
//! Conventions
//! - A ring is a slice of vertices; it may or may not repeat the first vertex at
//!   the end. All functions accept both forms (`open` strips the duplicate).
//! - Predicates use `EPS = 1e-9` meters. Inputs are site-sized (meters to a
//!   few kilometers), so no scale normalization is attempted.
//! - Rings are assumed simple; self-intersecting input gives well-defined but
//!   not meaningful answers (use `is_simple` to check).

use nalgebra::{matrix, Matrix2, Vector2};

/// Numerical tolerance for geometric predicates, meters.
pub const EPS: f64 = 1e-9;

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    /// Rotation that carries local +Y onto compass bearing `bearing_deg`
    /// (and local +X onto `bearing_deg + 90`), followed by translation `t`.
    ///
    /// Proper rotation (det = +1): rings keep their winding.
    pub fn compass(bearing_deg: f64, t: Vector2<f64>) -> Self {
        let (s, c) = bearing_deg.to_radians().sin_cos();
        Self {
            m: matrix![c, s; -s, c],
            t,
        }
    }

    /// Composition `self ∘ other`.
    #[inline]
    pub fn compose(&self, other: &Self) -> Self {
        Self {
            m: self.m * other.m,
            t: self.m * other.t + self.t,
        }
    }

    #[inline]
    pub fn apply(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p + self.t
    }
}

/// Vertices without the closing duplicate.
#[inline]
pub fn open(ring: &[Vector2<f64>]) -> &[Vector2<f64>] {
    match ring {
        [first, .., last] if first == last => &ring[..ring.len() - 1],
        _ => ring,
    }
}

/// True if the ring has at least three distinct vertices and ends where it starts.
#[inline]
pub fn is_closed<T: PartialEq>(ring: &[T]) -> bool {
    ring.len() >= 4 && ring.first() == ring.last()
}

/// Append the first vertex if the ring is not already closed.
pub fn close_ring<T: PartialEq + Copy>(ring: &mut Vec<T>) {
    if let (Some(&first), Some(last)) = (ring.first(), ring.last()) {
        if ring.len() == 1 || first != *last {
            ring.push(first);
        }
    }
}

/// Edges `(p_k, p_{k+1})` of the ring including the wrap-around edge.
pub fn edges(ring: &[Vector2<f64>]) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
    let v = open(ring);
    let n = v.len();
    let count = if n >= 2 { n } else { 0 };
    (0..count).map(move |k| (v[k], v[(k + 1) % n]))
}

/// Signed shoelace area; positive for counterclockwise rings.
pub fn signed_area(ring: &[Vector2<f64>]) -> f64 {
    0.5 * edges(ring).map(|(p, q)| p.x * q.y - q.x * p.y).sum::<f64>()
}

/// Area centroid; `None` for rings with (near) zero area.
pub fn area_centroid(ring: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    let verts = open(ring);
    if verts.len() < 3 {
        return None;
    }
    let mut a: f64 = 0.0;
    let mut cx: f64 = 0.0;
    let mut cy: f64 = 0.0;
    for (p, q) in edges(verts) {
        let cross = p.x * q.y - q.x * p.y;
        a += cross;
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
    }
    a *= 0.5;
    if a.abs() < 1e-18 {
        return None;
    }
    Some(Vector2::new(cx / (6.0 * a), cy / (6.0 * a)))
}

/// Axis-aligned bounds `(min, max)`.
pub fn bounds(points: &[Vector2<f64>]) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let first = *points.first()?;
    Some(points.iter().fold((first, first), |(lo, hi), p| {
        (
            Vector2::new(lo.x.min(p.x), lo.y.min(p.y)),
            Vector2::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

#[inline]
fn cross(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> f64 {
    let ab = b - a;
    let ac = c - a;
    ab.x * ac.y - ab.y * ac.x
}

#[inline]
fn orientation(a: Vector2<f64>, b: Vector2<f64>, c: Vector2<f64>) -> i8 {
    let v = cross(a, b, c);
    if v > EPS {
        1
    } else if v < -EPS {
        -1
    } else {
        0
    }
}

#[inline]
fn within_box(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> bool {
    p.x >= a.x.min(b.x) - EPS
        && p.x <= a.x.max(b.x) + EPS
        && p.y >= a.y.min(b.y) - EPS
        && p.y <= a.y.max(b.y) + EPS
}

/// Closed segments `[p1,p2]` and `[q1,q2]` share at least one point (touching counts).
pub fn segments_intersect(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
) -> bool {
    let o1 = orientation(p1, p2, q1);
    let o2 = orientation(p1, p2, q2);
    let o3 = orientation(q1, q2, p1);
    let o4 = orientation(q1, q2, p2);
    if o1 * o2 < 0 && o3 * o4 < 0 {
        return true;
    }
    (o1 == 0 && within_box(q1, p1, p2))
        || (o2 == 0 && within_box(q2, p1, p2))
        || (o3 == 0 && within_box(p1, q1, q2))
        || (o4 == 0 && within_box(p2, q1, q2))
}

/// Proper crossing: the segments intersect at a single interior point of both.
pub fn segments_cross(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
) -> bool {
    orientation(p1, p2, q1) * orientation(p1, p2, q2) < 0
        && orientation(q1, q2, p1) * orientation(q1, q2, p2) < 0
}

/// Distance from `p` to the closed segment `[a,b]` (a point if `a == b`).
pub fn point_segment_distance(p: Vector2<f64>, a: Vector2<f64>, b: Vector2<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.norm_squared();
    if len2 <= EPS * EPS {
        return (p - a).norm();
    }
    let t = ((p - a).dot(&ab) / len2).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

/// Distance between two closed segments (0 if they intersect).
pub fn segment_distance(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    q1: Vector2<f64>,
    q2: Vector2<f64>,
) -> f64 {
    if segments_intersect(p1, p2, q1, q2) {
        return 0.0;
    }
    point_segment_distance(p1, q1, q2)
        .min(point_segment_distance(p2, q1, q2))
        .min(point_segment_distance(q1, p1, p2))
        .min(point_segment_distance(q2, p1, p2))
}

/// Even-odd point-in-ring test. Points on the boundary may go either way.
pub fn contains_point(ring: &[Vector2<f64>], p: Vector2<f64>) -> bool {
    let mut inside = false;
    for (a, b) in edges(ring) {
        if (a.y > p.y) != (b.y > p.y) {
            let x_at = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_at {
                inside = !inside;
            }
        }
    }
    inside
}

/// Distance from `p` to the ring boundary.
pub fn boundary_distance(ring: &[Vector2<f64>], p: Vector2<f64>) -> f64 {
    edges(ring)
        .map(|(a, b)| point_segment_distance(p, a, b))
        .fold(f64::INFINITY, f64::min)
}

#[inline]
fn strictly_inside(ring: &[Vector2<f64>], p: Vector2<f64>) -> bool {
    contains_point(ring, p) && boundary_distance(ring, p) > EPS
}

fn boxes_disjoint(a: &[Vector2<f64>], b: &[Vector2<f64>]) -> bool {
    match (bounds(a), bounds(b)) {
        (Some((alo, ahi)), Some((blo, bhi))) => {
            alo.x > bhi.x + EPS || blo.x > ahi.x + EPS || alo.y > bhi.y + EPS || blo.y > ahi.y + EPS
        }
        _ => true,
    }
}

/// Interiors of two simple rings intersect. Rings that only touch along their
/// boundaries do not overlap.
pub fn rings_overlap(a: &[Vector2<f64>], b: &[Vector2<f64>]) -> bool {
    let (a, b) = (open(a), open(b));
    if a.len() < 3 || b.len() < 3 || boxes_disjoint(a, b) {
        return false;
    }
    for (p1, p2) in edges(a) {
        for (q1, q2) in edges(b) {
            if segments_cross(p1, p2, q1, q2) {
                return true;
            }
        }
    }
    if a.iter().any(|&p| strictly_inside(b, p)) || b.iter().any(|&p| strictly_inside(a, p)) {
        return true;
    }
    // Coincident or nested rings with shared vertices.
    let ca = area_centroid(a);
    let cb = area_centroid(b);
    ca.is_some_and(|c| strictly_inside(b, c)) || cb.is_some_and(|c| strictly_inside(a, c))
}

/// Smallest distance between a ring (as a filled region) and an open polyline.
///
/// Returns 0 when the polyline touches or enters the ring.
pub fn ring_polyline_distance(ring: &[Vector2<f64>], line: &[Vector2<f64>]) -> f64 {
    if open(ring).len() < 3 || line.is_empty() {
        return f64::INFINITY;
    }
    if line.iter().any(|&p| contains_point(ring, p)) {
        return 0.0;
    }
    if line.len() == 1 {
        return boundary_distance(ring, line[0]);
    }
    let mut best = f64::INFINITY;
    for seg in line.windows(2) {
        for (a, b) in edges(ring) {
            let d = segment_distance(seg[0], seg[1], a, b);
            if d <= 0.0 {
                return 0.0;
            }
            best = best.min(d);
        }
    }
    best
}

/// No two non-adjacent edges meet and adjacent edges only share their vertex.
pub fn is_simple(ring: &[Vector2<f64>]) -> bool {
    let v = open(ring);
    let n = v.len();
    if n < 3 {
        return false;
    }
    let es: Vec<_> = edges(v).collect();
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            let (p1, p2) = es[i];
            let (q1, q2) = es[j];
            if adjacent {
                // Folding back onto the previous edge.
                let shared = if j == i + 1 { p2 } else { p1 };
                let other_p = if j == i + 1 { p1 } else { p2 };
                let other_q = if j == i + 1 { q2 } else { q1 };
                if orientation(other_p, shared, other_q) == 0
                    && (other_p - shared).dot(&(other_q - shared)) > 0.0
                {
                    return false;
                }
                continue;
            }
            if segments_intersect(p1, p2, q1, q2) {
                return false;
            }
        }
    }
    true
}
