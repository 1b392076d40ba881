use super::*;
use crate::geo::{destination, haversine_m, LocalFrame, LonLat};
use crate::ring::is_closed;
use nalgebra::vector;

fn east_line(len_m: f64) -> Vec<LonLat> {
    let a = LonLat::new(8.0, 47.0);
    vec![a, destination(a, 90.0, len_m)]
}

#[test]
fn class_tags_parse() {
    assert_eq!(RoadClass::from_tag("primary"), RoadClass::Primary);
    assert_eq!(RoadClass::from_tag(" Trunk "), RoadClass::Primary);
    assert_eq!(RoadClass::from_tag("secondary_link"), RoadClass::Secondary);
    assert_eq!(RoadClass::from_tag("TERTIARY"), RoadClass::Tertiary);
    assert_eq!(RoadClass::from_tag("residential"), RoadClass::Other);
    assert_eq!(RoadClass::from_tag(""), RoadClass::Other);
    assert_eq!(RoadClass::Secondary.as_str(), "secondary");
}

#[test]
fn default_radii_are_monotonic() {
    let r = BufferRadii::default();
    assert!(r.is_monotonic());
    assert!(r.radius_for(RoadClass::Primary) > r.radius_for(RoadClass::Secondary));
    assert!(r.radius_for(RoadClass::Secondary) > r.radius_for(RoadClass::Tertiary));
    assert!(r.radius_for(RoadClass::Tertiary) > r.radius_for(RoadClass::Other));
    let bad = BufferRadii {
        tertiary_m: 20.0,
        ..r
    };
    assert!(!bad.is_monotonic());
}

#[test]
fn arc_table_totals_and_interpolates() {
    let pts = east_line(100.0);
    let arc = ArcTable::new(&pts);
    assert!((arc.total_m() - 100.0).abs() < 1e-6);
    let st = arc.station_at(40.0).unwrap();
    assert!((haversine_m(pts[0], st.point) - 40.0).abs() < 1e-6);
    assert!((st.bearing_deg - 90.0).abs() < 1e-2);
    // Clamped past the end.
    let end = arc.station_at(500.0).unwrap();
    assert!(haversine_m(end.point, pts[1]) < 1e-6);
    assert!((end.bearing_deg - 90.0).abs() < 1e-2);
}

#[test]
fn zero_length_segments_are_skipped() {
    let a = LonLat::new(8.0, 47.0);
    let b = destination(a, 0.0, 50.0);
    let c = destination(b, 90.0, 50.0);
    // a, a (dup), b, b (dup), c
    let pts = vec![a, a, b, b, c];
    let arc = ArcTable::new(&pts);
    assert!((arc.total_m() - 100.0).abs() < 1e-6);
    let start = arc.station_at(0.0).unwrap();
    assert_eq!(start.segment, 1);
    assert!(start.bearing_deg < 1e-2 || start.bearing_deg > 360.0 - 1e-2);
    let past_corner = arc.station_at(60.0).unwrap();
    assert_eq!(past_corner.segment, 3);
    assert!((past_corner.bearing_deg - 90.0).abs() < 1e-2);
}

#[test]
fn degenerate_polylines_have_no_stations() {
    let a = LonLat::new(0.0, 0.0);
    assert!(ArcTable::new(&[a]).station_at(0.0).is_none());
    assert!(ArcTable::new(&[a, a, a]).station_at(0.0).is_none());
    assert_eq!(ArcTable::new(&[]).total_m(), 0.0);
}

#[test]
fn buffer_intersection_uses_class_radius() {
    let pts = east_line(100.0);
    let frame = LocalFrame::new(pts[0]);
    let road = Centerline::new(pts, RoadClass::Primary);
    let buffers = build_buffers(&[road], &BufferRadii::default(), &frame);
    let buf = &buffers[0];
    assert_eq!(buf.road, 0);
    assert_eq!(buf.radius_m, 12.0);
    // Box from 10 m to 20 m north of the line: within 12 m.
    let near = vec![
        vector![40.0, 10.0],
        vector![48.0, 10.0],
        vector![48.0, 20.0],
        vector![40.0, 20.0],
    ];
    assert!(buf.intersects(&near));
    let far: Vec<_> = near.iter().map(|v| v + vector![0.0, 5.0]).collect();
    assert!(!buf.intersects(&far));
    // Beyond the cap.
    let past_end: Vec<_> = near.iter().map(|v| v + vector![100.0, 0.0]).collect();
    assert!(!buf.intersects(&past_end));
}

#[test]
fn zero_radius_buffer_still_catches_straddling_rings() {
    let pts = east_line(100.0);
    let frame = LocalFrame::new(pts[0]);
    let road = Centerline::new(pts, RoadClass::Other);
    let buf = RoadBuffer::new(3, &road, 0.0, &frame);
    let straddle = vec![
        vector![10.0, -2.0],
        vector![20.0, -2.0],
        vector![20.0, 2.0],
        vector![10.0, 2.0],
    ];
    assert!(buf.intersects(&straddle));
}

#[test]
fn segment_quads_are_closed() {
    let a = LonLat::new(8.0, 47.0);
    let pts = vec![a, a, destination(a, 45.0, 30.0)];
    let frame = LocalFrame::new(a);
    let buf = RoadBuffer::new(0, &Centerline::new(pts, RoadClass::Tertiary), 6.0, &frame);
    let quads = buf.segment_quads(&frame);
    assert_eq!(quads.len(), 1);
    assert!(is_closed(&quads[0]));
}
