//! GeoJSON in and out.
//!
//! - Roads come in as LineString / MultiLineString features; the road class is
//!   read from `properties.highway`, `properties.road_class` or `properties.class`.
//! - Site boundaries come in as the outer ring of the first Polygon.
//! - Placements and buffers go out as FeatureCollections for display.

use serde_json::{json, Map, Value};
use std::fmt;

use crate::geo::{LocalFrame, LonLat};
use crate::layout::{Layout, Side};
use crate::road::{Centerline, RoadBuffer, RoadClass};

#[derive(Debug, Clone, PartialEq)]
pub enum GeoJsonError {
    UnsupportedType(String),
    BadCoordinates { feature: usize, reason: String },
    NoGeometry,
}

impl fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedType(t) => write!(f, "unsupported GeoJSON type: {t}"),
            Self::BadCoordinates { feature, reason } => {
                write!(f, "feature {feature}: bad coordinates ({reason})")
            }
            Self::NoGeometry => write!(f, "no usable geometry found"),
        }
    }
}

impl std::error::Error for GeoJsonError {}

fn position(v: &Value) -> Option<LonLat> {
    let a = v.as_array()?;
    match (a.first()?.as_f64(), a.get(1)?.as_f64()) {
        (Some(lon), Some(lat)) => Some(LonLat::new(lon, lat)),
        _ => None,
    }
}

fn positions(v: &Value, feature: usize) -> Result<Vec<LonLat>, GeoJsonError> {
    let arr = v.as_array().ok_or_else(|| GeoJsonError::BadCoordinates {
        feature,
        reason: "coordinates are not an array".into(),
    })?;
    arr.iter()
        .map(|p| {
            position(p).ok_or_else(|| GeoJsonError::BadCoordinates {
                feature,
                reason: format!("not a [lon, lat] position: {p}"),
            })
        })
        .collect()
}

/// `(geometry, properties)` pairs of a FeatureCollection, Feature, or bare geometry.
fn geometries(v: &Value) -> Result<Vec<(&Value, Option<&Map<String, Value>>)>, GeoJsonError> {
    match v.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => Ok(v
            .get("features")
            .and_then(Value::as_array)
            .map(|fs| {
                fs.iter()
                    .filter_map(|f| {
                        let g = f.get("geometry").filter(|g| !g.is_null())?;
                        Some((g, f.get("properties").and_then(Value::as_object)))
                    })
                    .collect()
            })
            .unwrap_or_default()),
        Some("Feature") => Ok(v
            .get("geometry")
            .filter(|g| !g.is_null())
            .map(|g| vec![(g, v.get("properties").and_then(Value::as_object))])
            .unwrap_or_default()),
        Some(_) if v.get("coordinates").is_some() => Ok(vec![(v, None)]),
        Some(other) => Err(GeoJsonError::UnsupportedType(other.to_string())),
        None => Err(GeoJsonError::UnsupportedType("<missing>".into())),
    }
}

fn road_class(props: Option<&Map<String, Value>>) -> RoadClass {
    props
        .and_then(|p| {
            ["highway", "road_class", "class"]
                .iter()
                .find_map(|k| p.get(*k).and_then(Value::as_str))
        })
        .map(RoadClass::from_tag)
        .unwrap_or_default()
}

/// Read road centerlines. Non-line geometries are skipped; each line of a
/// MultiLineString becomes its own centerline with the feature's class.
pub fn centerlines_from_geojson(v: &Value) -> Result<Vec<Centerline>, GeoJsonError> {
    let mut out = Vec::new();
    for (i, (g, props)) in geometries(v)?.into_iter().enumerate() {
        let class = road_class(props);
        let coords = g.get("coordinates").unwrap_or(&Value::Null);
        match g.get("type").and_then(Value::as_str) {
            Some("LineString") => out.push(Centerline::new(positions(coords, i)?, class)),
            Some("MultiLineString") => {
                for line in coords.as_array().into_iter().flatten() {
                    out.push(Centerline::new(positions(line, i)?, class));
                }
            }
            other => tracing::debug!(feature = i, kind = ?other, "non-line geometry skipped"),
        }
    }
    Ok(out)
}

/// Outer ring of the first Polygon (or MultiPolygon part) found.
pub fn boundary_from_geojson(v: &Value) -> Result<Vec<LonLat>, GeoJsonError> {
    for (i, (g, _)) in geometries(v)?.into_iter().enumerate() {
        let coords = g.get("coordinates").unwrap_or(&Value::Null);
        let outer = match g.get("type").and_then(Value::as_str) {
            Some("Polygon") => coords.get(0),
            Some("MultiPolygon") => coords.get(0).and_then(|p| p.get(0)),
            _ => None,
        };
        if let Some(ring) = outer {
            return positions(ring, i);
        }
    }
    Err(GeoJsonError::NoGeometry)
}

fn ring_coords(ring: &[LonLat]) -> Value {
    Value::Array(ring.iter().map(|p| json!(p.to_array())).collect())
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::Left => "left",
        Side::Right => "right",
    }
}

/// One Polygon feature per placement.
pub fn layout_to_feature_collection(layout: &Layout) -> Value {
    let features: Vec<Value> = layout
        .placements
        .iter()
        .map(|p| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [ring_coords(&p.world_polygon)],
                },
                "properties": {
                    "id": p.id,
                    "templateId": p.template_id,
                    "side": side_name(p.side),
                    "orientationDeg": p.orientation_deg,
                    "sourceRoad": p.source_road,
                    "arcPositionM": p.arc_position_m,
                    "anchor": p.anchor.to_array(),
                    "color": p.color_tag,
                },
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

/// One MultiPolygon feature (segment quads) per road buffer.
pub fn buffers_to_feature_collection(buffers: &[RoadBuffer], frame: &LocalFrame) -> Value {
    let features: Vec<Value> = buffers
        .iter()
        .map(|b| {
            let parts: Vec<Value> = b
                .segment_quads(frame)
                .iter()
                .map(|q| json!([ring_coords(q)]))
                .collect();
            json!({
                "type": "Feature",
                "geometry": { "type": "MultiPolygon", "coordinates": parts },
                "properties": {
                    "road": b.road,
                    "class": b.class.as_str(),
                    "radiusM": b.radius_m,
                },
            })
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::destination;
    use crate::layout::{layout, LayoutCfg};
    use crate::road::{build_buffers, site_frame};
    use crate::template::FootprintTemplate;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn reads_lines_with_classes() {
        let fc = json!({
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"highway": "primary"},
                 "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [0.001, 0.0]]}},
                {"type": "Feature", "properties": {"class": "tertiary"},
                 "geometry": {"type": "MultiLineString",
                              "coordinates": [[[0.0, 0.0], [0.0, 0.001]], [[1.0, 1.0], [1.0, 1.001]]]}},
                {"type": "Feature", "properties": {},
                 "geometry": {"type": "Point", "coordinates": [5.0, 5.0]}},
                {"type": "Feature", "properties": null, "geometry": null}
            ]
        });
        let roads = centerlines_from_geojson(&fc).unwrap();
        assert_eq!(roads.len(), 3);
        assert_eq!(roads[0].class, RoadClass::Primary);
        assert_eq!(roads[1].class, RoadClass::Tertiary);
        assert_eq!(roads[2].points[1], LonLat::new(1.0, 1.001));
    }

    #[test]
    fn bare_geometry_and_errors() {
        let line = json!({"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 0.0]]});
        let roads = centerlines_from_geojson(&line).unwrap();
        assert_eq!(roads.len(), 1);
        assert_eq!(roads[0].class, RoadClass::Other);

        let bad = json!({"type": "LineString", "coordinates": [[0.0], [1.0, 0.0]]});
        assert!(matches!(
            centerlines_from_geojson(&bad),
            Err(GeoJsonError::BadCoordinates { feature: 0, .. })
        ));
        assert!(centerlines_from_geojson(&json!({"type": "Topology"})).is_err());
    }

    #[test]
    fn reads_polygon_boundary() {
        let poly = json!({"type": "Feature", "properties": {}, "geometry": {
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [0.001, 0.0], [0.001, 0.001], [0.0, 0.0]]]
        }});
        assert_eq!(boundary_from_geojson(&poly).unwrap().len(), 4);
        assert_eq!(
            boundary_from_geojson(&json!({"type": "FeatureCollection", "features": []})),
            Err(GeoJsonError::NoGeometry)
        );
    }

    #[test]
    fn writes_placements_and_buffers() {
        let a = LonLat::new(8.0, 47.0);
        let road = Centerline::new(vec![a, destination(a, 90.0, 60.0)], RoadClass::Secondary);
        let roads = vec![road];
        let templates = vec![FootprintTemplate::rectangle("h", 8.0, 10.0, "brown")];
        let out = layout(&roads, &templates, &LayoutCfg::default(), &mut StdRng::seed_from_u64(0));
        let fc = layout_to_feature_collection(&out);
        let features = fc["features"].as_array().unwrap();
        assert_eq!(features.len(), out.placements.len());
        let first = &features[0];
        assert_eq!(first["properties"]["side"], "left");
        assert_eq!(first["properties"]["templateId"], "h");
        let ring = first["geometry"]["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.first(), ring.last());

        let frame = site_frame(&roads);
        let bufs = build_buffers(&roads, &LayoutCfg::default().buffer_radii, &frame);
        let bfc = buffers_to_feature_collection(&bufs, &frame);
        assert_eq!(bfc["features"][0]["properties"]["class"], "secondary");
        assert_eq!(bfc["features"][0]["geometry"]["coordinates"].as_array().unwrap().len(), 1);
    }
}
