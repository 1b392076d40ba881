//! Template catalog loading with rectangular fallbacks.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use super::types::FootprintTemplate;
use crate::ring;

/// Width of the rectangle that replaces an unusable record.
pub const FALLBACK_WIDTH_M: f64 = 8.0;
/// Length of the rectangle that replaces an unusable record.
pub const FALLBACK_LENGTH_M: f64 = 10.0;

const DEFAULT_COLOR: &str = "#8c8c8c";

/// Catalog entry as stored on disk (JSON).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: String,
    /// Outline vertices `[x, y]` in meters, any origin.
    #[serde(default)]
    pub polygon: Option<Vec<[f64; 2]>>,
    #[serde(default, alias = "colorTag")]
    pub color: Option<String>,
}

/// A record that was replaced by a rectangle, and why.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogNote {
    pub template_id: String,
    pub reason: String,
}

/// Loaded templates plus the substitutions made while loading.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    pub templates: Vec<FootprintTemplate>,
    pub notes: Vec<CatalogNote>,
}

fn from_record(rec: &TemplateRecord) -> Result<FootprintTemplate, String> {
    let color = rec.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string());
    let outline: Vec<Vector2<f64>> = rec
        .polygon
        .as_ref()
        .ok_or_else(|| "no outline".to_string())?
        .iter()
        .map(|p| Vector2::new(p[0], p[1]))
        .collect();
    let t = FootprintTemplate::from_outline(rec.id.clone(), &outline, color)
        .ok_or_else(|| "outline has fewer than 3 finite vertices".to_string())?;
    t.validate().map_err(|e| e.to_string())?;
    if !ring::is_simple(&t.polygon) {
        return Err("outline self-intersects".to_string());
    }
    Ok(t)
}

/// Build templates from records. Width and length always come from the
/// outline; records whose outline is missing or unusable become
/// `FALLBACK_WIDTH_M × FALLBACK_LENGTH_M` rectangles.
pub fn load_catalog(records: &[TemplateRecord]) -> Catalog {
    let mut catalog = Catalog::default();
    for rec in records {
        match from_record(rec) {
            Ok(t) => catalog.templates.push(t),
            Err(reason) => {
                tracing::warn!(id = %rec.id, %reason, "template replaced by fallback rectangle");
                let color = rec.color.clone().unwrap_or_else(|| DEFAULT_COLOR.to_string());
                catalog.templates.push(FootprintTemplate::rectangle(
                    rec.id.clone(),
                    FALLBACK_WIDTH_M,
                    FALLBACK_LENGTH_M,
                    color,
                ));
                catalog.notes.push(CatalogNote {
                    template_id: rec.id.clone(),
                    reason,
                });
            }
        }
    }
    catalog
}

/// Parse a JSON array of records and load it.
pub fn catalog_from_json(json: &str) -> Result<Catalog, serde_json::Error> {
    let records: Vec<TemplateRecord> = serde_json::from_str(json)?;
    Ok(load_catalog(&records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_records_are_normalized() {
        let json = r#"[
            {"id": "cabin", "polygon": [[0,0],[6,0],[6,9],[0,9]], "colorTag": "green"}
        ]"#;
        let cat = catalog_from_json(json).unwrap();
        assert!(cat.notes.is_empty());
        let t = &cat.templates[0];
        assert_eq!((t.width, t.length), (6.0, 9.0));
        assert_eq!(t.color_tag, "green");
        assert!(t.validate().is_ok());
    }

    #[test]
    fn missing_outline_uses_fixed_size() {
        // Declared sizes without an outline are not trusted.
        let json = r#"[{"id": "shed", "width": 4.0, "length": 5.0}]"#;
        let cat = catalog_from_json(json).unwrap();
        assert_eq!(cat.templates.len(), 1);
        assert_eq!(
            (cat.templates[0].width, cat.templates[0].length),
            (FALLBACK_WIDTH_M, FALLBACK_LENGTH_M)
        );
        assert_eq!(cat.notes.len(), 1);
        assert_eq!(cat.notes[0].template_id, "shed");
    }

    #[test]
    fn broken_outline_uses_fixed_fallback() {
        let bowtie = TemplateRecord {
            id: "bow".into(),
            polygon: Some(vec![[0.0, 0.0], [2.0, 2.0], [2.0, 0.0], [0.0, 1.0]]),
            ..Default::default()
        };
        let flat = TemplateRecord {
            id: "flat".into(),
            polygon: Some(vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]),
            ..Default::default()
        };
        let cat = load_catalog(&[bowtie, flat]);
        assert_eq!(cat.templates.len(), 2);
        assert_eq!(cat.notes.len(), 2);
        for t in &cat.templates {
            assert_eq!((t.width, t.length), (FALLBACK_WIDTH_M, FALLBACK_LENGTH_M));
            assert!(t.validate().is_ok());
        }
        assert!(cat.notes[0].reason.contains("self-intersects"));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(catalog_from_json("{not json").is_err());
    }
}
