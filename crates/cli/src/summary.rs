use anyhow::{bail, Context, Result};
use polars::prelude::*;
use roadside::layout::{Layout, Side};
use std::fs::File;
use std::path::Path;

/// One row per placement.
pub fn placements_frame(layout: &Layout) -> PolarsResult<DataFrame> {
    let ps = &layout.placements;
    df!(
        "id" => ps.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        "template_id" => ps.iter().map(|p| p.template_id.as_str()).collect::<Vec<_>>(),
        "road" => ps.iter().map(|p| p.source_road as u64).collect::<Vec<_>>(),
        "side" => ps
            .iter()
            .map(|p| match p.side {
                Side::Left => "left",
                Side::Right => "right",
            })
            .collect::<Vec<_>>(),
        "arc_position_m" => ps.iter().map(|p| p.arc_position_m).collect::<Vec<_>>(),
        "width_m" => ps.iter().map(|p| p.width_m).collect::<Vec<_>>(),
        "orientation_deg" => ps.iter().map(|p| p.orientation_deg).collect::<Vec<_>>(),
        "anchor_lon" => ps.iter().map(|p| p.anchor.lon).collect::<Vec<_>>(),
        "anchor_lat" => ps.iter().map(|p| p.anchor.lat).collect::<Vec<_>>(),
        "color" => ps.iter().map(|p| p.color_tag.as_str()).collect::<Vec<_>>()
    )
}

/// Write the placement table as CSV or Parquet, chosen by extension.
pub fn write_summary(layout: &Layout, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    let parquet = match ext.as_deref() {
        Some("csv") => false,
        Some("parquet") => true,
        _ => bail!("summary must end in .csv or .parquet: {}", path.display()),
    };
    let mut df = placements_frame(layout)?;
    let mut file =
        File::create(path).with_context(|| format!("creating summary {}", path.display()))?;
    if parquet {
        ParquetWriter::new(&mut file)
            .finish(&mut df)
            .with_context(|| format!("writing {}", path.display()))?;
    } else {
        CsvWriter::new(&mut file)
            .finish(&mut df)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    tracing::info!(rows = df.height(), cols = df.width(), path = %path.display(), "summary written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use roadside::geo::{destination, LonLat};
    use roadside::layout::{layout, LayoutCfg};
    use roadside::road::{Centerline, RoadClass};
    use roadside::template::FootprintTemplate;
    use tempfile::tempdir;

    fn sample() -> Layout {
        let a = LonLat::new(2.35, 48.85);
        let road = Centerline::new(vec![a, destination(a, 0.0, 100.0)], RoadClass::Tertiary);
        let templates = vec![FootprintTemplate::rectangle("house", 8.0, 10.0, "red")];
        layout(&[road], &templates, &LayoutCfg::default(), &mut StdRng::seed_from_u64(1))
    }

    #[test]
    fn frame_has_row_per_placement() {
        let out = sample();
        let df = placements_frame(&out).unwrap();
        assert_eq!(df.height(), 14);
        assert_eq!(df.width(), 10);
    }

    #[test]
    fn writes_csv_and_parquet() {
        let out = sample();
        let dir = tempdir().unwrap();
        let csv = dir.path().join("summary.csv");
        write_summary(&out, &csv).unwrap();
        let text = std::fs::read_to_string(&csv).unwrap();
        assert!(text.starts_with("id,template_id,road,side"));
        assert_eq!(text.lines().count(), 15);

        let pq = dir.path().join("summary.parquet");
        write_summary(&out, &pq).unwrap();
        let df = ParquetReader::new(File::open(&pq).unwrap()).finish().unwrap();
        assert_eq!(df.height(), 14);
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempdir().unwrap();
        assert!(write_summary(&sample(), &dir.path().join("summary.txt")).is_err());
    }
}
