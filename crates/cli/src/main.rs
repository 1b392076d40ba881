use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use roadside::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

mod provenance;
mod summary;

#[derive(Parser)]
#[command(name = "roadside")]
#[command(about = "Place footprints along road centerlines")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Lay out footprints along both sides of every road
    Layout(LayoutArgs),
    /// Print area, perimeter and edges of a site boundary as JSON
    Site {
        #[arg(long)]
        boundary: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(clap::Args)]
struct LayoutArgs {
    /// Road centerlines (GeoJSON LineString/MultiLineString)
    #[arg(long)]
    roads: PathBuf,
    /// Template catalog (JSON array of records)
    #[arg(long)]
    templates: PathBuf,
    /// Placements output (GeoJSON FeatureCollection)
    #[arg(long)]
    out: PathBuf,
    /// Layout parameters (JSON); missing fields use defaults
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Placement table, `.csv` or `.parquet`
    #[arg(long)]
    summary: Option<PathBuf>,
    /// Road buffers output (GeoJSON), for inspection
    #[arg(long)]
    buffers: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    SubscriberBuilder::default()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Layout(args) => run_layout(&args).map(|_| ()),
        Action::Site { boundary } => site(&boundary),
        Action::Report => report(),
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn write_json(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn run_layout(args: &LayoutArgs) -> Result<Layout> {
    tracing::info!(roads = %args.roads.display(), templates = %args.templates.display(), seed = args.seed, "layout");
    let roads = centerlines_from_geojson(&read_json(&args.roads)?)
        .with_context(|| format!("reading roads from {}", args.roads.display()))?;
    let catalog_text = fs::read_to_string(&args.templates)
        .with_context(|| format!("reading {}", args.templates.display()))?;
    let catalog = catalog_from_json(&catalog_text)
        .with_context(|| format!("parsing templates {}", args.templates.display()))?;
    let cfg: LayoutCfg = match &args.config {
        Some(path) => serde_json::from_value(read_json(path)?)
            .with_context(|| format!("parsing config {}", path.display()))?,
        None => LayoutCfg::default(),
    };
    cfg.validate()?;
    tracing::info!(
        roads = roads.len(),
        templates = catalog.templates.len(),
        replaced = catalog.notes.len(),
        "inputs loaded"
    );

    let mut rng = StdRng::seed_from_u64(args.seed);
    let out = layout(&roads, &catalog.templates, &cfg, &mut rng);
    for w in &out.warnings {
        tracing::warn!("{w}");
    }
    tracing::info!(
        placed = out.placements.len(),
        candidates = out.stats.candidate_slots,
        by_buffer = out.stats.discarded_by_buffer,
        by_overlap = out.stats.discarded_by_overlap,
        "layout finished"
    );

    write_json(&args.out, &layout_to_feature_collection(&out))?;

    let mut payload = provenance::Payload::new(serde_json::json!({
        "roads": args.roads,
        "templates": args.templates,
        "config": cfg,
        "seed": args.seed,
        "placements": out.placements.len(),
        "stats": out.stats,
        "warnings": out.warnings.iter().map(|w| w.to_string()).collect::<Vec<_>>(),
    }));
    if let Some(path) = &args.summary {
        summary::write_summary(&out, path)?;
        payload = payload.with_output(path);
    }
    if let Some(path) = &args.buffers {
        let frame = site_frame(&roads);
        let buffers = build_buffers(&roads, &cfg.buffer_radii, &frame);
        write_json(path, &buffers_to_feature_collection(&buffers, &frame))?;
        payload = payload.with_output(path);
    }
    let prov = provenance::write_sidecar(&args.out, payload)?;
    tracing::info!(out = %args.out.display(), provenance = %prov.display(), "written");
    Ok(out)
}

/// Accepts GeoJSON (Polygon / Feature / FeatureCollection) or a bare
/// `[[lon, lat], ...]` array.
fn load_boundary(path: &Path) -> Result<Vec<LonLat>> {
    let v = read_json(path)?;
    if v.is_array() {
        let pts: Vec<[f64; 2]> = serde_json::from_value(v)
            .with_context(|| format!("parsing boundary {}", path.display()))?;
        return Ok(pts.into_iter().map(LonLat::from).collect());
    }
    boundary_from_geojson(&v).with_context(|| format!("reading boundary {}", path.display()))
}

fn site(boundary: &Path) -> Result<()> {
    let metrics = SiteMetrics::from_boundary(&load_boundary(boundary)?)?;
    tracing::info!(area_m2 = metrics.area_m2, perimeter_m = metrics.perimeter_m, "site");
    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::block(serde_json::json!({
        "defaults": LayoutCfg::default(),
    }));
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn write(path: &Path, v: &Value) {
        fs::write(path, serde_json::to_vec(v).unwrap()).unwrap();
    }

    fn args(dir: &Path) -> LayoutArgs {
        let roads = dir.join("roads.geojson");
        // ~100 m due north at the equator.
        write(
            &roads,
            &json!({"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"highway": "residential"},
                 "geometry": {"type": "LineString",
                              "coordinates": [[0.0, 0.0], [0.0, 0.000899322]]}}
            ]}),
        );
        let templates = dir.join("templates.json");
        write(
            &templates,
            &json!([{"id": "house", "polygon": [[-4, 0], [4, 0], [4, 10], [-4, 10]]}]),
        );
        LayoutArgs {
            roads,
            templates,
            out: dir.join("out/layout.geojson"),
            config: None,
            seed: 3,
            summary: None,
            buffers: None,
        }
    }

    #[test]
    fn layout_writes_outputs_and_sidecar() {
        let dir = tempdir().unwrap();
        let mut a = args(dir.path());
        a.summary = Some(dir.path().join("out/layout.csv"));
        a.buffers = Some(dir.path().join("out/buffers.geojson"));
        let out = run_layout(&a).unwrap();
        assert_eq!(out.placements.len(), 14);

        let fc = read_json(&a.out).unwrap();
        assert_eq!(fc["features"].as_array().unwrap().len(), 14);
        let prov = read_json(&dir.path().join("out/layout.provenance.json")).unwrap();
        assert_eq!(prov["params"]["seed"], 3);
        assert_eq!(prov["outputs"].as_array().unwrap().len(), 3);
        assert!(dir.path().join("out/layout.csv").exists());
        let bufs = read_json(&dir.path().join("out/buffers.geojson")).unwrap();
        assert_eq!(bufs["features"][0]["properties"]["class"], "other");
    }

    #[test]
    fn config_file_is_applied_and_validated() {
        let dir = tempdir().unwrap();
        let mut a = args(dir.path());
        let cfg = dir.path().join("cfg.json");
        write(&cfg, &json!({"edgeSpacingMeters": 20.0}));
        a.config = Some(cfg.clone());
        // 8n + 20(n-1) <= 90 -> n = 3 per side.
        assert_eq!(run_layout(&a).unwrap().placements.len(), 6);

        write(&cfg, &json!({"end_clearance_m": -1.0}));
        assert!(run_layout(&a).is_err());
    }

    #[test]
    fn missing_input_names_the_file() {
        let dir = tempdir().unwrap();
        let mut a = args(dir.path());
        a.roads = dir.path().join("nope.geojson");
        let err = format!("{:#}", run_layout(&a).unwrap_err());
        assert!(err.contains("nope.geojson"));
    }

    #[test]
    fn boundary_from_bare_array_or_geojson() {
        let dir = tempdir().unwrap();
        let bare = dir.path().join("b.json");
        write(&bare, &json!([[0.0, 0.0], [0.001, 0.0], [0.001, 0.001], [0.0, 0.001]]));
        assert_eq!(load_boundary(&bare).unwrap().len(), 4);

        let gj = dir.path().join("b.geojson");
        write(
            &gj,
            &json!({"type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [0.001, 0.0], [0.001, 0.001], [0.0, 0.0]]]}),
        );
        let pts = load_boundary(&gj).unwrap();
        assert!(SiteMetrics::from_boundary(&pts).unwrap().area_m2 > 0.0);
    }
}
