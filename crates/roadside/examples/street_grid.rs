//! Lay out a small street grid and print per-road counts.
//!
//! Usage:
//!   cargo run -p roadside --example street_grid -- [seed]
//!
//! Prints placements per (road, side) plus the discard counters, a quick
//! sanity check on spacing and buffer settings.

use rand::{rngs::StdRng, SeedableRng};
use roadside::geo::{destination, LonLat};
use roadside::layout::{layout, LayoutCfg, Side};
use roadside::road::{Centerline, RoadClass};
use roadside::template::FootprintTemplate;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2025);

    let o = LonLat::new(-0.1276, 51.5072);
    let main_street = Centerline::new(vec![o, destination(o, 90.0, 400.0)], RoadClass::Primary);
    let side_streets: Vec<Centerline> = (0..4)
        .map(|k| {
            let a = destination(o, 90.0, 50.0 + 100.0 * k as f64);
            Centerline::new(vec![a, destination(a, 0.0, 150.0)], RoadClass::Tertiary)
        })
        .collect();
    let mut roads = vec![main_street];
    roads.extend(side_streets);

    let templates = vec![
        FootprintTemplate::rectangle("terrace", 6.0, 9.0, "#b5651d"),
        FootprintTemplate::rectangle("detached", 10.0, 12.0, "#8b4513"),
    ];
    let out = layout(
        &roads,
        &templates,
        &LayoutCfg::default(),
        &mut StdRng::seed_from_u64(seed),
    );

    for road in 0..roads.len() {
        let l = out.on(road, Side::Left).count();
        let r = out.on(road, Side::Right).count();
        println!("road {road} ({}): left={l} right={r}", roads[road].class.as_str());
    }
    println!(
        "total={} candidates={} by_buffer={} by_overlap={}",
        out.placements.len(),
        out.stats.candidate_slots,
        out.stats.discarded_by_buffer,
        out.stats.discarded_by_overlap
    );
    for w in &out.warnings {
        println!("warning: {w}");
    }
}
