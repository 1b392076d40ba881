//! Layout driver: per road, per side slot placement with collision filtering.

use nalgebra::Vector2;
use rand::Rng;

use super::config::LayoutCfg;
use super::select::{select_slots, Slot};
use super::types::{Layout, LayoutWarning, PlacedFootprint, Side};
use crate::geo::{destination, normalize_bearing, LocalFrame, LonLat};
use crate::ring::{self, close_ring, Affine2};
use crate::road::{build_buffers, site_frame, ArcTable, Centerline, RoadBuffer};
use crate::template::FootprintTemplate;

/// Place footprints along both sides of every centerline.
///
/// Never fails: invalid templates, degenerate centerlines and colliding slots
/// only shrink the result; each is reported in `Layout::warnings` or
/// `Layout::stats`. Buffers for all centerlines are built up front, so pass the
/// complete road set in one call.
pub fn layout<R: Rng + ?Sized>(
    centerlines: &[Centerline],
    templates: &[FootprintTemplate],
    cfg: &LayoutCfg,
    rng: &mut R,
) -> Layout {
    let mut out = Layout::default();
    if let Err(e) = cfg.validate() {
        tracing::warn!(error = %e, "layout skipped");
        out.warnings.push(LayoutWarning::InvalidConfig {
            reason: e.to_string(),
        });
        return out;
    }

    let mut usable: Vec<&FootprintTemplate> = Vec::with_capacity(templates.len());
    for t in templates {
        match t.validate() {
            Ok(()) => usable.push(t),
            Err(issue) => {
                tracing::warn!(template = %t.id, %issue, "template skipped");
                out.warnings.push(LayoutWarning::TemplateInvalid {
                    template_id: t.id.clone(),
                    reason: issue.to_string(),
                });
            }
        }
    }
    if usable.is_empty() {
        out.warnings.push(LayoutWarning::NoUsableTemplates);
        return out;
    }

    let frame = site_frame(centerlines);
    let buffers = build_buffers(centerlines, &cfg.buffer_radii, &frame);

    let mut placer = Placer {
        cfg,
        widths: usable.iter().map(|t| t.width).collect(),
        templates: usable,
        buffers: &buffers,
        frame,
        accepted: Vec::new(),
        out,
    };
    for (road, cl) in centerlines.iter().enumerate() {
        placer.place_road(road, cl, rng);
    }
    tracing::debug!(
        placed = placer.out.placements.len(),
        candidates = placer.out.stats.candidate_slots,
        by_buffer = placer.out.stats.discarded_by_buffer,
        by_overlap = placer.out.stats.discarded_by_overlap,
        "layout done"
    );
    placer.out
}

/// Shared context for one `layout` call.
struct Placer<'a> {
    cfg: &'a LayoutCfg,
    templates: Vec<&'a FootprintTemplate>,
    widths: Vec<f64>,
    buffers: &'a [RoadBuffer],
    frame: LocalFrame,
    /// Accepted footprints in `frame`, for overlap checks.
    accepted: Vec<Vec<Vector2<f64>>>,
    out: Layout,
}

impl Placer<'_> {
    fn degenerate(&mut self, road: usize, reason: String) {
        tracing::debug!(road, %reason, "centerline skipped");
        self.out
            .warnings
            .push(LayoutWarning::DegenerateCenterline { road, reason });
    }

    fn place_road<R: Rng + ?Sized>(&mut self, road: usize, cl: &Centerline, rng: &mut R) {
        if cl.points.len() < 2 {
            self.degenerate(road, format!("needs 2 points, has {}", cl.points.len()));
            return;
        }
        if cl.points.iter().any(|p| !p.is_finite()) {
            self.degenerate(road, "non-finite coordinate".to_string());
            return;
        }
        let arc = ArcTable::new(&cl.points);
        let usable_m = arc.total_m() - 2.0 * self.cfg.end_clearance_m;
        if usable_m <= 0.0 {
            self.degenerate(
                road,
                format!(
                    "length {:.2} m leaves no room after {:.2} m end clearance",
                    arc.total_m(),
                    self.cfg.end_clearance_m
                ),
            );
            return;
        }
        for side in Side::BOTH {
            self.place_side(road, &arc, side, usable_m, rng);
        }
    }

    fn place_side<R: Rng + ?Sized>(
        &mut self,
        road: usize,
        arc: &ArcTable<'_>,
        side: Side,
        usable_m: f64,
        rng: &mut R,
    ) {
        let sel = select_slots(
            &self.widths,
            usable_m,
            self.cfg.edge_spacing_m,
            self.cfg.end_clearance_m,
            self.cfg.max_slots_per_side,
            rng,
        );
        if sel.hit_limit {
            tracing::warn!(road, ?side, "slot limit reached");
            self.out
                .warnings
                .push(LayoutWarning::SlotLimitReached { road, side });
        }
        self.out.stats.candidate_slots += sel.slots.len();

        for (index, slot) in sel.slots.iter().enumerate() {
            let Some((placed, local)) = self.candidate(road, arc, side, index, slot) else {
                continue;
            };
            if self
                .buffers
                .iter()
                .any(|b| b.road != road && b.intersects(&local))
            {
                tracing::debug!(id = %placed.id, "slot hits another road's buffer");
                self.out.stats.discarded_by_buffer += 1;
                continue;
            }
            if self.cfg.avoid_overlaps && self.accepted.iter().any(|a| ring::rings_overlap(a, &local))
            {
                tracing::debug!(id = %placed.id, "slot overlaps a placed footprint");
                self.out.stats.discarded_by_overlap += 1;
                continue;
            }
            self.accepted.push(local);
            self.out.placements.push(placed);
        }
    }

    /// Build the footprint for one slot: station on the centerline, offset to
    /// the side, template rotated so its front faces the road.
    fn candidate(
        &self,
        road: usize,
        arc: &ArcTable<'_>,
        side: Side,
        index: usize,
        slot: &Slot,
    ) -> Option<(PlacedFootprint, Vec<Vector2<f64>>)> {
        let t = self.templates[slot.template];
        let arc_position_m = slot.start_m + 0.5 * t.width;
        let station = arc.station_at(arc_position_m)?;
        let away = normalize_bearing(station.bearing_deg + side.turn_deg());
        let anchor = destination(station.point, away, self.cfg.road_offset_m);

        // Template +Y points away from the road; meters → degrees at the anchor.
        let rot = Affine2::compass(away, Vector2::zeros());
        let at_anchor = LocalFrame::new(anchor);
        let mut world_polygon: Vec<LonLat> = ring::open(&t.polygon)
            .iter()
            .map(|p| at_anchor.to_geo(rot.apply(*p)))
            .collect();
        close_ring(&mut world_polygon);
        let local = world_polygon
            .iter()
            .map(|p| self.frame.to_local(*p))
            .collect();

        let placed = PlacedFootprint {
            id: format!("{road}-{}-{index}", side.letter()),
            template_id: t.id.clone(),
            anchor,
            orientation_deg: normalize_bearing(away + 180.0),
            side,
            world_polygon,
            source_road: road,
            arc_position_m,
            width_m: t.width,
            color_tag: t.color_tag.clone(),
        };
        Some((placed, local))
    }
}
