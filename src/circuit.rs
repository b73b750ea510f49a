use eframe::egui::{pos2, Color32, Pos2};
use rand::Rng;

use crate::grid::{Grid, OccupancyMask};
use crate::types::{LayoutParams, Trace};

/// Document-space rectangle of a page section, as reported by the layout.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectionRect {
    pub top: f32,
    pub height: f32,
}

/// Row/column window of the grid designated for circuit decoration, with the
/// nested rectangle that must stay free of it (the section's card area,
/// restricted to the middle column band so walkers can run down the margins).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircuitZone {
    pub start_row: i32,
    pub end_row: i32,
    pub exclusion_start_row: i32,
    pub exclusion_end_row: i32,
    pub exclusion_start_col: i32,
    pub exclusion_end_col: i32,
}

impl CircuitZone {
    /// Derives the zone from a section's on-page position. Returns `None`
    /// when the resulting row window has no height, which disables circuit
    /// generation for the pass.
    pub fn from_section(
        section: SectionRect,
        grid: &Grid,
        params: &LayoutParams,
    ) -> Option<Self> {
        let desktop = grid.surface_size().x > params.desktop_breakpoint;
        let header_offset = if desktop {
            params.header_offset_desktop
        } else {
            params.header_offset_narrow
        };

        // The schematic band starts slightly above the section content and
        // runs slightly past its bottom edge.
        let start_y = (section.top + header_offset - params.zone_top_margin).max(0.0);
        let end_y = section.top + section.height + params.zone_bottom_margin;
        let start_row = grid.clamp_row(grid.row_at(start_y));
        let end_row = grid.clamp_row(grid.row_at(end_y));
        if end_row <= start_row {
            return None;
        }

        let exclusion_top = section.top + params.cards_top_offset + header_offset;
        let exclusion_bottom = section.top + section.height - params.cards_bottom_offset;

        Some(Self {
            start_row,
            end_row,
            exclusion_start_row: grid.row_at(exclusion_top),
            exclusion_end_row: grid.row_at(exclusion_bottom),
            exclusion_start_col: (grid.cols as f32 * params.exclusion_col_start) as i32,
            exclusion_end_col: (grid.cols as f32 * params.exclusion_col_end) as i32,
        })
    }

    pub fn contains_row(&self, row: i32) -> bool {
        row >= self.start_row && row <= self.end_row
    }

    pub fn in_exclusion(&self, row: i32, col: i32) -> bool {
        row >= self.exclusion_start_row
            && row <= self.exclusion_end_row
            && col >= self.exclusion_start_col
            && col <= self.exclusion_end_col
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ComponentKind {
    Wire,
    Resistor,
    Capacitor,
    Inductor,
    OpAmp,
    Diode,
}

impl ComponentKind {
    // Cumulative thresholds; everything past 0.5 stays a plain wire, so half
    // of all eligible steps draw no symbol.
    fn pick(roll: f32) -> Self {
        if roll < 0.10 {
            ComponentKind::Resistor
        } else if roll < 0.20 {
            ComponentKind::Capacitor
        } else if roll < 0.30 {
            ComponentKind::Inductor
        } else if roll < 0.40 {
            ComponentKind::OpAmp
        } else if roll < 0.50 {
            ComponentKind::Diode
        } else {
            ComponentKind::Wire
        }
    }
}

const DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Runs the walker ensemble over `zone`, appending schematic traces and
/// updating `mask` in place. Pure in grid/mask/rng; no UI state involved.
pub fn generate(
    grid: &Grid,
    zone: &CircuitZone,
    mask: &mut OccupancyMask,
    color: Color32,
    params: &LayoutParams,
    rng: &mut impl Rng,
) -> Vec<Trace> {
    let mut traces = Vec::new();

    // The card rectangle is off limits, but only across the middle column
    // band; the side margins stay open so wires can run past it.
    for r in zone.exclusion_start_row..=zone.exclusion_end_row {
        for c in zone.exclusion_start_col..=zone.exclusion_end_col {
            mask.reserve(r, c);
        }
    }

    let zone_height = zone.end_row - zone.start_row;
    for _ in 0..params.walker_count {
        let mut spawn = None;
        for _ in 0..params.spawn_attempts {
            let r = zone.start_row + rng.random_range(0..zone_height);
            let c = rng.random_range(0..grid.cols as i32);
            if mask.is_clear(r, c) {
                spawn = Some((r, c));
                break;
            }
        }
        // A walker that never finds a free start contributes nothing.
        let Some((mut r, mut c)) = spawn else {
            continue;
        };
        mask.draw(r, c);

        let steps = rng.random_range(params.min_steps..params.max_steps);
        for _ in 0..steps {
            let open: Vec<(i32, i32)> = DIRECTIONS
                .iter()
                .copied()
                .filter(|(dr, dc)| mask.is_clear(r + dr, c + dc))
                .collect();

            if open.is_empty() {
                // Dead end: sometimes terminate the wire with a ground symbol.
                if rng.random::<f32>() < params.ground_cap_chance {
                    let (dr, dc) = DIRECTIONS[rng.random_range(0..DIRECTIONS.len())];
                    let p1 = grid.cell_center(r, c);
                    let p2 = grid.cell_center(r + dr, c + dc);
                    ground(&mut traces, p1, p2, color);
                }
                break;
            }

            let (dr, dc) = open[rng.random_range(0..open.len())];
            let (next_r, next_c) = (r + dr, c + dc);

            // A component symbol is wider than the wire, so both lateral
            // neighbors of the current and next cell must be free.
            let (perp_r, perp_c) = (dc, dr);
            let has_component_space = mask.is_clear(r + perp_r, c + perp_c)
                && mask.is_clear(next_r + perp_r, next_c + perp_c)
                && mask.is_clear(r - perp_r, c - perp_c)
                && mask.is_clear(next_r - perp_r, next_c - perp_c);

            let roll = rng.random::<f32>();
            let kind = if has_component_space {
                ComponentKind::pick(roll)
            } else {
                ComponentKind::Wire
            };

            mask.draw(next_r, next_c);
            if kind != ComponentKind::Wire {
                mask.draw(r + perp_r, c + perp_c);
                mask.draw(r - perp_r, c - perp_c);
                mask.draw(next_r + perp_r, next_c + perp_c);
                mask.draw(next_r - perp_r, next_c - perp_c);
            }

            let p1 = grid.cell_center(r, c);
            let p2 = grid.cell_center(next_r, next_c);
            match kind {
                ComponentKind::Wire => traces.push(Trace::new(p1, p2, color)),
                ComponentKind::Resistor => resistor(&mut traces, p1, p2, color),
                ComponentKind::Capacitor => capacitor(&mut traces, p1, p2, color),
                ComponentKind::Inductor => inductor(&mut traces, p1, p2, color),
                ComponentKind::OpAmp => op_amp(&mut traces, p1, p2, color),
                ComponentKind::Diode => diode(&mut traces, p1, p2, color),
            }

            r = next_r;
            c = next_c;
        }
    }

    traces
}

fn unit(p1: Pos2, p2: Pos2) -> (f32, f32, f32) {
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        (0.0, 0.0, 1.0)
    } else {
        (dx / len, dy / len, len)
    }
}

/// Zigzag body between two straight leads.
fn resistor(traces: &mut Vec<Trace>, p1: Pos2, p2: Pos2, color: Color32) {
    let mid = pos2((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);
    let amp = 8.0;
    let horizontal = (p2.y - p1.y).abs() < f32::EPSILON;
    let (perp_x, perp_y) = if horizontal { (0.0, amp) } else { (amp, 0.0) };
    let third_a = pos2((p1.x * 2.0 + p2.x) / 3.0, (p1.y * 2.0 + p2.y) / 3.0);
    let third_b = pos2((p1.x + p2.x * 2.0) / 3.0, (p1.y + p2.y * 2.0) / 3.0);
    let peak = pos2(mid.x + perp_x, mid.y + perp_y);
    let trough = pos2(mid.x - perp_x, mid.y - perp_y);
    traces.push(Trace::new(p1, third_a, color));
    traces.push(Trace::new(third_a, peak, color));
    traces.push(Trace::new(peak, trough, color));
    traces.push(Trace::new(trough, third_b, color));
    traces.push(Trace::new(third_b, p2, color));
}

/// Two leads interrupted by a pair of parallel plates.
fn capacitor(traces: &mut Vec<Trace>, p1: Pos2, p2: Pos2, color: Color32) {
    let (ux, uy, _) = unit(p1, p2);
    let cx = (p1.x + p2.x) / 2.0;
    let cy = (p1.y + p2.y) / 2.0;
    let plate = 10.0;
    let (px, py) = (-uy * plate, ux * plate);
    let gap = 4.0;
    let gap_start = pos2(cx - ux * gap, cy - uy * gap);
    let gap_end = pos2(cx + ux * gap, cy + uy * gap);
    traces.push(Trace::new(p1, gap_start, color));
    traces.push(Trace::new(gap_end, p2, color));
    traces.push(Trace::with_width(
        pos2(gap_start.x + px, gap_start.y + py),
        pos2(gap_start.x - px, gap_start.y - py),
        color,
        2.0,
    ));
    traces.push(Trace::with_width(
        pos2(gap_end.x + px, gap_end.y + py),
        pos2(gap_end.x - px, gap_end.y - py),
        color,
        2.0,
    ));
}

/// Three triangular coil bumps between short leads.
fn inductor(traces: &mut Vec<Trace>, p1: Pos2, p2: Pos2, color: Color32) {
    let (ux, uy, len) = unit(p1, p2);
    let bumps = 3;
    let lead_scale = 0.15;
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let lead1_end = pos2(p1.x + dx * lead_scale, p1.y + dy * lead_scale);
    let lead2_start = pos2(p2.x - dx * lead_scale, p2.y - dy * lead_scale);
    traces.push(Trace::new(p1, lead1_end, color));
    traces.push(Trace::new(lead2_start, p2, color));

    let bump_len = len * (1.0 - 2.0 * lead_scale) / bumps as f32;
    let (px, py) = (-uy * 8.0, ux * 8.0);
    let mut current = lead1_end;
    for _ in 0..bumps {
        let next = pos2(current.x + ux * bump_len, current.y + uy * bump_len);
        let top = pos2(
            (current.x + next.x) / 2.0 + px,
            (current.y + next.y) / 2.0 + py,
        );
        traces.push(Trace::new(current, top, color));
        traces.push(Trace::new(top, next, color));
        current = next;
    }
}

/// Triangle amplifier body with input and output leads.
fn op_amp(traces: &mut Vec<Trace>, p1: Pos2, p2: Pos2, color: Color32) {
    let (ux, uy, _) = unit(p1, p2);
    let cx = (p1.x + p2.x) / 2.0;
    let cy = (p1.y + p2.y) / 2.0;
    let size = 15.0;
    let tip = pos2(cx + ux * size, cy + uy * size);
    let base = pos2(cx - ux * size * 0.5, cy - uy * size * 0.5);
    let (px, py) = (-uy * size, ux * size);
    let base_top = pos2(base.x + px, base.y + py);
    let base_bottom = pos2(base.x - px, base.y - py);
    traces.push(Trace::with_width(base_top, base_bottom, color, 2.0));
    traces.push(Trace::with_width(base_bottom, tip, color, 2.0));
    traces.push(Trace::with_width(tip, base_top, color, 2.0));
    traces.push(Trace::new(p1, base, color));
    traces.push(Trace::new(tip, p2, color));
}

/// Triangle plus cathode bar.
fn diode(traces: &mut Vec<Trace>, p1: Pos2, p2: Pos2, color: Color32) {
    let (ux, uy, _) = unit(p1, p2);
    let cx = (p1.x + p2.x) / 2.0;
    let cy = (p1.y + p2.y) / 2.0;
    let size = 10.0;
    let tip = pos2(cx + ux * size, cy + uy * size);
    let base = pos2(cx - ux * size, cy - uy * size);
    let (px, py) = (-uy * size, ux * size);
    let base_top = pos2(base.x + px, base.y + py);
    let base_bottom = pos2(base.x - px, base.y - py);
    let bar_top = pos2(tip.x + px, tip.y + py);
    let bar_bottom = pos2(tip.x - px, tip.y - py);
    traces.push(Trace::with_width(base_top, base_bottom, color, 1.5));
    traces.push(Trace::with_width(base_bottom, tip, color, 1.5));
    traces.push(Trace::with_width(tip, base_top, color, 1.5));
    traces.push(Trace::with_width(bar_top, bar_bottom, color, 2.0));
    traces.push(Trace::new(p1, base, color));
    traces.push(Trace::new(tip, p2, color));
}

/// Lead to the midpoint, then three shrinking bars.
fn ground(traces: &mut Vec<Trace>, p1: Pos2, p2: Pos2, color: Color32) {
    let mid = pos2((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);
    traces.push(Trace::new(p1, mid, color));

    let (ux, uy, _) = unit(p1, p2);
    let (px, py) = (-uy, ux);
    let size = 12.0;
    for (step, extent) in [(0.0, size), (4.0, size * 0.7), (8.0, size * 0.3)] {
        let bx = mid.x + ux * step;
        let by = mid.y + uy * step;
        traces.push(Trace::with_width(
            pos2(bx + px * extent, by + py * extent),
            pos2(bx - px * extent, by - py * extent),
            color,
            2.0,
        ));
    }
}
