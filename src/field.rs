use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::circuit::{self, CircuitZone, SectionRect};
use crate::grid::{Grid, OccupancyMask};
use crate::stencil::HERO_M;
use crate::types::{LayoutParams, Particle, Theme, Trace};

/// Everything one layout pass produces. Regenerated wholesale on resize,
/// document growth, or theme change; a frame in flight keeps drawing the old
/// lists until the swap between ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldLayout {
    pub grid: Grid,
    pub particles: Vec<Particle>,
    pub traces: Vec<Trace>,
}

impl FieldLayout {
    pub fn empty() -> Self {
        Self {
            grid: Grid::new(0.0, 0.0, 30.0, 0.0),
            particles: Vec::new(),
            traces: Vec::new(),
        }
    }

    /// One full layout pass over a `width` x `height` document surface.
    /// `viewport_h` anchors the hero glyph; `section` (the projects section's
    /// document rect, if mounted) places the circuit zone.
    pub fn generate(
        width: f32,
        height: f32,
        viewport_h: f32,
        theme: Theme,
        section: Option<SectionRect>,
        params: &LayoutParams,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = Grid::new(width, height, params.pitch, params.edge_padding);
        let mut mask = OccupancyMask::new(&grid);

        let glyph = HERO_M.anchor(&grid, viewport_h, params);
        glyph.reserve(&mut mask);

        let zone = section.and_then(|s| CircuitZone::from_section(s, &grid, params));
        let traces = match &zone {
            Some(zone) => circuit::generate(
                &grid,
                zone,
                &mut mask,
                theme.circuit_color(),
                params,
                &mut rng,
            ),
            None => Vec::new(),
        };

        let palette = theme.palette();
        let glyph_color = theme.glyph_color();
        let pad_color = theme.pad_color();
        let mut particles = Vec::new();

        for r in 0..grid.rows as i32 {
            for c in 0..grid.cols as i32 {
                let center = grid.cell_center(r, c);

                if glyph.in_padded_box(r, c) {
                    // Dots for the letterform, nothing for the padded void.
                    if glyph.is_glyph_cell(r, c) {
                        particles.push(Particle::at_rest(center, glyph_color, 2.5));
                    }
                    continue;
                }

                if zone.as_ref().is_some_and(|z| z.contains_row(r)) {
                    // Inside the schematic band only circuit cells get a dot,
                    // drawn as a small solder pad.
                    if mask.is_drawn(r, c) {
                        particles.push(Particle::at_rest(center, pad_color, 2.0));
                    }
                    continue;
                }

                let color = palette[rng.random_range(0..palette.len())];
                particles.push(Particle::at_rest(center, color, 2.5));
            }
        }

        debug!(
            rows = grid.rows,
            cols = grid.cols,
            particles = particles.len(),
            traces = traces.len(),
            circuit = zone.is_some(),
            "layout pass"
        );

        Self {
            grid,
            particles,
            traces,
        }
    }
}
