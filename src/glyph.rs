use eframe::egui::Vec2;
use rand::Rng;

use crate::grid::Grid;
use crate::stencil::{Stencil, BADGE_M};
use crate::types::{Particle, Theme};

const BADGE_PITCH: f32 = 30.0;
const BADGE_PADDING: f32 = 40.0;

/// Standalone letterform badge: one particle per stencil dot on its own
/// small surface, with its own pointer space. Shares the particle physics of
/// the backdrop but at the badge interaction radius.
#[derive(Clone, Debug)]
pub struct DotGlyph {
    pub particles: Vec<Particle>,
    pub size: Vec2,
}

impl DotGlyph {
    pub fn generate(theme: Theme, rng: &mut impl Rng) -> Self {
        Self::from_stencil(BADGE_M, theme, rng)
    }

    fn from_stencil(stencil: Stencil, theme: Theme, rng: &mut impl Rng) -> Self {
        let grid = Grid::with_dims(
            stencil.rows() as usize,
            stencil.cols() as usize,
            BADGE_PITCH,
            BADGE_PADDING,
        );
        let palette = theme.palette();
        let mut particles = Vec::new();
        for r in 0..stencil.rows() {
            for c in 0..stencil.cols() {
                if stencil.is_set(r, c) {
                    let color = palette[rng.random_range(0..palette.len())];
                    particles.push(Particle::at_rest(grid.cell_center(r, c), color, 2.5));
                }
            }
        }
        Self {
            particles,
            size: grid.surface_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, Rect};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn one_particle_per_stencil_dot() {
        let mut rng = StdRng::seed_from_u64(1);
        let glyph = DotGlyph::generate(Theme::Dark, &mut rng);
        let expected = (0..BADGE_M.rows())
            .flat_map(|r| (0..BADGE_M.cols()).map(move |c| (r, c)))
            .filter(|&(r, c)| BADGE_M.is_set(r, c))
            .count();
        assert_eq!(glyph.particles.len(), expected);
    }

    #[test]
    fn surface_covers_grid_plus_padding() {
        let mut rng = StdRng::seed_from_u64(1);
        let glyph = DotGlyph::generate(Theme::Light, &mut rng);
        assert_eq!(glyph.size.x, 13.0 * BADGE_PITCH + 2.0 * BADGE_PADDING);
        assert_eq!(glyph.size.y, 11.0 * BADGE_PITCH + 2.0 * BADGE_PADDING);

        let bounds = Rect::from_min_size(pos2(0.0, 0.0), glyph.size);
        for particle in &glyph.particles {
            assert!(bounds.contains(particle.origin));
        }
    }

    #[test]
    fn colors_come_from_the_theme_palette() {
        let mut rng = StdRng::seed_from_u64(9);
        let glyph = DotGlyph::generate(Theme::Dark, &mut rng);
        let palette = Theme::Dark.palette();
        assert!(glyph
            .particles
            .iter()
            .all(|p| palette.contains(&p.color)));
    }
}
