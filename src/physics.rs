use eframe::egui::{pos2, Pos2};

use crate::types::{MotionParams, Particle, Trace};

/// Vertical slice of the document currently worth animating: the viewport
/// plus a margin above and below.
#[derive(Clone, Copy, Debug)]
pub struct ViewBand {
    pub min_y: f32,
    pub max_y: f32,
}

impl ViewBand {
    pub fn around_scroll(scroll_y: f32, viewport_h: f32, margin: f32) -> Self {
        Self {
            min_y: scroll_y - margin,
            max_y: scroll_y + viewport_h + margin,
        }
    }

    /// Everything passes; used by surfaces that are always fully visible.
    pub fn unbounded() -> Self {
        Self {
            min_y: f32::NEG_INFINITY,
            max_y: f32::INFINITY,
        }
    }

    pub fn shifted(&self, offset_y: f32) -> Self {
        Self {
            min_y: self.min_y - offset_y,
            max_y: self.max_y - offset_y,
        }
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.min_y && y <= self.max_y
    }
}

/// One tick of mouse repulsion plus spring return, mutating positions in
/// place. Particles outside the band are skipped entirely (they also stop
/// settling, which is invisible off screen).
pub fn step_particles(
    particles: &mut [Particle],
    pointer: Pos2,
    band: &ViewBand,
    motion: &MotionParams,
) {
    for particle in particles.iter_mut() {
        if !band.contains(particle.pos.y) {
            continue;
        }

        let mut x = particle.pos.x;
        let mut y = particle.pos.y;

        let dx = pointer.x - x;
        let dy = pointer.y - y;
        let distance = (dx * dx + dy * dy).sqrt();
        if distance < motion.interaction_radius && distance > 0.0 {
            let force = (motion.interaction_radius - distance) / motion.interaction_radius;
            x -= dx / distance * force * motion.repulsion_strength;
            y -= dy / distance * force * motion.repulsion_strength;
        }

        // Blended pull back toward the rest position; the lag is the look.
        x += (particle.origin.x - x) * motion.spring_stiffness;
        y += (particle.origin.y - y) * motion.spring_stiffness;

        particle.pos = pos2(x, y);
    }
}

/// Traces are static geometry; culling keys off one endpoint only.
pub fn trace_visible(trace: &Trace, band: &ViewBand) -> bool {
    band.contains(trace.a.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Particle, POINTER_OFFSCREEN};
    use eframe::egui::Color32;

    fn particle(x: f32, y: f32) -> Particle {
        Particle::at_rest(pos2(x, y), Color32::WHITE, 2.5)
    }

    #[test]
    fn pointer_inside_radius_pushes_particle_away() {
        let motion = MotionParams::default();
        let mut particles = [particle(100.0, 100.0)];
        let pointer = pos2(110.0, 100.0);
        step_particles(&mut particles, pointer, &ViewBand::unbounded(), &motion);
        // Pushed along -x, away from the pointer, further than the spring
        // pulls back in the same tick.
        assert!(particles[0].pos.x < 100.0);
        assert_eq!(particles[0].pos.y, 100.0);
    }

    #[test]
    fn pointer_outside_radius_leaves_rest_position_alone() {
        let motion = MotionParams::default();
        let mut particles = [particle(100.0, 100.0)];
        step_particles(
            &mut particles,
            POINTER_OFFSCREEN,
            &ViewBand::unbounded(),
            &motion,
        );
        assert_eq!(particles[0].pos, particles[0].origin);
    }

    #[test]
    fn displaced_particle_converges_back_to_origin() {
        let motion = MotionParams::default();
        let mut particles = [particle(200.0, 300.0)];
        particles[0].pos = pos2(240.0, 330.0);
        for _ in 0..200 {
            step_particles(
                &mut particles,
                POINTER_OFFSCREEN,
                &ViewBand::unbounded(),
                &motion,
            );
        }
        let offset = particles[0].pos - particles[0].origin;
        assert!(offset.length() < 1.0e-3, "still {offset:?} from origin");
    }

    #[test]
    fn particles_outside_band_are_frozen() {
        let motion = MotionParams::default();
        let band = ViewBand::around_scroll(1000.0, 800.0, 100.0);
        let mut particles = [particle(100.0, 100.0), particle(100.0, 1200.0)];
        particles[0].pos = pos2(150.0, 100.0);
        particles[1].pos = pos2(150.0, 1200.0);
        step_particles(&mut particles, POINTER_OFFSCREEN, &band, &motion);
        // Above the band: untouched. Inside: spring moved it.
        assert_eq!(particles[0].pos, pos2(150.0, 100.0));
        assert!(particles[1].pos.x < 150.0);
    }

    #[test]
    fn band_margin_extends_past_the_viewport() {
        let band = ViewBand::around_scroll(500.0, 700.0, 100.0);
        assert!(band.contains(400.0));
        assert!(band.contains(1300.0));
        assert!(!band.contains(399.9));
        assert!(!band.contains(1300.1));
    }

    #[test]
    fn trace_culling_keys_on_first_endpoint() {
        let band = ViewBand::around_scroll(0.0, 600.0, 100.0);
        let inside = Trace::new(pos2(0.0, 50.0), pos2(0.0, 5000.0), Color32::WHITE);
        let outside = Trace::new(pos2(0.0, 900.0), pos2(0.0, 50.0), Color32::WHITE);
        assert!(trace_visible(&inside, &band));
        assert!(!trace_visible(&outside, &band));
    }
}
