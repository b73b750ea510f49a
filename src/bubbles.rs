use eframe::egui::{pos2, vec2, Color32, Pos2, Vec2};
use rand::Rng;

#[derive(Clone, Copy, Debug)]
pub struct BubbleParams {
    pub count: usize,
    pub min_radius: f32,
    pub radius_spread: f32,
    pub gravity: f32,
    pub friction: f32,
    pub wall_damping: f32,
    pub pointer_radius: f32,
    pub pointer_strength: f32,
}

impl Default for BubbleParams {
    fn default() -> Self {
        Self {
            count: 40,
            min_radius: 40.0,
            radius_spread: 60.0,
            gravity: 0.2,
            friction: 0.95,
            wall_damping: 0.6,
            pointer_radius: 200.0,
            pointer_strength: 0.5,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Bubble {
    pub pos: Pos2,
    pub velocity: Vec2,
    pub radius: f32,
    pub mass: f32,
    pub color: Color32,
}

impl Bubble {
    // Translucency comes from the alpha channel alone; the ring keeps the
    // full-strength hue of its base color.
    pub fn fill_color(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.color.r(), self.color.g(), self.color.b(), 26)
    }

    pub fn ring_color(&self) -> Color32 {
        Color32::from_rgba_unmultiplied(self.color.r(), self.color.g(), self.color.b(), 153)
    }
}

/// Free-floating translucent rings bouncing around the viewport. Unlike the
/// grid particles these have momentum and gravity; the pointer shoves them
/// instead of displacing them.
#[derive(Clone, Debug)]
pub struct BubbleField {
    pub bubbles: Vec<Bubble>,
}

impl BubbleField {
    pub fn generate(
        size: Vec2,
        colors: &[Color32],
        params: &BubbleParams,
        rng: &mut impl Rng,
    ) -> Self {
        let bubbles = (0..params.count)
            .map(|index| Bubble {
                pos: pos2(
                    rng.random::<f32>() * size.x,
                    rng.random::<f32>() * size.y,
                ),
                velocity: vec2(
                    (rng.random::<f32>() - 0.5) * 2.0,
                    (rng.random::<f32>() - 0.5) * 2.0,
                ),
                radius: params.min_radius + rng.random::<f32>() * params.radius_spread,
                mass: 0.5 + rng.random::<f32>() * 0.5,
                color: colors[index % colors.len()],
            })
            .collect();
        Self { bubbles }
    }

    /// One tick: pointer shove, gravity, integration, friction, wall bounce.
    /// `size` is the current viewport so the floor tracks resizes.
    pub fn step(&mut self, pointer: Pos2, size: Vec2, params: &BubbleParams) {
        for bubble in &mut self.bubbles {
            let dx = pointer.x - bubble.pos.x;
            let dy = pointer.y - bubble.pos.y;
            let distance = (dx * dx + dy * dy).sqrt();
            if distance < params.pointer_radius && distance > 0.0 {
                let force = (params.pointer_radius - distance) / params.pointer_radius;
                bubble.velocity.x -= dx / distance * force * params.pointer_strength;
                bubble.velocity.y -= dy / distance * force * params.pointer_strength;
            }

            bubble.velocity.y += params.gravity * bubble.mass;
            bubble.pos += bubble.velocity;
            bubble.velocity *= params.friction;

            if bubble.pos.x < bubble.radius {
                bubble.pos.x = bubble.radius;
                bubble.velocity.x *= -params.wall_damping;
            } else if bubble.pos.x > size.x - bubble.radius {
                bubble.pos.x = size.x - bubble.radius;
                bubble.velocity.x *= -params.wall_damping;
            }

            if bubble.pos.y > size.y - bubble.radius {
                bubble.pos.y = size.y - bubble.radius;
                bubble.velocity.y *= -params.wall_damping;
            }
        }
    }
}
