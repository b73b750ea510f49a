use eframe::egui::{Color32, Pos2};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

// Background dots pick uniformly from these, so repeating an entry weights
// it (the light palette leans blue on purpose).
const DARK_PALETTE: [Color32; 2] = [
    Color32::from_rgb(255, 203, 5),
    Color32::from_rgb(50, 150, 255),
];
const LIGHT_PALETTE: [Color32; 3] = [
    Color32::from_rgb(0, 39, 76),
    Color32::from_rgb(0, 39, 76),
    Color32::from_rgb(220, 165, 20),
];

impl Theme {
    pub fn palette(self) -> &'static [Color32] {
        match self {
            Theme::Dark => &DARK_PALETTE,
            Theme::Light => &LIGHT_PALETTE,
        }
    }

    pub fn circuit_color(self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgba_unmultiplied(255, 255, 255, 191),
            Theme::Light => Color32::from_rgba_unmultiplied(0, 0, 0, 191),
        }
    }

    pub fn pad_color(self) -> Color32 {
        match self {
            Theme::Dark => Color32::WHITE,
            Theme::Light => Color32::BLACK,
        }
    }

    pub fn glyph_color(self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(255, 203, 5),
            Theme::Light => Color32::from_rgb(0, 39, 76),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Pos2,
    pub origin: Pos2,
    pub color: Color32,
    pub radius: f32,
}

impl Particle {
    pub fn at_rest(origin: Pos2, color: Color32, radius: f32) -> Self {
        Self {
            pos: origin,
            origin,
            color,
            radius,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trace {
    pub a: Pos2,
    pub b: Pos2,
    pub color: Color32,
    pub width: f32,
}

pub const DEFAULT_TRACE_WIDTH: f32 = 1.5;

impl Trace {
    pub fn new(a: Pos2, b: Pos2, color: Color32) -> Self {
        Self {
            a,
            b,
            color,
            width: DEFAULT_TRACE_WIDTH,
        }
    }

    pub fn with_width(a: Pos2, b: Pos2, color: Color32, width: f32) -> Self {
        Self { a, b, color, width }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct LayoutParams {
    pub pitch: f32,
    pub edge_padding: f32,
    pub glyph_box_padding: i32,
    pub desktop_breakpoint: f32,
    pub walker_count: usize,
    pub spawn_attempts: usize,
    pub min_steps: usize,
    pub max_steps: usize,
    pub ground_cap_chance: f32,
    // Empirically tuned pixel offsets keeping circuitry off readable content.
    pub header_offset_desktop: f32,
    pub header_offset_narrow: f32,
    pub zone_top_margin: f32,
    pub zone_bottom_margin: f32,
    pub cards_top_offset: f32,
    pub cards_bottom_offset: f32,
    pub exclusion_col_start: f32,
    pub exclusion_col_end: f32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            pitch: 30.0,
            edge_padding: 0.0,
            glyph_box_padding: 2,
            desktop_breakpoint: 768.0,
            walker_count: 60,
            spawn_attempts: 10,
            min_steps: 30,
            max_steps: 80,
            ground_cap_chance: 0.3,
            header_offset_desktop: 100.0,
            header_offset_narrow: 80.0,
            zone_top_margin: 50.0,
            zone_bottom_margin: 50.0,
            cards_top_offset: 180.0,
            cards_bottom_offset: 100.0,
            exclusion_col_start: 0.15,
            exclusion_col_end: 0.85,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct MotionParams {
    pub interaction_radius: f32,
    pub repulsion_strength: f32,
    pub spring_stiffness: f32,
    pub cull_margin: f32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            interaction_radius: 120.0,
            repulsion_strength: 20.0,
            spring_stiffness: 0.1,
            cull_margin: 100.0,
        }
    }
}

impl MotionParams {
    // The badge glyph reacts in a tighter, gentler radius than the backdrop.
    pub fn badge() -> Self {
        Self {
            interaction_radius: 80.0,
            repulsion_strength: 15.0,
            ..Self::default()
        }
    }
}

// Pointer sentinel used when the cursor is off the surface; far enough away
// that no interaction radius can reach it.
pub const POINTER_OFFSCREEN: Pos2 = Pos2::new(-1000.0, -1000.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_are_static_and_weighted() {
        let dark = Theme::Dark.palette();
        assert_eq!(dark, &[
            Color32::from_rgb(255, 203, 5),
            Color32::from_rgb(50, 150, 255),
        ]);
        // Blue appears twice so two thirds of light-mode dots come out blue.
        let light = Theme::Light.palette();
        assert_eq!(light.len(), 3);
        assert_eq!(light[0], light[1]);
        assert_eq!(light[2], Color32::from_rgb(220, 165, 20));
    }
}
