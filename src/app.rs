use eframe::egui::{
    self, pos2, Align2, Color32, CornerRadius, FontId, Pos2, Rect, Stroke, StrokeKind, Vec2,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::bubbles::{BubbleField, BubbleParams};
use crate::circuit::SectionRect;
use crate::field::FieldLayout;
use crate::glyph::DotGlyph;
use crate::physics::{self, ViewBand};
use crate::types::{LayoutParams, MotionParams, Theme, POINTER_OFFSCREEN};

// Demo page standing in for the portfolio: fixed sections stacked in a
// scroll area. The circuit zone tracks the "projects" section.
const SECTIONS: [(&str, f32); 5] = [
    ("hero", 900.0),
    ("experience", 760.0),
    ("projects", 980.0),
    ("media", 720.0),
    ("contact", 560.0),
];

const CIRCUIT_SECTION: &str = "projects";
const PROJECT_CARDS: usize = 3;

// Where the dot badge sits inside the hero section, in document space.
const BADGE_OFFSET: Vec2 = Vec2::new(60.0, 160.0);

fn section_rect(id: &str) -> Option<SectionRect> {
    let mut top = 0.0;
    for (name, height) in SECTIONS {
        if name == id {
            return Some(SectionRect { top, height });
        }
        top += height;
    }
    None
}

fn document_height() -> f32 {
    SECTIONS.iter().map(|(_, height)| height).sum()
}

pub struct BackdropApp {
    layout_params: LayoutParams,
    motion: MotionParams,
    badge_motion: MotionParams,
    bubble_params: BubbleParams,
    seed: u64,
    field: FieldLayout,
    badge: Option<DotGlyph>,
    bubbles: Option<BubbleField>,
    show_bubbles: bool,
    paused: bool,
    layout_dirty: bool,
    last_width: f32,
    last_doc_height: f32,
    last_viewport_h: f32,
    last_theme: Theme,
}

impl BackdropApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            layout_params: LayoutParams::default(),
            motion: MotionParams::default(),
            badge_motion: MotionParams::badge(),
            bubble_params: BubbleParams::default(),
            seed: 0xC19C_0177,
            field: FieldLayout::empty(),
            badge: None,
            bubbles: None,
            show_bubbles: false,
            paused: false,
            layout_dirty: true,
            last_width: 0.0,
            last_doc_height: 0.0,
            last_viewport_h: 0.0,
            last_theme: Theme::Dark,
        }
    }

    fn regenerate(&mut self, width: f32, doc_height: f32, viewport_h: f32, theme: Theme) {
        self.field = FieldLayout::generate(
            width,
            doc_height,
            viewport_h,
            theme,
            section_rect(CIRCUIT_SECTION),
            &self.layout_params,
            self.seed,
        );
        // Same seed family as the field, offset so the badge rolls its own
        // colors.
        let mut badge_rng = StdRng::seed_from_u64(self.seed ^ 0x9E37_79B9_7F4A_7C15);
        self.badge = Some(DotGlyph::generate(theme, &mut badge_rng));

        self.last_width = width;
        self.last_doc_height = doc_height;
        self.last_viewport_h = viewport_h;
        self.last_theme = theme;
        self.layout_dirty = false;
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Layout");
        ui.horizontal(|ui| {
            ui.label("seed");
            if ui
                .add(egui::DragValue::new(&mut self.seed).speed(1))
                .changed()
            {
                self.layout_dirty = true;
            }
            if ui.button("randomize").clicked() {
                self.seed = rand::random();
                self.layout_dirty = true;
            }
        });
        if ui
            .add(egui::Slider::new(&mut self.layout_params.walker_count, 0..=120).text("walkers"))
            .changed()
        {
            self.layout_dirty = true;
        }
        if ui.button("Regenerate layout").clicked() {
            self.layout_dirty = true;
        }

        ui.separator();
        ui.heading("Motion");
        ui.add(
            egui::Slider::new(&mut self.motion.interaction_radius, 40.0..=240.0)
                .text("interaction radius"),
        );
        ui.add(
            egui::Slider::new(&mut self.motion.repulsion_strength, 0.0..=60.0).text("repulsion"),
        );
        ui.add(egui::Slider::new(&mut self.motion.spring_stiffness, 0.01..=0.5).text("spring"));

        ui.horizontal(|ui| {
            if ui
                .button(if self.paused { "Resume" } else { "Pause" })
                .clicked()
            {
                self.paused = !self.paused;
            }
            ui.checkbox(&mut self.show_bubbles, "bubbles");
        });

        ui.separator();
        ui.heading("Theme");
        ui.horizontal(|ui| {
            if ui.button("Dark").clicked() {
                ctx.set_theme(egui::Theme::Dark);
            }
            if ui.button("Light").clicked() {
                ctx.set_theme(egui::Theme::Light);
            }
        });

        ui.separator();
        ui.label(format!(
            "grid: {} x {}",
            self.field.grid.rows, self.field.grid.cols
        ));
        ui.label(format!("particles: {}", self.field.particles.len()));
        ui.label(format!("traces: {}", self.field.traces.len()));
    }

    fn draw_page_content(&self, painter: &egui::Painter, to_screen: Vec2, theme: Theme) {
        let heading_color = match theme {
            Theme::Dark => Color32::from_gray(220),
            Theme::Light => Color32::from_gray(40),
        };
        let card_fill = match theme {
            Theme::Dark => Color32::from_rgba_unmultiplied(255, 255, 255, 14),
            Theme::Light => Color32::from_rgba_unmultiplied(0, 39, 76, 14),
        };
        let card_stroke = Stroke::new(1.0, heading_color.gamma_multiply(0.4));

        let mut top = 0.0;
        for (name, height) in SECTIONS {
            painter.text(
                pos2(40.0, top + 40.0) + to_screen,
                Align2::LEFT_TOP,
                name,
                FontId::proportional(28.0),
                heading_color,
            );

            if name == CIRCUIT_SECTION {
                // Placeholder cards occupying the exclusion rectangle, so the
                // schematic visibly routes around the readable content.
                let desktop = self.last_width > self.layout_params.desktop_breakpoint;
                let header = if desktop {
                    self.layout_params.header_offset_desktop
                } else {
                    self.layout_params.header_offset_narrow
                };
                let cards_top = top + self.layout_params.cards_top_offset + header;
                let cards_bottom = top + height - self.layout_params.cards_bottom_offset;
                let left = self.last_width * self.layout_params.exclusion_col_start;
                let right = self.last_width * self.layout_params.exclusion_col_end;
                let gap = 20.0;
                let card_width =
                    (right - left - gap * (PROJECT_CARDS as f32 - 1.0)) / PROJECT_CARDS as f32;
                for i in 0..PROJECT_CARDS {
                    let x = left + i as f32 * (card_width + gap);
                    let rect = Rect::from_min_max(
                        pos2(x, cards_top) + to_screen,
                        pos2(x + card_width, cards_bottom) + to_screen,
                    );
                    painter.rect(
                        rect,
                        CornerRadius::same(8),
                        card_fill,
                        card_stroke,
                        StrokeKind::Inside,
                    );
                }
            }

            top += height;
        }
    }

    fn draw_field(&self, painter: &egui::Painter, to_screen: Vec2, band: &ViewBand) {
        for trace in &self.field.traces {
            if !physics::trace_visible(trace, band) {
                continue;
            }
            painter.line_segment(
                [trace.a + to_screen, trace.b + to_screen],
                Stroke::new(trace.width, trace.color),
            );
        }
        for particle in &self.field.particles {
            if !band.contains(particle.pos.y) {
                continue;
            }
            painter.circle_filled(particle.pos + to_screen, particle.radius, particle.color);
        }
    }

    fn draw_bubbles(&self, painter: &egui::Painter, origin: Pos2) {
        let Some(bubbles) = &self.bubbles else {
            return;
        };
        for bubble in &bubbles.bubbles {
            let center = origin + bubble.pos.to_vec2();
            painter.circle_filled(center, bubble.radius, bubble.fill_color());
            painter.circle_stroke(
                center,
                bubble.radius,
                Stroke::new(2.0, bubble.ring_color()),
            );
        }
    }
}

impl eframe::App for BackdropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let theme = if ctx.style().visuals.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        };

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.draw_controls(ui, ctx);
                    });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            let viewport_h = ui.available_height();
            let width = ui.available_width();
            let doc_height = document_height().max(viewport_h);
            let viewport_rect = ui.max_rect();

            let output = egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let (rect, _) = ui
                        .allocate_exact_size(egui::vec2(width, doc_height), egui::Sense::hover());
                    rect
                });
            let page_rect = output.inner;
            let scroll_y = output.state.offset.y;

            // A layout pass replaces the particle and trace lists outright;
            // it runs between frames, never mid-draw.
            if self.layout_dirty
                || width != self.last_width
                || doc_height != self.last_doc_height
                || viewport_h != self.last_viewport_h
                || theme != self.last_theme
            {
                self.regenerate(width, doc_height, viewport_h, theme);
            }

            // Pointer events land between ticks; the frame just reads the
            // latest document-space position, or the sentinel when absent.
            let pointer = ctx
                .input(|i| i.pointer.hover_pos())
                .map(|p| p - page_rect.min.to_vec2())
                .unwrap_or(POINTER_OFFSCREEN);

            let band = ViewBand::around_scroll(scroll_y, viewport_h, self.motion.cull_margin);
            if !self.paused {
                physics::step_particles(&mut self.field.particles, pointer, &band, &self.motion);
            }

            let to_screen = page_rect.min.to_vec2();
            let painter = ui.painter().clone();
            self.draw_field(&painter, to_screen, &band);
            self.draw_page_content(&painter, to_screen, theme);

            // Badge glyph inside the hero section, in its own local space.
            if let Some(hero) = section_rect("hero") {
                let badge_origin = pos2(BADGE_OFFSET.x, hero.top + BADGE_OFFSET.y);
                if let Some(badge) = &mut self.badge {
                    let local_pointer = pointer - badge_origin.to_vec2();
                    let local_band = band.shifted(badge_origin.y);
                    if !self.paused {
                        physics::step_particles(
                            &mut badge.particles,
                            local_pointer,
                            &local_band,
                            &self.badge_motion,
                        );
                    }
                    let badge_screen = (badge_origin + to_screen).to_vec2();
                    for particle in &badge.particles {
                        painter.circle_filled(
                            particle.pos + badge_screen,
                            particle.radius,
                            particle.color,
                        );
                    }
                }
            }

            // Bubble overlay lives in viewport space, over the page.
            if self.show_bubbles {
                if self.bubbles.is_none() {
                    let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(1));
                    self.bubbles = Some(BubbleField::generate(
                        viewport_rect.size(),
                        &[Color32::from_rgb(59, 130, 246)],
                        &self.bubble_params,
                        &mut rng,
                    ));
                }
                if !self.paused {
                    let viewport_pointer = ctx
                        .input(|i| i.pointer.hover_pos())
                        .map(|p| p - viewport_rect.min.to_vec2())
                        .unwrap_or(POINTER_OFFSCREEN);
                    if let Some(bubbles) = &mut self.bubbles {
                        bubbles.step(viewport_pointer, viewport_rect.size(), &self.bubble_params);
                    }
                }
                self.draw_bubbles(&painter, viewport_rect.min);
            } else {
                self.bubbles = None;
            }
        });

        ctx.request_repaint();
    }
}
