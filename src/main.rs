mod app;
mod bubbles;
mod circuit;
mod field;
mod glyph;
mod grid;
mod physics;
mod stencil;
mod types;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    tracing::info!("starting circuit backdrop");

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([480.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Circuit Backdrop",
        options,
        Box::new(|cc| Ok(Box::new(app::BackdropApp::new(cc)))),
    )
}
