#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

use sprint_timeline::settings::{self, AppSettings};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let settings_path = settings::settings_path();
    let settings = AppSettings::load(&settings_path);

    // RUST_LOG wins over the saved filter
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(settings = %settings_path.display(), "starting sprint board");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Sprint Board"),
        ..Default::default()
    };

    eframe::run_native(
        "Sprint Board",
        options,
        Box::new(|cc| Ok(Box::new(app::SprintBoardApp::new(cc, settings, settings_path)))),
    )
}
