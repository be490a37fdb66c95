#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use outline_gantt::app::GanttApp;
use outline_gantt::config::SettingsStore;
use outline_gantt::logging::init_logging;

fn main() -> eframe::Result<()> {
    let settings = SettingsStore::open_default();
    init_logging(&settings.settings.log_filter);
    tracing::info!(settings = %settings.path().display(), "starting Outline Gantt");

    let initial = std::env::args_os().nth(1).map(PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Outline Gantt"),
        ..Default::default()
    };

    eframe::run_native(
        "Outline Gantt",
        options,
        Box::new(move |cc| Ok(Box::new(GanttApp::new(cc, settings, initial)))),
    )
}
