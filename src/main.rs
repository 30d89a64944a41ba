mod app;
mod color;
mod config;
mod data;
mod pareto;
mod state;
mod ui;

use std::path::PathBuf;

use app::RustyParetoApp;
use config::ViewerConfig;
use eframe::egui;
use state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let config = ViewerConfig::discover();
    let dataset = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.default_dataset.clone());

    let mut state = AppState::new(config);
    if let Some(path) = dataset {
        state.load_path(&path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 1000.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Pareto – Pareto Plot Generator",
        options,
        Box::new(|_cc| Ok(Box::new(RustyParetoApp::new(state)))),
    )
}
