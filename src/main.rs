mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use app::LaunchDashApp;
use eframe::egui;

/// Data file used when no path is given on the command line.
const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    // The window only opens once the whole table has loaded.
    let store = match data::loader::load_file(&path) {
        Ok(store) => store,
        Err(e) => {
            let e = anyhow::Error::new(e)
                .context(format!("loading launch records from {}", path.display()));
            log::error!("{e:#}");
            return Err(e);
        }
    };
    log::info!(
        "Loaded {} launches from {} sites {:?}, payload {}..={} kg",
        store.len(),
        store.sites().len(),
        store.sites(),
        store.min_payload(),
        store.max_payload()
    );
    let store = Arc::new(store);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 900.0])
            .with_min_inner_size([600.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(store)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
    .context("running dashboard window")
}
