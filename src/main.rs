//! Sales Dashboard - six fixed charts over literal sales tables
//!
//! Monthly revenue, product trends, quarterly share, cost scatter, a
//! departmental Pareto chart and a bubble chart, laid out in a 3x2 grid.

mod charts;
mod config;
mod data;
mod gui;
mod logging;
mod stats;

use anyhow::Context;
use config::DashboardConfig;
use data::DatasetRegistry;
use eframe::egui;
use gui::DashboardApp;

fn main() -> anyhow::Result<()> {
    logging::init();

    let config = DashboardConfig::default();
    let registry = DatasetRegistry::new().context("failed to build dataset registry")?;

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size)
            .with_title(config.page_title.clone()),
        ..Default::default()
    };

    let app_name = config.page_title.clone();
    eframe::run_native(
        &app_name,
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, registry, config)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))
}
