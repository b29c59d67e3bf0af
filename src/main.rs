//! Renewables Dashboard - Global Renewable Energy Capacity Explorer
//!
//! Loads a per-country renewable capacity CSV and shows an interactive
//! dashboard filtered by year and country.

mod charts;
mod config;
mod dashboard;
mod data;
mod gui;

use anyhow::{Context, Result};
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use gui::DashboardApp;
use std::path::Path;
use tracing::{info, Level};

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("Failed to load dashboard configuration")?;
    info!(data = %config.data_path.display(), "starting dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 950.0])
            .with_min_inner_size([1000.0, 700.0])
            .with_title("Renewables Dashboard"),
        ..Default::default()
    };

    eframe::run_native(
        "Renewables Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(DashboardApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the dashboard window: {e}"))
}
