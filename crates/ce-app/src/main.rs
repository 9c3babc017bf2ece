//! County Explorer entry point

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod config;
mod demo;

use app::CountyExplorerApp;
use config::DashboardConfig;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = cli::CliArgs::parse();
    let config = DashboardConfig::resolve(&args)?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start the tokio runtime")?;

    info!("Starting County Explorer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        default_theme: if config.dark_mode { eframe::Theme::Dark } else { eframe::Theme::Light },
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "County Explorer",
        options,
        Box::new(move |cc| Box::new(CountyExplorerApp::new(cc, config, runtime))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
