mod app;
mod dialogs;

use anyhow::Result;
use app::InventoryApp;
use eframe::egui;
use inventory_core::{get_settings_path, Settings};
use log::warn;

const TITLE: &str = "Inventory Management System";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings_path = get_settings_path()
        .inspect_err(|e| warn!("no settings location: {:#}", e))
        .ok();

    let settings = match &settings_path {
        Some(path) => Settings::load_from(path).unwrap_or_else(|e| {
            warn!("using default settings: {:#}", e);
            Settings::default()
        }),
        None => Settings::default(),
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_width, settings.window_height])
            .with_title(TITLE),
        ..Default::default()
    };

    eframe::run_native(
        TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(InventoryApp::new(cc, settings, settings_path)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to start the GUI: {}", e))
}
