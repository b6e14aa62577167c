use anyhow::Context;
use eframe::egui;

use hoops_explorer::app::HoopsExplorerApp;
use hoops_explorer::config::ExplorerConfig;
use hoops_explorer::state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let state = AppState::with_http(ExplorerConfig::default()).context("building HTTP client")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "NBA Player Statistics Explorer",
        options,
        Box::new(move |cc| {
            // Install image loaders so egui can render the png logo.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(HoopsExplorerApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
