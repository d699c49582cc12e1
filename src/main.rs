mod app;
mod color;
mod config;
mod data;
mod events;
mod figure;
mod hover;
mod state;
mod ui;

use anyhow::Context;
use app::DashboardApp;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();
    let state = match startup_state(config) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Startup failed: {e:#}");
            return Err(e);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Normative Modeling Evaluation Metrics Viz",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            // Install image loaders so tooltips can show remote png/jpg.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::new(state)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("running UI: {e}"))
}

/// Load the startup table and derive the four figures. Any failure here is
/// fatal: nothing can be drawn without them.
fn startup_state(config: DashboardConfig) -> anyhow::Result<AppState> {
    let source = config.data_source.clone();
    let table = data::loader::load(&source, config.fetch_timeout)?;
    log::info!("Loaded {} ROIs from {source}", table.len());

    AppState::new(config, source.to_string(), table).context("building figures")
}
