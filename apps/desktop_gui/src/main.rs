mod backend_bridge;
mod controller;
mod ui;

use client_core::settings::load_settings;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::DocSearchApp;

fn main() -> eframe::Result<()> {
    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("invalid settings: {err:#}");
            std::process::exit(2);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_str()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let placeholder = settings.placeholder_term.clone();
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Documentation Search")
            .with_inner_size([820.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Documentation Search",
        options,
        Box::new(|_cc| Ok(Box::new(DocSearchApp::new(cmd_tx, ui_rx, placeholder)))),
    )
}
