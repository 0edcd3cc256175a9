mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::PredictorApp;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides `service_url` from predictor.toml and the environment.
    #[arg(long)]
    service_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = client_core::config::load_settings();
    if let Some(service_url) = args.service_url {
        settings.service_url = service_url;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Air Quality Predictor")
            .with_inner_size([820.0, 600.0])
            .with_min_inner_size([560.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Air Quality Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(PredictorApp::new(cmd_tx, ui_rx)))),
    )
}
