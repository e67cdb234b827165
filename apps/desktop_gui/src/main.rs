mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::RandomPersonApp;

/// Desktop widget that fetches and shows a random person.
#[derive(Parser)]
#[command(name = "random-person", version)]
struct Args {
    /// Endpoint serving random user records.
    #[arg(long, env = "RANDOM_PERSON_API_URL", default_value = client_core::DEFAULT_API_URL)]
    api_url: String,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(args.api_url, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Random Person")
            .with_inner_size([360.0, 440.0])
            .with_min_inner_size([280.0, 360.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Random Person",
        options,
        Box::new(|_cc| Ok(Box::new(RandomPersonApp::new(cmd_tx, ui_rx)))),
    )
}
