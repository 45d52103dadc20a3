use clap::Parser;
use eframe::egui;

use heartgrid::app::HeartgridApp;
use heartgrid::config::Cli;
use heartgrid::state::AppState;

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();
    let state = AppState::startup(&cli);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 960.0])
            .with_min_inner_size([720.0, 540.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Heartgrid – Mental Health Survey Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(HeartgridApp::new(state)))),
    )
}
