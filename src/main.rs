mod app;
mod cli;
mod color;
mod state;
mod ui;

use app::SelectorApp;
use clap::Parser;
use eframe::egui;

use fl_device_selector::source::open_source;

fn main() -> eframe::Result {
    env_logger::init();

    let cli = cli::Cli::parse();
    let source = open_source(&cli.source_config());
    log::info!("Device source: {}", source.describe());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "FL Device Selector",
        options,
        Box::new(move |_cc| Ok(Box::new(SelectorApp::new(source)))),
    )
}
