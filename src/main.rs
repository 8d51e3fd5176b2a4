mod analytics;
mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::EstateLensApp;
use clap::Parser;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let config = Config::parse();
    log::debug!("{config:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Estate Lens – Real Estate Analytics",
        options,
        Box::new(move |_cc| Ok(Box::new(EstateLensApp::new(&config)))),
    )
}
