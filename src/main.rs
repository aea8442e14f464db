mod cli;
mod color;
mod config;
mod error;
mod geometry;
mod ui;

use clap::Parser;
use log::info;

use crate::config::{APP_TITLE, Settings};
use crate::ui::app::App;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Initial color from the command line, black by default.
    let args = cli::Args::parse();
    let settings = Settings::default();
    info!("starting with color {:?}", args.color);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_transparent(true)
            .with_inner_size(settings.windowed_geometry.size())
            .with_position(settings.windowed_geometry.position()),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, settings, &args.color)))),
    )
}
