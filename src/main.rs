mod analysis;
mod app;
mod cli;
mod color;
mod data;
mod state;
mod ui;

use app::RetailDashboardApp;
use clap::Parser;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let args = cli::Args::parse();
    let initial_file = args.initial_file();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([args.width, args.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Retail Pricing and Sales Analysis",
        options,
        Box::new(move |_cc| Ok(Box::new(RetailDashboardApp::new(initial_file.as_deref())))),
    )
}
