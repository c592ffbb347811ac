use clap::Parser;
use eframe::egui;

use employee_dashboard::app::DashboardApp;
use employee_dashboard::config::Args;

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Employee Analytics Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(&args.data)))),
    )
}
