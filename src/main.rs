mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::DiagnosisApp;
use clap::Parser;
use eframe::egui;
use rare_disease_assistant::{load_settings, logging, Loader};

#[derive(Parser, Debug)]
#[command(name = "rare-disease-assistant", version, about)]
struct Args {
    /// Settings file (defaults to the platform config directory).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref())?;
    logging::init(settings.logging.file.as_deref())?;
    log::info!("App started");

    let loader = Loader::from_settings(&settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 750.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rare Disease Diagnosis Assistant",
        options,
        Box::new(|_cc| Ok(Box::new(DiagnosisApp::new(loader)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {e}"))
}
