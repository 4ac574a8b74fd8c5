mod app;
mod layout;
mod model;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Relationship file to open at startup.
    #[arg(long)]
    import: Option<PathBuf>,

    /// Fixed layout seed; omit for a fresh seed on every run.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let model = match &args.import {
        Some(path) => match model::load_from_path(path) {
            Ok(model) => model,
            Err(err) => {
                log::warn!("{err:#}; starting empty");
                model::RelationModel::new()
            }
        },
        None => model::RelationModel::new(),
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "sociogram",
        options,
        Box::new(move |cc| Ok(Box::new(app::SociogramApp::new(cc, model, args.seed)))),
    )
}
