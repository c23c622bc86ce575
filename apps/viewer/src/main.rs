mod backend;
mod dispatcher;
mod logging;
mod window;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use app_settings::ViewerSettings;
use clap::error::ErrorKind;
use clap::Parser;
use engine::{FilterPipeline, ImageEngine};
use tracing::{error, info, warn};

use crate::backend::{MinifbBackend, TextStyle};
use crate::window::{load_source, WindowController};

/// Show an image and cycle through pixel filters with the Left/Right arrow keys.
#[derive(Parser, Debug)]
#[command(name = "image-viewer", version, about)]
struct Args {
    /// Image file to display
    image: PathBuf,
}

fn main() -> ExitCode {
    logging::init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(1),
            };
        }
    };

    info!("Starting application...");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let settings = ViewerSettings::load().unwrap_or_else(|err| {
        warn!("Using default settings: {err}");
        ViewerSettings::default()
    });

    // A bad image must fail before any window opens.
    let source = load_source(&ImageEngine::new(), Some(args.image.as_path()))?;

    let backend = MinifbBackend::open(&settings).context("Failed to open viewer window")?;
    let overlay = TextStyle::from(&settings.overlay);

    let mut controller = WindowController::new(backend, source, FilterPipeline::builtin(), overlay);
    controller.run().context("Render loop failed")?;
    Ok(())
}
