mod app;
mod audio;
mod cli;
mod comet;
mod constants;
mod error;
mod graphics;
mod interaction;
mod math;
mod particles;
mod render;
mod scene;
mod scheduler;
mod spinner;
mod starfield;
mod vertex;

use crate::error::{Error, Result};
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Logs go to a file because the terminal belongs to the effects.
/// Without `--log-file` nothing is recorded.
fn init_logging(args: &cli::Args) -> Result<()> {
    let Some(path) = &args.log_file else {
        return Ok(());
    };
    let file = File::create(path).map_err(|source| Error::LogFile {
        path: path.clone(),
        source,
    })?;
    let directive = args.log_level.as_deref().unwrap_or("stardrift=info");
    let filter = EnvFilter::from_default_env().add_directive(
        directive
            .parse()
            .map_err(|err| Error::LogFilter(format!("{directive}: {err}")))?,
    );
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))?;
    Ok(())
}

fn main() -> Result<()> {
    let args = cli::parse();
    init_logging(&args)?;
    app::run(&args)
}
