//! Rasterbate - split an image into printable page tiles.

mod cli;
mod config;
mod error;
mod extract;
mod grid;
mod job;
mod normalize;
mod output;
mod partition;
mod preview;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::TileError;
use crate::job::{load_source, TileJob};
use crate::preview::render_cut_lines;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("rasterbate=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rasterbate=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), TileError> {
    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(TileError::Config)?;
    tracing::debug!(path = %config_path.display(), "config loaded");

    // Every setting is validated before the source image is read.
    let job = TileJob::from_settings(cli, &config)?;
    let source = load_source(&cli.input)?;
    let tiles = job.plan(&source)?;

    if let Some(path) = &cli.preview {
        render_cut_lines(&source, &tiles)
            .save(path)
            .map_err(|source| TileError::Preview {
                path: path.clone(),
                source,
            })?;
        eprintln!("Preview: {}", path.display());
    }

    if cli.dry_run {
        println!("{}", serde_json::to_string_pretty(&job.report(&tiles))?);
        return Ok(());
    }

    let written = job.run(&source, &tiles)?;
    for path in &written {
        eprintln!("Saved: {}", path.display());
    }
    eprintln!(
        "Wrote {} {} tile(s) to {}",
        written.len(),
        job.output.format,
        job.output.directory.display()
    );

    Ok(())
}
