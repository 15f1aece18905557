//! CLI argument parsing with clap.

use std::path::PathBuf;

use clap::Parser;

use crate::normalize::ResizeFilter;
use crate::partition::AxisMode;

/// Split an image into a grid of printable page tiles.
#[derive(Parser, Debug)]
#[command(name = "rasterbate", version, about)]
pub struct Cli {
    /// Source image to split.
    pub input: PathBuf,

    /// Axes to split: horizontal (columns), vertical (rows), or both.
    #[arg(short, long, value_enum)]
    pub mode: Option<AxisMode>,

    /// Number of tiles across the width.
    #[arg(short, long)]
    pub columns: Option<u32>,

    /// Number of tiles down the height.
    #[arg(short, long)]
    pub rows: Option<u32>,

    /// Output directory (defaults to `<input stem>_tiles`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: png, jpeg, bmp, gif, tiff, webp, tga.
    #[arg(short, long)]
    pub format: Option<String>,

    /// Stretch every tile to the page size.
    #[arg(long, overrides_with = "no_normalize")]
    pub normalize: bool,

    /// Keep tiles at their cropped size, even if the config enables normalizing.
    #[arg(long, overrides_with = "normalize")]
    pub no_normalize: bool,

    /// Page width in pixels for normalization.
    #[arg(long)]
    pub page_width: Option<u32>,

    /// Page height in pixels for normalization.
    #[arg(long)]
    pub page_height: Option<u32>,

    /// Resampling filter for normalization.
    #[arg(long, value_enum)]
    pub filter: Option<ResizeFilter>,

    /// Also save a copy of the source with the cut lines drawn in.
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Print the planned tiles as JSON instead of writing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether normalization was switched on or off on the command line.
    #[must_use]
    pub fn normalize_override(&self) -> Option<bool> {
        if self.normalize {
            Some(true)
        } else if self.no_normalize {
            Some(false)
        } else {
            None
        }
    }
}
