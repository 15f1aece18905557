//! The validated tiling job and the pipeline that runs it.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use serde::Serialize;
use tracing::{debug, info};

use crate::cli::Cli;
use crate::config::Config;
use crate::error::TileError;
use crate::extract::{extract, TileArtifact};
use crate::normalize::{normalize, PageSize, ResizeFilter};
use crate::output::{base_name_for, write_tiles, Naming, OutputDescriptor, OutputFormat};
use crate::partition::{resolve, AxisMode, PartitionRequest, TileSpec};

/// Everything needed to tile one image, fixed before any pixel is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileJob {
    /// How many tiles to cut along which axes.
    pub request: PartitionRequest,
    /// Page size to stretch tiles to, or `None` to keep cropped sizes.
    pub page: Option<PageSize>,
    /// Resampling filter used when `page` is set.
    pub filter: ResizeFilter,
    /// Destination, format and naming of the tile files.
    pub output: OutputDescriptor,
}

/// One line of the dry-run report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedTile {
    /// `[column, row]`, both 0-based.
    pub index: [u32; 2],
    /// Left edge in source pixels.
    pub x: u32,
    /// Top edge in source pixels.
    pub y: u32,
    /// Cropped width in source pixels.
    pub width: u32,
    /// Cropped height in source pixels.
    pub height: u32,
    /// File the tile would be written to.
    pub file: PathBuf,
}

impl TileJob {
    /// Merge CLI flags over config file values and validate the result.
    ///
    /// # Errors
    ///
    /// Returns an error for zero tile counts, an unknown output format, or
    /// an empty page size.
    pub fn from_settings(cli: &Cli, config: &Config) -> Result<Self, TileError> {
        let defaults = &config.defaults;

        let mode = cli.mode.unwrap_or(defaults.mode);
        let request = PartitionRequest::new(
            mode,
            cli.columns.unwrap_or(defaults.columns),
            cli.rows.unwrap_or(defaults.rows),
        )?;

        let format: OutputFormat = cli
            .format
            .as_deref()
            .unwrap_or(defaults.format.as_str())
            .parse()?;

        let page = if cli.normalize_override().unwrap_or(defaults.normalize) {
            let page = PageSize::new(
                cli.page_width.unwrap_or(config.page.width),
                cli.page_height.unwrap_or(config.page.height),
            );
            if page.width == 0 || page.height == 0 {
                return Err(TileError::InvalidArgument(format!(
                    "page size must be at least 1x1 (got {}x{})",
                    page.width, page.height
                )));
            }
            Some(page)
        } else {
            None
        };

        let base_name = base_name_for(&cli.input);
        let directory = cli
            .output
            .clone()
            .or_else(|| defaults.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(format!("{base_name}_tiles")));
        let naming = match mode {
            AxisMode::Both => Naming::Grid,
            AxisMode::Horizontal | AxisMode::Vertical => Naming::Parts { base_name },
        };

        Ok(Self {
            request,
            page,
            filter: cli.filter.unwrap_or(defaults.filter),
            output: OutputDescriptor {
                directory,
                format,
                naming,
            },
        })
    }

    /// Compute the tile regions for `source`.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidPartition`] if the image is too small
    /// for the requested counts.
    pub fn plan(&self, source: &DynamicImage) -> Result<Vec<TileSpec>, TileError> {
        let (width, height) = source.dimensions();
        let tiles = resolve(width, height, &self.request)?;
        debug!(
            width,
            height,
            columns = self.request.columns(),
            rows = self.request.rows(),
            tiles = tiles.len(),
            "resolved partition"
        );
        Ok(tiles)
    }

    /// Crop every tile and stretch it to the page size if one is set.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::OutOfBounds`] if a region does not fit `source`.
    pub fn cut(
        &self,
        source: &DynamicImage,
        tiles: &[TileSpec],
    ) -> Result<Vec<TileArtifact>, TileError> {
        tiles
            .iter()
            .map(|spec| {
                let mut artifact = extract(source, spec)?;
                if let Some(page) = self.page {
                    artifact.image = normalize(artifact.image, page, self.filter);
                }
                Ok(artifact)
            })
            .collect()
    }

    /// Cut and write the planned `tiles` of `source`, returning the files written.
    ///
    /// # Errors
    ///
    /// Returns the first cropping or writing error.
    pub fn run(
        &self,
        source: &DynamicImage,
        tiles: &[TileSpec],
    ) -> Result<Vec<PathBuf>, TileError> {
        let artifacts = self.cut(source, tiles)?;
        let written = write_tiles(&artifacts, &self.output)?;
        info!(
            count = written.len(),
            dir = %self.output.directory.display(),
            "tiles written"
        );
        Ok(written)
    }

    /// Describe `tiles` without writing anything.
    #[must_use]
    pub fn report(&self, tiles: &[TileSpec]) -> Vec<PlannedTile> {
        tiles
            .iter()
            .enumerate()
            .map(|(position, spec)| PlannedTile {
                index: [spec.index.0, spec.index.1],
                x: spec.column.start,
                y: spec.row.start,
                width: spec.width(),
                height: spec.height(),
                file: self.output.path_for(spec, position),
            })
            .collect()
    }
}

/// Open and decode the source image.
///
/// # Errors
///
/// Returns [`TileError::LoadImage`] if the file is missing or not a
/// decodable image.
pub fn load_source(path: &Path) -> Result<DynamicImage, TileError> {
    image::open(path).map_err(|source| TileError::LoadImage {
        path: path.to_path_buf(),
        source,
    })
}
