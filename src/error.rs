//! Unified error type for rasterbate.

use std::path::PathBuf;

use thiserror::Error;

use crate::grid::Axis;

/// Errors that can occur while planning, cutting, or writing tiles.
#[derive(Debug, Error)]
pub enum TileError {
    /// A tile count or image dimension cannot be partitioned.
    #[error("Invalid partition: {0}")]
    InvalidPartition(String),

    /// A tile boundary falls outside the source image.
    #[error("Boundary {start}..{end} is outside the {axis} extent 0..{size}")]
    OutOfBounds {
        /// Axis the boundary belongs to.
        axis: Axis,
        /// Boundary start coordinate.
        start: u32,
        /// Boundary end coordinate.
        end: u32,
        /// Image extent along the axis.
        size: u32,
    },

    /// The requested output format is not known or cannot be encoded.
    #[error("Unsupported format '{format}'. Valid: {valid}")]
    UnsupportedFormat {
        /// The format string as given.
        format: String,
        /// Comma-separated list of accepted formats.
        valid: String,
    },

    /// The source image could not be opened or decoded.
    #[error("Failed to load image {}: {source}", path.display())]
    LoadImage {
        /// Path of the source image.
        path: PathBuf,
        /// Underlying decoder error.
        source: image::ImageError,
    },

    /// The output directory could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A tile could not be encoded or written.
    #[error("Failed to write tile {tile} to {}: {source}", path.display())]
    WriteTile {
        /// Human-readable tile label, e.g. `(2, 1)` or `#3`.
        tile: String,
        /// Destination file.
        path: PathBuf,
        /// Underlying encoder or I/O error.
        source: image::ImageError,
    },

    /// The cut-line preview could not be saved.
    #[error("Failed to save preview {}: {source}", path.display())]
    Preview {
        /// Destination file.
        path: PathBuf,
        /// Underlying encoder or I/O error.
        source: image::ImageError,
    },

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// The dry-run report could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
