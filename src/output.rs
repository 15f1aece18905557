//! Tile file naming, format selection, and saving.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use image::{ColorType, DynamicImage, ImageFormat};
use tracing::debug;

use crate::error::TileError;
use crate::extract::TileArtifact;
use crate::partition::TileSpec;

/// Formats accepted on the command line, in the order they are listed to users.
const KNOWN_FORMATS: &[ImageFormat] = &[
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Bmp,
    ImageFormat::Gif,
    ImageFormat::Tiff,
    ImageFormat::WebP,
    ImageFormat::Tga,
];

/// An image format the encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat(ImageFormat);

impl OutputFormat {
    /// The underlying `image` crate format.
    #[must_use]
    pub fn image_format(self) -> ImageFormat {
        self.0
    }

    /// File extension written for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        self.0.extensions_str().first().copied().unwrap_or("img")
    }

    fn valid_list() -> String {
        KNOWN_FORMATS
            .iter()
            .filter(|f| f.writing_enabled())
            .filter_map(|f| f.extensions_str().first().copied())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self(ImageFormat::Png)
    }
}

impl FromStr for OutputFormat {
    type Err = TileError;

    /// Parse a format name or extension such as `png`, `jpeg` or `jpg`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.').to_ascii_lowercase();
        ImageFormat::from_extension(&name)
            .filter(|f| KNOWN_FORMATS.contains(f) && f.writing_enabled())
            .map(Self)
            .ok_or_else(|| TileError::UnsupportedFormat {
                format: s.to_string(),
                valid: Self::valid_list(),
            })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How tile files are named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Naming {
    /// `{base_name}_part_{n}.{ext}` with a 1-based running number.
    Parts {
        /// Stem shared by every file, usually the source file's stem.
        base_name: String,
    },
    /// `tile_{i}_{j}.{ext}` with 0-based column and row indices.
    Grid,
}

impl Naming {
    /// File name for the tile at `position` (0-based, in write order).
    #[must_use]
    pub fn file_name(&self, spec: &TileSpec, position: usize, format: OutputFormat) -> String {
        let ext = format.extension();
        match self {
            Self::Parts { base_name } => format!("{base_name}_part_{}.{ext}", position + 1),
            Self::Grid => format!("tile_{}_{}.{ext}", spec.index.0, spec.index.1),
        }
    }

    fn label(&self, spec: &TileSpec, position: usize) -> String {
        match self {
            Self::Parts { .. } => format!("#{}", position + 1),
            Self::Grid => format!("({}, {})", spec.index.0, spec.index.1),
        }
    }
}

/// Where and how tiles are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDescriptor {
    /// Destination directory, created if missing.
    pub directory: PathBuf,
    /// Encoding for every tile.
    pub format: OutputFormat,
    /// File naming scheme.
    pub naming: Naming,
}

impl OutputDescriptor {
    /// Full destination path for one tile.
    #[must_use]
    pub fn path_for(&self, spec: &TileSpec, position: usize) -> PathBuf {
        self.directory.join(self.naming.file_name(spec, position, self.format))
    }
}

/// Derive a base name for part files from the source image path.
///
/// Falls back to `image` when the path has no usable stem.
#[must_use]
pub fn base_name_for(source: &Path) -> String {
    source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "image".to_string())
}

/// Save every artifact into the descriptor's directory.
///
/// Tiles are written one after another. A failure stops the loop and
/// names the failing tile; files written before it are left in place.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a tile cannot
/// be encoded or written.
pub fn write_tiles(
    artifacts: &[TileArtifact],
    descriptor: &OutputDescriptor,
) -> Result<Vec<PathBuf>, TileError> {
    std::fs::create_dir_all(&descriptor.directory).map_err(|source| TileError::CreateDir {
        path: descriptor.directory.clone(),
        source,
    })?;

    let mut written = Vec::with_capacity(artifacts.len());
    for (position, artifact) in artifacts.iter().enumerate() {
        let path = descriptor.path_for(&artifact.spec, position);
        let saved = save_tile(&artifact.image, descriptor.format, &path);
        saved.map_err(|source| TileError::WriteTile {
            tile: descriptor.naming.label(&artifact.spec, position),
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "wrote tile");
        written.push(path);
    }
    Ok(written)
}

/// Encode one image, converting it first when the encoder cannot take its
/// colour type.
fn save_tile(
    image: &DynamicImage,
    format: OutputFormat,
    path: &Path,
) -> Result<(), image::ImageError> {
    let target = encodable_color(image.color(), format.image_format());
    if target == image.color() {
        return image.save_with_format(path, format.image_format());
    }
    debug!(from = ?image.color(), to = ?target, "converting tile");
    convert(image, target).save_with_format(path, format.image_format())
}

/// The closest colour type `format`'s encoder accepts for `color`.
///
/// PNG and TIFF keep 16-bit samples; JPEG drops alpha; GIF only takes
/// 8-bit RGB(A). The remaining formats take 8-bit gray or RGB, with or
/// without alpha.
fn encodable_color(color: ColorType, format: ImageFormat) -> ColorType {
    let gray = !color.has_color();
    let alpha = color.has_alpha();
    match format {
        ImageFormat::Png | ImageFormat::Tiff => match color {
            ColorType::Rgb32F => ColorType::Rgb16,
            ColorType::Rgba32F => ColorType::Rgba16,
            // TIFF has no gray-alpha encoder.
            ColorType::La8 if format == ImageFormat::Tiff => ColorType::Rgba8,
            ColorType::La16 if format == ImageFormat::Tiff => ColorType::Rgba16,
            other => other,
        },
        ImageFormat::Jpeg if gray => ColorType::L8,
        ImageFormat::Jpeg => ColorType::Rgb8,
        ImageFormat::Gif if alpha => ColorType::Rgba8,
        ImageFormat::Gif => ColorType::Rgb8,
        _ => match (gray, alpha) {
            (true, false) => ColorType::L8,
            (true, true) => ColorType::La8,
            (false, false) => ColorType::Rgb8,
            (false, true) => ColorType::Rgba8,
        },
    }
}

fn convert(image: &DynamicImage, color: ColorType) -> DynamicImage {
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(image.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(image.to_luma_alpha8()),
        ColorType::Rgba8 => DynamicImage::ImageRgba8(image.to_rgba8()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(image.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(image.to_rgba16()),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}
