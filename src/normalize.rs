//! Stretching tiles to a fixed print page resolution.

use clap::ValueEnum;
use image::imageops::FilterType;
use image::DynamicImage;
use serde::Deserialize;

/// Target page size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageSize {
    /// Page width in pixels.
    pub width: u32,
    /// Page height in pixels.
    pub height: u32,
}

impl PageSize {
    /// A4 portrait at 300 DPI.
    pub const A4_300DPI: Self = Self::new(2480, 3508);

    /// A page of `width` x `height` pixels.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4_300DPI
    }
}

/// Resampling filter used when stretching a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeFilter {
    /// Nearest neighbour.
    Nearest,
    /// Linear.
    Triangle,
    /// Cubic.
    CatmullRom,
    /// Gaussian.
    Gaussian,
    /// Lanczos with window 3.
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::CatmullRom => FilterType::CatmullRom,
            ResizeFilter::Gaussian => FilterType::Gaussian,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Resize `tile` to exactly `page`, ignoring its aspect ratio.
///
/// A tile that already matches the page is returned as is.
#[must_use]
pub fn normalize(tile: DynamicImage, page: PageSize, filter: ResizeFilter) -> DynamicImage {
    if tile.width() == page.width && tile.height() == page.height {
        return tile;
    }
    tile.resize_exact(page.width, page.height, filter.into())
}
