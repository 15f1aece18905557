//! Rendering cut lines over the source image.

use std::collections::BTreeSet;

use image::{DynamicImage, Rgba, RgbaImage};

use crate::partition::TileSpec;

/// Colour of the drawn cut lines.
pub const LINE_COLOR: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Copy `source` and draw a 1-pixel line at every interior cut in `tiles`.
///
/// Columns get a vertical line at their left edge and rows a horizontal
/// line at their top edge. Edges at 0 are the image border and are skipped.
#[must_use]
pub fn render_cut_lines(source: &DynamicImage, tiles: &[TileSpec]) -> RgbaImage {
    let mut canvas = source.to_rgba8();
    let (width, height) = canvas.dimensions();

    let xs: BTreeSet<u32> = tiles
        .iter()
        .map(|t| t.column.start)
        .filter(|&x| x > 0)
        .collect();
    let ys: BTreeSet<u32> = tiles
        .iter()
        .map(|t| t.row.start)
        .filter(|&y| y > 0)
        .collect();

    for &x in &xs {
        for y in 0..height {
            canvas.put_pixel(x, y, LINE_COLOR);
        }
    }
    for &y in &ys {
        for x in 0..width {
            canvas.put_pixel(x, y, LINE_COLOR);
        }
    }
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{resolve, AxisMode, PartitionRequest};

    fn tiles(mode: AxisMode, columns: u32, rows: u32, width: u32, height: u32) -> Vec<TileSpec> {
        let request = PartitionRequest::new(mode, columns, rows).unwrap();
        resolve(width, height, &request).unwrap()
    }

    #[test]
    fn grid_lines_at_cuts() {
        let source = DynamicImage::new_rgb8(30, 20);
        let out = render_cut_lines(&source, &tiles(AxisMode::Both, 3, 2, 30, 20));

        for y in 0..20 {
            assert_eq!(*out.get_pixel(10, y), LINE_COLOR);
            assert_eq!(*out.get_pixel(20, y), LINE_COLOR);
        }
        for x in 0..30 {
            assert_eq!(*out.get_pixel(x, 10), LINE_COLOR);
        }
        assert_eq!(*out.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*out.get_pixel(9, 9), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn horizontal_mode_draws_only_vertical_lines() {
        let source = DynamicImage::new_rgb8(10, 8);
        let out = render_cut_lines(&source, &tiles(AxisMode::Horizontal, 3, 4, 10, 8));

        let red: Vec<_> = out
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == LINE_COLOR)
            .collect();
        // Cuts at x = 3 and x = 6, each the full 8 px tall.
        assert_eq!(red.len(), 16);
        assert!(red.iter().all(|(x, _, _)| *x == 3 || *x == 6));
    }

    #[test]
    fn single_tile_has_no_lines() {
        let source = DynamicImage::new_rgb8(5, 5);
        let out = render_cut_lines(&source, &tiles(AxisMode::Both, 1, 1, 5, 5));
        assert!(out.pixels().all(|p| *p != LINE_COLOR));
    }
}
