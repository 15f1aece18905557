//! Cropping tile regions out of the source image.

use image::{DynamicImage, GenericImageView};

use crate::error::TileError;
use crate::grid::{Axis, Boundary};
use crate::partition::TileSpec;

/// A cropped tile together with the region it came from.
#[derive(Debug, Clone)]
pub struct TileArtifact {
    /// Where in the source this tile was cut.
    pub spec: TileSpec,
    /// Owned pixels of the tile, possibly resized.
    pub image: DynamicImage,
}

/// Copy the region described by `spec` out of `source`.
///
/// # Errors
///
/// Returns [`TileError::OutOfBounds`] if either boundary is empty or
/// reaches past the image edge.
pub fn extract(source: &DynamicImage, spec: &TileSpec) -> Result<TileArtifact, TileError> {
    let (width, height) = source.dimensions();
    check(spec.column, width, Axis::Horizontal)?;
    check(spec.row, height, Axis::Vertical)?;

    let image = source.crop_imm(
        spec.column.start,
        spec.row.start,
        spec.width(),
        spec.height(),
    );
    Ok(TileArtifact { spec: *spec, image })
}

fn check(boundary: Boundary, size: u32, axis: Axis) -> Result<(), TileError> {
    if boundary.start < boundary.end && boundary.end <= size {
        Ok(())
    } else {
        Err(TileError::OutOfBounds {
            axis,
            start: boundary.start,
            end: boundary.end,
            size,
        })
    }
}

#[cfg(test)]
mod tests {
    use image::{GenericImage, Rgba, RgbaImage};

    use super::*;
    use crate::partition::{resolve, AxisMode, PartitionRequest};

    /// Every pixel encodes its own coordinates so misplaced copies show up.
    fn coordinate_image(width: u32, height: u32) -> DynamicImage {
        #[allow(clippy::cast_possible_truncation)]
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let high = (x / 256 + 4 * (y / 256)) as u8;
            Rgba([(x % 256) as u8, (y % 256) as u8, high, 255])
        });
        DynamicImage::ImageRgba8(img)
    }

    fn b(start: u32, end: u32) -> Boundary {
        Boundary { start, end }
    }

    fn spec(x: (u32, u32), y: (u32, u32)) -> TileSpec {
        TileSpec {
            column: b(x.0, x.1),
            row: b(y.0, y.1),
            index: (0, 0),
        }
    }

    #[test]
    fn crop_has_boundary_dimensions() {
        let source = coordinate_image(300, 200);
        let tile = extract(&source, &spec((200, 300), (100, 200))).unwrap();
        assert_eq!(tile.image.dimensions(), (100, 100));
        assert_eq!(tile.image.get_pixel(0, 0), source.get_pixel(200, 100));
        assert_eq!(tile.image.get_pixel(99, 99), source.get_pixel(299, 199));
    }

    #[test]
    fn past_edge_rejected() {
        let source = coordinate_image(10, 10);
        let err = extract(&source, &spec((5, 11), (0, 10))).unwrap_err();
        assert!(matches!(err, TileError::OutOfBounds { .. }));
        assert_eq!(
            err.to_string(),
            "Boundary 5..11 is outside the horizontal extent 0..10"
        );
    }

    #[test]
    fn empty_boundary_rejected() {
        let source = coordinate_image(10, 10);
        let err = extract(&source, &spec((0, 10), (4, 4))).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Boundary 4..4 is outside the vertical extent 0..10"
        );
    }

    #[test]
    fn source_is_left_untouched() {
        let source = coordinate_image(40, 40);
        let before = source.clone();
        let mut tile = extract(&source, &spec((0, 20), (0, 20))).unwrap();
        tile.image.put_pixel(0, 0, Rgba([9, 9, 9, 9]));
        assert_eq!(source, before);
    }

    #[test]
    fn reassembled_tiles_reproduce_source() {
        let cases = [
            (AxisMode::Both, 3, 2, 300, 200),
            (AxisMode::Both, 7, 5, 101, 53),
            (AxisMode::Horizontal, 3, 1, 10, 4),
            (AxisMode::Vertical, 1, 6, 17, 611),
        ];

        for (mode, columns, rows, width, height) in cases {
            let source = coordinate_image(width, height);
            let request = PartitionRequest::new(mode, columns, rows).unwrap();
            let mut canvas = DynamicImage::new_rgba8(width, height);

            for spec in resolve(width, height, &request).unwrap() {
                let tile = extract(&source, &spec).unwrap();
                canvas
                    .copy_from(&tile.image, spec.column.start, spec.row.start)
                    .unwrap();
            }

            assert_eq!(
                canvas, source,
                "{mode:?} {columns}x{rows} over {width}x{height}"
            );
        }
    }
}
