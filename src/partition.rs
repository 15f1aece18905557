//! Combining per-axis plans into a full set of tile regions.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::TileError;
use crate::grid::{plan, Axis, Boundary};

/// Which image axes get split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisMode {
    /// Split the width into columns; every tile spans the full height.
    Horizontal,
    /// Split the height into rows; every tile spans the full width.
    Vertical,
    /// Split both axes into a grid.
    #[default]
    Both,
}

impl AxisMode {
    /// Whether this mode cuts the given axis.
    #[must_use]
    pub fn splits(self, axis: Axis) -> bool {
        match self {
            Self::Both => true,
            Self::Horizontal => axis == Axis::Horizontal,
            Self::Vertical => axis == Axis::Vertical,
        }
    }
}

/// A validated request for how many tiles to cut along each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRequest {
    mode: AxisMode,
    columns: u32,
    rows: u32,
}

impl PartitionRequest {
    /// Build a request, rejecting zero counts.
    ///
    /// A count of 1 leaves that axis whole. Counts along an axis the mode
    /// does not split are still validated but otherwise ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidPartition`] if either count is zero.
    pub fn new(mode: AxisMode, columns: u32, rows: u32) -> Result<Self, TileError> {
        if columns == 0 || rows == 0 {
            return Err(TileError::InvalidPartition(format!(
                "tile counts must be at least 1 (got {columns} columns, {rows} rows)"
            )));
        }
        Ok(Self {
            mode,
            columns,
            rows,
        })
    }

    /// Effective number of columns, 1 when the width is not split.
    #[must_use]
    pub fn columns(&self) -> u32 {
        if self.mode.splits(Axis::Horizontal) {
            self.columns
        } else {
            1
        }
    }

    /// Effective number of rows, 1 when the height is not split.
    #[must_use]
    pub fn rows(&self) -> u32 {
        if self.mode.splits(Axis::Vertical) {
            self.rows
        } else {
            1
        }
    }
}

/// One rectangular region of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileSpec {
    /// Horizontal pixel range.
    pub column: Boundary,
    /// Vertical pixel range.
    pub row: Boundary,
    /// Grid position as `(column index, row index)`, both 0-based.
    pub index: (u32, u32),
}

impl TileSpec {
    /// Tile width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.column.span()
    }

    /// Tile height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.row.span()
    }
}

/// Resolve a request against an image of `width` x `height` pixels.
///
/// Tiles come back in row-major order: every column of row 0, then row 1.
///
/// # Errors
///
/// Returns [`TileError::InvalidPartition`] if either dimension is zero or a
/// count exceeds the pixels available along its axis.
pub fn resolve(
    width: u32,
    height: u32,
    request: &PartitionRequest,
) -> Result<Vec<TileSpec>, TileError> {
    let columns = plan(width, request.columns(), Axis::Horizontal)?;
    let rows = plan(height, request.rows(), Axis::Vertical)?;

    let mut tiles = Vec::with_capacity(columns.len() * rows.len());
    for (j, row) in (0u32..).zip(&rows) {
        for (i, column) in (0u32..).zip(&columns) {
            tiles.push(TileSpec {
                column: *column,
                row: *row,
                index: (i, j),
            });
        }
    }
    Ok(tiles)
}
