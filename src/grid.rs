//! Division of one image axis into near-equal pixel ranges.

use std::fmt;

use serde::Serialize;

use crate::error::TileError;

/// Image axis a plan is computed along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left to right, across the image width.
    Horizontal,
    /// Top to bottom, across the image height.
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Horizontal => f.write_str("horizontal"),
            Self::Vertical => f.write_str("vertical"),
        }
    }
}

/// Half-open pixel range `[start, end)` along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Boundary {
    /// First pixel covered.
    pub start: u32,
    /// One past the last pixel covered.
    pub end: u32,
}

impl Boundary {
    /// Number of pixels covered, 0 for an inverted range.
    #[must_use]
    pub fn span(self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Split an axis of `size` pixels into `count` contiguous boundaries.
///
/// Edge `i` sits at `floor(i * size / count)`, computed exactly in 64-bit
/// integers, and the final edge is `size`, so the boundaries cover the
/// axis with no gap or overlap. The last boundary absorbs the remainder.
///
/// # Errors
///
/// Returns [`TileError::InvalidPartition`] if `size` or `count` is zero,
/// or if `count` exceeds `size` (some tiles would be empty).
pub fn plan(size: u32, count: u32, axis: Axis) -> Result<Vec<Boundary>, TileError> {
    if size == 0 {
        return Err(TileError::InvalidPartition(format!(
            "{axis} image extent must be at least 1 pixel"
        )));
    }
    if count == 0 {
        return Err(TileError::InvalidPartition(format!(
            "{axis} tile count must be at least 1"
        )));
    }
    if count > size {
        return Err(TileError::InvalidPartition(format!(
            "cannot split {size} px into {count} {axis} tiles"
        )));
    }

    // The quotient never exceeds `size`, so it always fits back into u32.
    #[allow(clippy::cast_possible_truncation)]
    let edge = |i: u32| -> u32 {
        if i == count {
            size
        } else {
            (u64::from(i) * u64::from(size) / u64::from(count)) as u32
        }
    };

    Ok((0..count)
        .map(|i| Boundary {
            start: edge(i),
            end: edge(i + 1),
        })
        .collect())
}
