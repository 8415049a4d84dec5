//! Color-mapped texture contents.

use fv_color::{MapperPair, Rgb};
use rayon::prelude::*;

use crate::resample::{ScalarGrid, ValueRange};

/// Legend ramp resolution along the value axis.
pub const LEGEND_STEPS: usize = 200;
/// Legend ramp resolution across.
pub const LEGEND_COLUMNS: usize = 2;

/// An RGB image laid out like the grid it came from: row-major, row 0 at
/// the bottom of the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTexture {
    width: usize,
    height: usize,
    texels: Vec<Rgb>,
}

impl FieldTexture {
    /// Map every grid sample through `pair`.
    pub fn from_grid(grid: &ScalarGrid, pair: &MapperPair) -> Self {
        let texels = grid.values.par_iter().map(|&v| pair.map(v)).collect();
        Self {
            width: grid.n_across,
            height: grid.n_down,
            texels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn texels(&self) -> &[Rgb] {
        &self.texels
    }

    /// Texel in column `i` of row `j`, counting rows from the bottom.
    pub fn texel(&self, i: usize, j: usize) -> Rgb {
        self.texels[j * self.width + i]
    }

    /// Packed 8-bit RGB with the top row first, as images are stored.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.texels.len() * 3);
        for row in self.texels.chunks(self.width.max(1)).rev() {
            for texel in row {
                bytes.extend_from_slice(&texel.to_rgb8());
            }
        }
        bytes
    }
}

/// Half-width of the legend ramp for a mapping range. Falls back to 1 when
/// the range gives nothing usable.
pub fn legend_half_width(range: &ValueRange) -> f64 {
    let m = range.max_abs();
    if m == 0.0 || !m.is_finite() {
        1.0
    } else {
        m
    }
}

/// Synthetic ramp starting at `-max_abs` on the bottom row and rising by
/// `max_abs / 100` per row, so row 100 is exactly zero and the top row is
/// `0.99 * max_abs`. [`LEGEND_COLUMNS`] wide.
pub fn legend_ramp(max_abs: f64) -> ScalarGrid {
    let half = (LEGEND_STEPS / 2) as f64;
    let values = (0..LEGEND_STEPS)
        .flat_map(|j| {
            let v = max_abs * (j as f64 - half) / half;
            std::iter::repeat(v).take(LEGEND_COLUMNS)
        })
        .collect();
    ScalarGrid {
        n_across: LEGEND_COLUMNS,
        n_down: LEGEND_STEPS,
        spacing: 0.0,
        row_spacing: max_abs / half,
        values,
    }
}
