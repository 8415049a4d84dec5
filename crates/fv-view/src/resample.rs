//! Resampling a field onto a cutting-plane rectangle.

use fv_core::{FieldViewError, Result};
use fv_field::Field;
use fv_math::{Rect3, Vector3};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which scalar to extract from a vector sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    #[default]
    X,
    Y,
    Z,
    Magnitude,
}

impl Component {
    /// Dialog index: 0, 1, 2 for the axes, 3 for magnitude.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Component::X),
            1 => Some(Component::Y),
            2 => Some(Component::Z),
            3 => Some(Component::Magnitude),
            _ => None,
        }
    }

    /// NaN components stay NaN; a magnitude with any NaN component is NaN.
    pub fn extract(self, v: Vector3) -> f64 {
        match self {
            Component::X => v.x,
            Component::Y => v.y,
            Component::Z => v.z,
            Component::Magnitude => v.length(),
        }
    }
}

/// World distance to on-screen pixels, used to choose grid resolution.
pub trait Projector {
    fn project(&self, world_distance: f64) -> f64;
}

impl<F: Fn(f64) -> f64> Projector for F {
    fn project(&self, world_distance: f64) -> f64 {
        self(world_distance)
    }
}

/// A closed `[min, max]` interval of field values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// The symmetric unit range used when nothing better is known.
    pub fn unit() -> Self {
        Self::new(-1.0, 1.0)
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn max_abs(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }

    /// Grow to include `value`; NaN is ignored.
    pub fn include(range: Option<Self>, value: f64) -> Option<Self> {
        if value.is_nan() {
            return range;
        }
        Some(match range {
            Some(r) => Self::new(r.min.min(value), r.max.max(value)),
            None => Self::new(value, value),
        })
    }

    pub fn union(a: Option<Self>, b: Option<Self>) -> Option<Self> {
        match (a, b) {
            (Some(a), Some(b)) => Some(Self::new(a.min.min(b.min), a.max.max(b.max))),
            (a, None) => a,
            (None, b) => b,
        }
    }

    /// A user-fixed range must have finite bounds and nonzero width.
    pub fn fixed(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(FieldViewError::NonFiniteRange { min, max });
        }
        if min == max {
            return Err(FieldViewError::ZeroWidthRange { value: min });
        }
        Ok(Self::new(min, max))
    }

    /// Range to map with, given an optional fixed override and the observed
    /// range. No defined samples gives the unit range; a single observed
    /// value `v` widens to `[-|v|, |v|]`.
    pub fn effective(fixed: Option<Self>, observed: Option<Self>) -> Result<Self> {
        if let Some(r) = fixed {
            return Self::fixed(r.min, r.max);
        }
        Ok(match observed {
            None => Self::unit(),
            Some(r) if r.min == r.max => {
                let m = r.min.abs();
                if m == 0.0 {
                    Self::unit()
                } else {
                    Self::new(-m, m)
                }
            }
            Some(r) => r,
        })
    }
}

/// Row-major scalar samples; row 0 is the bottom edge of the frame.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalarGrid {
    pub n_across: usize,
    pub n_down: usize,
    /// Cell width in model units.
    pub spacing: f64,
    /// Cell height in model units.
    pub row_spacing: f64,
    pub values: Vec<f64>,
}

impl ScalarGrid {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[j * self.n_across + i]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resampled grid plus the range of its defined samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampled {
    pub grid: ScalarGrid,
    /// `None` when every sample was NaN.
    pub observed: Option<ValueRange>,
}

/// Upper bound on cells per axis, whatever the projector says.
pub const MAX_CELLS_PER_AXIS: usize = 8192;

fn cell_count(pixels: f64) -> usize {
    if !pixels.is_finite() {
        return 1;
    }
    (pixels.floor().max(1.0) as usize).min(MAX_CELLS_PER_AXIS)
}

/// Grid resolution `(n_across, n_down)` for `frame` at the projector's
/// current scale.
pub fn grid_size(frame: &Rect3, projector: &dyn Projector) -> (usize, usize) {
    (
        cell_count(projector.project(frame.width())),
        cell_count(projector.project(frame.height())),
    )
}

/// Sample `component` of `field` at the centre of every cell of `frame`.
///
/// Rows are sampled in parallel; each row tracks its own range and the
/// ranges are merged afterwards.
pub fn resample(
    field: &dyn Field,
    frame: &Rect3,
    component: Component,
    projector: &dyn Projector,
) -> Result<Resampled> {
    let basis = frame.basis()?;
    let (n_across, n_down) = grid_size(frame, projector);
    let spacing = frame.width() / n_across as f64;
    let row_spacing = frame.height() / n_down as f64;

    let rows: Vec<(Vec<f64>, Option<ValueRange>)> = (0..n_down)
        .into_par_iter()
        .map(|j| {
            let y = (j as f64 + 0.5) * row_spacing;
            let mut range = None;
            let row: Vec<f64> = (0..n_across)
                .map(|i| {
                    let x = (i as f64 + 0.5) * spacing;
                    let value = component.extract(field.field_at(basis.point_at(x, y)));
                    range = ValueRange::include(range, value);
                    value
                })
                .collect();
            (row, range)
        })
        .collect();

    let mut values = Vec::with_capacity(n_across * n_down);
    let mut observed = None;
    for (row, range) in rows {
        values.extend(row);
        observed = ValueRange::union(observed, range);
    }
    debug!(n_across, n_down, ?observed, "resampled plane");

    Ok(Resampled {
        grid: ScalarGrid {
            n_across,
            n_down,
            spacing,
            row_spacing,
            values,
        },
        observed,
    })
}
