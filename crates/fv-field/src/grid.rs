use fv_core::{FieldViewError, Result};
use fv_math::{Frame3, Point3, Vector3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{undefined, Field};

/// Vector samples on a regular axis-aligned grid, trilinearly interpolated.
///
/// Samples are stored x-fastest, then y, then z. Nodes sit on the bounds:
/// node `(i, j, k)` is at `min + (i, j, k) * step`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GridFieldData", into = "GridFieldData")]
pub struct GridField {
    name: String,
    bounds: Frame3,
    dims: [usize; 3],
    step: Vector3,
    values: Vec<Vector3>,
}

/// Serialized form of a [`GridField`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridFieldData {
    pub name: String,
    pub min: Point3,
    pub max: Point3,
    pub dims: [usize; 3],
    pub values: Vec<Vector3>,
}

impl GridField {
    /// Build a grid over `[min, max]` with `dims` nodes per axis.
    ///
    /// Every axis needs at least two nodes and a positive span, and
    /// `values.len()` must equal the node count.
    pub fn new(
        name: impl Into<String>,
        min: Point3,
        max: Point3,
        dims: [usize; 3],
        values: Vec<Vector3>,
    ) -> Result<Self> {
        let name = name.into();
        let expected = node_count(&name, dims)?;
        if !min.cmplt(max).all() {
            return Err(FieldViewError::InvalidGrid(format!(
                "{name}: empty extent {min:?}..{max:?}"
            )));
        }
        if values.len() != expected {
            return Err(FieldViewError::InvalidGrid(format!(
                "{name}: expected {expected} samples, got {}",
                values.len()
            )));
        }
        let step = (max - min)
            / Vector3::new(
                (dims[0] - 1) as f64,
                (dims[1] - 1) as f64,
                (dims[2] - 1) as f64,
            );
        debug!(name = %name, ?dims, "grid field loaded");
        Ok(Self {
            name,
            bounds: Frame3::new(min, max),
            dims,
            step,
            values,
        })
    }

    /// Sample `f` at every node.
    pub fn from_fn(
        name: impl Into<String>,
        min: Point3,
        max: Point3,
        dims: [usize; 3],
        f: impl Fn(Point3) -> Vector3,
    ) -> Result<Self> {
        let name = name.into();
        node_count(&name, dims)?;
        let step = (max - min)
            / Vector3::new(
                (dims[0] - 1) as f64,
                (dims[1] - 1) as f64,
                (dims[2] - 1) as f64,
            );
        let mut values = Vec::new();
        for k in 0..dims[2] {
            for j in 0..dims[1] {
                for i in 0..dims[0] {
                    values.push(f(min + step * Vector3::new(i as f64, j as f64, k as f64)));
                }
            }
        }
        Self::new(name, min, max, dims, values)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    pub fn values(&self) -> &[Vector3] {
        &self.values
    }

    pub fn contains(&self, point: Point3) -> bool {
        self.bounds.contains_point(point)
    }

    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (k * self.dims[1] + j) * self.dims[0] + i
    }

    pub fn node(&self, i: usize, j: usize, k: usize) -> Vector3 {
        self.values[self.index(i, j, k)]
    }

    /// Lower node index and fractional offset along one axis.
    fn locate(&self, axis: usize, coord: f64) -> (usize, f64) {
        let f = (coord - self.bounds.min()[axis]) / self.step[axis];
        let i0 = (f.floor().max(0.0) as usize).min(self.dims[axis] - 2);
        (i0, f - i0 as f64)
    }
}

impl Field for GridField {
    fn field_at(&self, point: Point3) -> Vector3 {
        if !self.contains(point) {
            return undefined();
        }
        let (i, tx) = self.locate(0, point.x);
        let (j, ty) = self.locate(1, point.y);
        let (k, tz) = self.locate(2, point.z);

        // a NaN at any corner survives the blend, even with zero weight
        let lerp = |a: Vector3, b: Vector3, t: f64| a * (1.0 - t) + b * t;
        let c00 = lerp(self.node(i, j, k), self.node(i + 1, j, k), tx);
        let c10 = lerp(self.node(i, j + 1, k), self.node(i + 1, j + 1, k), tx);
        let c01 = lerp(self.node(i, j, k + 1), self.node(i + 1, j, k + 1), tx);
        let c11 = lerp(self.node(i, j + 1, k + 1), self.node(i + 1, j + 1, k + 1), tx);
        let c0 = lerp(c00, c10, ty);
        let c1 = lerp(c01, c11, ty);
        lerp(c0, c1, tz)
    }

    fn field_name_at(&self, _point: Point3) -> &str {
        &self.name
    }

    fn bounds(&self) -> Frame3 {
        self.bounds
    }
}

/// Nodes in a grid of `dims`; every axis needs at least two.
fn node_count(name: &str, dims: [usize; 3]) -> Result<usize> {
    if dims.iter().any(|&n| n < 2) {
        return Err(FieldViewError::InvalidGrid(format!(
            "{name}: need at least 2 nodes per axis, got {dims:?}"
        )));
    }
    dims.iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .ok_or_else(|| FieldViewError::InvalidGrid(format!("{name}: node count of {dims:?} overflows")))
}

impl TryFrom<GridFieldData> for GridField {
    type Error = FieldViewError;

    fn try_from(data: GridFieldData) -> Result<Self> {
        GridField::new(data.name, data.min, data.max, data.dims, data.values)
    }
}

impl From<GridField> for GridFieldData {
    fn from(grid: GridField) -> Self {
        GridFieldData {
            name: grid.name,
            min: grid.bounds.min(),
            max: grid.bounds.max(),
            dims: grid.dims,
            values: grid.values,
        }
    }
}
