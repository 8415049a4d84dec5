//! Planar rectangular patches in 3D space.

use fv_core::{FieldViewError, Result, Tolerance, Validate};
use serde::{Deserialize, Serialize};

use crate::fuzzy::vectors_eq_with;
use crate::{Point3, Vector3};

const TOP_LEFT: usize = 0;
const TOP_RIGHT: usize = 1;
const BOTTOM_RIGHT: usize = 2;
const BOTTOM_LEFT: usize = 3;

/// A rectangle in space given by four corners ordered
/// top-left, top-right, bottom-right, bottom-left.
///
/// Validity is decided once at construction: opposite edges must agree as
/// vectors (fuzzy magnitude and direction), the horizontal and vertical
/// edges must be perpendicular within the angular tolerance, and neither
/// may be zero length. An invalid rectangle keeps its corners but refuses
/// every 2D mapping operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[Point3; 4]", into = "[Point3; 4]")]
pub struct Rect3 {
    corners: [Point3; 4],
    horizontal: Vector3,
    vertical: Vector3,
    valid: bool,
}

/// Orthonormal 2D coordinate system on a valid rectangle, anchored at its
/// bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectBasis {
    pub origin: Point3,
    pub u: Vector3,
    pub v: Vector3,
}

impl RectBasis {
    /// `origin + u * x + v * y`.
    pub fn point_at(&self, x: f64, y: f64) -> Point3 {
        self.origin + self.u * x + self.v * y
    }
}

impl Rect3 {
    pub fn new(top_left: Point3, top_right: Point3, bottom_right: Point3, bottom_left: Point3) -> Self {
        Self::from_corners([top_left, top_right, bottom_right, bottom_left])
    }

    pub fn from_corners(corners: [Point3; 4]) -> Self {
        let horizontal = corners[BOTTOM_RIGHT] - corners[BOTTOM_LEFT];
        let vertical = corners[TOP_LEFT] - corners[BOTTOM_LEFT];
        let valid = Self::check(&corners, horizontal, vertical, Tolerance::default()).is_ok();
        Self {
            corners,
            horizontal,
            vertical,
            valid,
        }
    }

    /// Like [`Rect3::new`] but fails with
    /// [`FieldViewError::InvalidRectangle`] instead of building an invalid
    /// rectangle.
    pub fn try_new(
        top_left: Point3,
        top_right: Point3,
        bottom_right: Point3,
        bottom_left: Point3,
    ) -> Result<Self> {
        let rect = Self::new(top_left, top_right, bottom_right, bottom_left);
        rect.validate()?;
        Ok(rect)
    }

    fn check(corners: &[Point3; 4], horizontal: Vector3, vertical: Vector3, tol: Tolerance) -> Result<()> {
        let top = corners[TOP_RIGHT] - corners[TOP_LEFT];
        let right = corners[TOP_RIGHT] - corners[BOTTOM_RIGHT];
        if horizontal.length() == 0.0 || vertical.length() == 0.0 {
            return Err(FieldViewError::InvalidRectangle(
                "zero-length edge".to_string(),
            ));
        }
        if !vectors_eq_with(horizontal, top, tol) {
            return Err(FieldViewError::InvalidRectangle(format!(
                "top edge {top:?} does not match bottom edge {horizontal:?}"
            )));
        }
        if !vectors_eq_with(vertical, right, tol) {
            return Err(FieldViewError::InvalidRectangle(format!(
                "right edge {right:?} does not match left edge {vertical:?}"
            )));
        }
        let cosine = horizontal.dot(vertical) / (horizontal.length() * vertical.length());
        if !tol.is_perpendicular(cosine) {
            return Err(FieldViewError::InvalidRectangle(format!(
                "edges are not perpendicular (cos = {cosine})"
            )));
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn corners(&self) -> [Point3; 4] {
        self.corners
    }

    pub fn top_left(&self) -> Point3 {
        self.corners[TOP_LEFT]
    }

    pub fn top_right(&self) -> Point3 {
        self.corners[TOP_RIGHT]
    }

    pub fn bottom_right(&self) -> Point3 {
        self.corners[BOTTOM_RIGHT]
    }

    pub fn bottom_left(&self) -> Point3 {
        self.corners[BOTTOM_LEFT]
    }

    /// Bottom edge, left to right.
    pub fn horizontal(&self) -> Vector3 {
        self.horizontal
    }

    /// Left edge, bottom to top.
    pub fn vertical(&self) -> Vector3 {
        self.vertical
    }

    pub fn width(&self) -> f64 {
        self.horizontal.length()
    }

    pub fn height(&self) -> f64 {
        self.vertical.length()
    }

    /// `horizontal × vertical`, not normalized.
    pub fn normal(&self) -> Vector3 {
        self.horizontal.cross(self.vertical)
    }

    pub fn center(&self) -> Point3 {
        self.bottom_left() + (self.horizontal + self.vertical) * 0.5
    }

    pub fn basis(&self) -> Result<RectBasis> {
        self.validate()?;
        Ok(RectBasis {
            origin: self.bottom_left(),
            u: self.horizontal.normalize(),
            v: self.vertical.normalize(),
        })
    }

    /// Map in-plane coordinates (model units from the bottom-left corner)
    /// to a point in space.
    pub fn map_2d(&self, x: f64, y: f64) -> Result<Point3> {
        Ok(self.basis()?.point_at(x, y))
    }

    /// A rectangle of the same height beside this one, `displacement` past
    /// the right edge along the horizontal direction and `width` wide.
    pub fn offset_beside(&self, displacement: f64, width: f64) -> Result<Rect3> {
        let u = self.basis()?.u;
        let top_left = self.top_right() + u * displacement;
        let bottom_left = self.bottom_right() + u * displacement;
        Rect3::try_new(top_left, top_left + u * width, bottom_left + u * width, bottom_left)
    }
}

impl From<[Point3; 4]> for Rect3 {
    fn from(corners: [Point3; 4]) -> Self {
        Self::from_corners(corners)
    }
}

impl From<Rect3> for [Point3; 4] {
    fn from(rect: Rect3) -> Self {
        rect.corners
    }
}

impl Validate for Rect3 {
    fn validate(&self) -> Result<()> {
        Self::check(&self.corners, self.horizontal, self.vertical, Tolerance::default())
    }

    fn is_valid(&self) -> bool {
        self.valid
    }
}
