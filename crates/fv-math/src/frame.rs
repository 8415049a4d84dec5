use fv_core::{FieldViewError, Result, Validate};
use serde::{Deserialize, Serialize};

use crate::{Point3, Vector3};

/// Axis-aligned bounding frame in 3D space.
///
/// A frame can be genuinely empty, which is different from a frame holding a
/// single point (zero volume, but not empty). Growing an empty frame by a
/// point makes it exactly that point. Frames only grow; use [`Frame3::clear`]
/// to start over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame3 {
    min: Point3,
    max: Point3,
    empty: bool,
}

impl Frame3 {
    pub fn empty() -> Self {
        Self {
            min: Point3::ZERO,
            max: Point3::ZERO,
            empty: true,
        }
    }

    pub fn from_point(p: Point3) -> Self {
        Self {
            min: p,
            max: p,
            empty: false,
        }
    }

    /// Smallest frame containing both corners. The corners need not be sorted.
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            empty: false,
        }
    }

    pub fn from_points(points: &[Point3]) -> Self {
        let mut frame = Self::empty();
        for &p in points {
            frame.add_point(p);
        }
        frame
    }

    pub fn is_empty(&self) -> bool {
        self.empty
    }

    pub fn min(&self) -> Point3 {
        self.min
    }

    pub fn max(&self) -> Point3 {
        self.max
    }

    pub fn center(&self) -> Point3 {
        (self.min + self.max) * 0.5
    }

    /// Span of the frame along each axis.
    pub fn spans(&self) -> Vector3 {
        self.max - self.min
    }

    /// The eight corners, x varying fastest.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min, self.max);
        std::array::from_fn(|i| {
            Point3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            )
        })
    }

    /// Radius of a sphere enclosing the frame, centred either on the origin
    /// or on the frame centre.
    pub fn radius(&self, origin_centered: bool) -> f64 {
        if origin_centered {
            self.min.length().max(self.max.length())
        } else {
            0.5 * self.min.distance(self.max)
        }
    }

    pub fn contains_point(&self, p: Point3) -> bool {
        !self.empty
            && p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    pub fn add_point(&mut self, p: Point3) {
        if self.empty {
            *self = Self::from_point(p);
            return;
        }
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow to the union of this frame and `other`. An empty `other` is a no-op.
    pub fn add_frame(&mut self, other: &Frame3) {
        if other.empty {
            return;
        }
        if self.empty {
            *self = *other;
            return;
        }
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn merge(&self, other: &Frame3) -> Self {
        let mut merged = *self;
        merged.add_frame(other);
        merged
    }

    /// Reset to the empty frame.
    pub fn clear(&mut self) {
        *self = Self::empty();
    }
}

impl Default for Frame3 {
    fn default() -> Self {
        Self::empty()
    }
}

impl Validate for Frame3 {
    fn validate(&self) -> Result<()> {
        if self.empty {
            return Ok(());
        }
        if self.min.cmple(self.max).all() {
            Ok(())
        } else {
            Err(FieldViewError::InvalidBounds(format!(
                "min {:?} exceeds max {:?}",
                self.min, self.max
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_empty_differs_from_single_point() {
        let empty = Frame3::empty();
        let point = Frame3::from_point(Point3::ZERO);
        assert!(empty.is_empty());
        assert!(!point.is_empty());
        assert!(!empty.contains_point(Point3::ZERO));
        assert!(point.contains_point(Point3::ZERO));
    }

    #[test]
    fn test_from_unordered_corners() {
        let frame = Frame3::new(dvec3(3.0, -1.0, 2.0), dvec3(-1.0, 5.0, 0.0));
        assert_eq!(frame.min(), dvec3(-1.0, -1.0, 0.0));
        assert_eq!(frame.max(), dvec3(3.0, 5.0, 2.0));
        assert!(frame.is_valid());
    }

    #[test]
    fn test_add_point_to_empty() {
        let mut frame = Frame3::empty();
        frame.add_point(dvec3(1.0, 2.0, 3.0));
        assert_eq!(frame.min(), dvec3(1.0, 2.0, 3.0));
        assert_eq!(frame.max(), dvec3(1.0, 2.0, 3.0));
        frame.add_point(dvec3(-1.0, 5.0, 0.0));
        assert_eq!(frame.min(), dvec3(-1.0, 2.0, 0.0));
        assert_eq!(frame.max(), dvec3(1.0, 5.0, 3.0));
    }

    #[test]
    fn test_from_points() {
        let pts = vec![dvec3(1.0, 2.0, 3.0), dvec3(-1.0, 5.0, 0.0), dvec3(3.0, -1.0, 2.0)];
        let frame = Frame3::from_points(&pts);
        assert_eq!(frame.min(), dvec3(-1.0, -1.0, 0.0));
        assert_eq!(frame.max(), dvec3(3.0, 5.0, 3.0));
        assert!(Frame3::from_points(&[]).is_empty());
    }

    #[test]
    fn test_union_never_shrinks() {
        let mut a = Frame3::new(dvec3(0.0, 0.0, 0.0), dvec3(2.0, 2.0, 2.0));
        let b = Frame3::new(dvec3(1.0, 1.0, 1.0), dvec3(3.0, 3.0, 3.0));
        a.add_frame(&b);
        assert_eq!(a.min(), dvec3(0.0, 0.0, 0.0));
        assert_eq!(a.max(), dvec3(3.0, 3.0, 3.0));

        a.add_frame(&Frame3::empty());
        assert_eq!(a.max(), dvec3(3.0, 3.0, 3.0));

        let mut c = Frame3::empty();
        c.add_frame(&b);
        assert_eq!(c, b);
    }

    #[test]
    fn test_corners_and_spans() {
        let frame = Frame3::new(dvec3(0.0, 0.0, 0.0), dvec3(1.0, 2.0, 3.0));
        let corners = frame.corners();
        assert_eq!(corners[0], dvec3(0.0, 0.0, 0.0));
        assert_eq!(corners[7], dvec3(1.0, 2.0, 3.0));
        assert_eq!(corners[5], dvec3(1.0, 0.0, 3.0));
        assert_eq!(frame.spans(), dvec3(1.0, 2.0, 3.0));
        assert_eq!(frame.center(), dvec3(0.5, 1.0, 1.5));
    }

    #[test]
    fn test_clear() {
        let mut frame = Frame3::new(Point3::ZERO, Point3::ONE);
        frame.clear();
        assert!(frame.is_empty());
    }

    #[test]
    fn test_radius() {
        let frame = Frame3::new(dvec3(0.0, 0.0, 0.0), dvec3(2.0, 0.0, 0.0));
        assert!((frame.radius(false) - 1.0).abs() < 1e-12);
        assert!((frame.radius(true) - 2.0).abs() < 1e-12);
    }
}
