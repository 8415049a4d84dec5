use crate::{Point3, Vector3};
use fv_core::{FieldViewError, Result};
use serde::{Deserialize, Serialize};

/// A pick ray given by two world-space points, usually the unprojected
/// near and far ends of a screen click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickRay {
    pub start: Point3,
    pub end: Point3,
}

impl PickRay {
    /// Below this `|u·n|` the ray counts as parallel to a plane.
    pub const PARALLEL_EPSILON: f64 = 1e-3;

    pub fn new(start: Point3, end: Point3) -> Self {
        Self { start, end }
    }

    /// Unnormalized direction `end - start`.
    pub fn direction(&self) -> Vector3 {
        self.end - self.start
    }

    /// Point at parameter `t`; `t = 0` is `start`, `t = 1` is `end`.
    pub fn at(&self, t: f64) -> Point3 {
        self.start + self.direction() * t
    }

    /// Intersect the infinite line through the ray with the plane through
    /// `origin` with normal `normal`.
    ///
    /// The normal is normalized here, so the parallel test does not depend on
    /// its length. Fails with [`FieldViewError::AmbiguousIntersection`] when
    /// the line is (nearly) parallel to the plane.
    pub fn intersect_plane(&self, origin: Point3, normal: Vector3) -> Result<Point3> {
        let n = normal.normalize_or_zero();
        let u = self.direction();
        let w = self.start - origin;
        let d = u.dot(n);
        let num = -w.dot(n);
        if d.abs() < Self::PARALLEL_EPSILON {
            return Err(FieldViewError::AmbiguousIntersection);
        }
        Ok(self.at(num / d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_at() {
        let ray = PickRay::new(dvec3(0.0, 0.0, 0.0), dvec3(2.0, 0.0, 0.0));
        assert!((ray.at(0.5) - dvec3(1.0, 0.0, 0.0)).length() < 1e-10);
        assert!((ray.at(2.0) - dvec3(4.0, 0.0, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_intersect_plane() {
        let ray = PickRay::new(dvec3(1.0, 2.0, 10.0), dvec3(1.0, 2.0, -10.0));
        let hit = ray.intersect_plane(dvec3(0.0, 0.0, 3.0), Vector3::Z).unwrap();
        assert!((hit - dvec3(1.0, 2.0, 3.0)).length() < 1e-10);
    }

    #[test]
    fn test_intersect_beyond_segment() {
        // the ray is a line: hits outside [start, end] are still reported
        let ray = PickRay::new(dvec3(0.0, 0.0, 10.0), dvec3(0.0, 0.0, 9.0));
        let hit = ray.intersect_plane(Point3::ZERO, Vector3::Z).unwrap();
        assert!(hit.length() < 1e-10);
    }

    #[test]
    fn test_parallel_ray_is_ambiguous() {
        let ray = PickRay::new(dvec3(0.0, 0.0, 1.0), dvec3(10.0, 0.0, 1.0));
        let err = ray.intersect_plane(Point3::ZERO, Vector3::Z).unwrap_err();
        assert!(matches!(err, FieldViewError::AmbiguousIntersection));
    }

    #[test]
    fn test_nearly_parallel_is_ambiguous() {
        let ray = PickRay::new(dvec3(0.0, 0.0, 1.0), dvec3(1.0, 0.0, 1.0005));
        assert!(ray.intersect_plane(Point3::ZERO, Vector3::Z * 5.0).is_err());
    }
}
