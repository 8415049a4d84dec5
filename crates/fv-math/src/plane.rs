use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A cutting plane in 3D space defined by a point and normal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Plane {
    pub origin: Point3,
    pub normal: Vector3,
}

impl Plane {
    /// The normal is normalized; a zero normal stays zero.
    pub fn new(origin: Point3, normal: Vector3) -> Self {
        Self {
            origin,
            normal: normal.normalize_or_zero(),
        }
    }

    /// Vertical plane (parallel to z) whose normal points at `angle_deg`
    /// degrees from the x axis in the xy plane.
    pub fn from_azimuth(origin: Point3, angle_deg: f64) -> Self {
        let theta = angle_deg.to_radians();
        // Built directly so the z component stays exactly zero.
        Self {
            origin,
            normal: Vector3::new(theta.cos(), theta.sin(), 0.0),
        }
    }

    /// First coordinate axis lying in the plane, i.e. the first normal
    /// component that is exactly `0.0`.
    ///
    /// The test is exact: a component of `1e-17` does not count.
    pub fn axis_in_plane(&self) -> Option<usize> {
        (0..3).find(|&axis| self.normal[axis] == 0.0)
    }

    /// Intersection of the segment `p1..p2` with this plane.
    ///
    /// Returns `None` when the segment is parallel to the plane or when the
    /// crossing lies outside the segment. Both endpoints are inclusive.
    pub fn intersect_segment(&self, p1: Point3, p2: Point3) -> Option<Point3> {
        let w = p1 - self.origin;
        let u = p2 - p1;
        let denom = self.normal.dot(u);
        if denom == 0.0 {
            return None;
        }
        let lambda = -self.normal.dot(w) / denom;
        if (0.0..=1.0).contains(&lambda) {
            Some(p1 + u * lambda)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;

    #[test]
    fn test_axis_in_plane_is_exact() {
        assert_eq!(Plane::new(Point3::ZERO, Vector3::Y).axis_in_plane(), Some(0));
        assert_eq!(Plane::new(Point3::ZERO, Vector3::X).axis_in_plane(), Some(1));
        assert_eq!(Plane::new(Point3::ZERO, dvec3(1.0, 1.0, 0.0)).axis_in_plane(), Some(2));
        assert_eq!(Plane::new(Point3::ZERO, dvec3(1.0, 1.0, 1.0)).axis_in_plane(), None);

        let nearly = Plane {
            origin: Point3::ZERO,
            normal: dvec3(1e-17, 1.0, 1.0),
        };
        assert_eq!(nearly.axis_in_plane(), None);
    }

    #[test]
    fn test_from_azimuth() {
        let plane = Plane::from_azimuth(Point3::ZERO, 90.0);
        assert!((plane.normal - dvec3(0.0, 1.0, 0.0)).length() < 1e-12);
        assert_eq!(plane.normal.z, 0.0);
        assert_eq!(plane.axis_in_plane(), Some(2));
    }

    #[test]
    fn test_intersect_segment() {
        let plane = Plane::new(dvec3(0.0, 5.0, 0.0), Vector3::Y);
        let hit = plane
            .intersect_segment(dvec3(0.0, 0.0, 0.0), dvec3(0.0, 10.0, 0.0))
            .unwrap();
        assert!((hit - dvec3(0.0, 5.0, 0.0)).length() < 1e-12);

        // crossing beyond the segment end
        assert!(plane
            .intersect_segment(dvec3(0.0, 0.0, 0.0), dvec3(0.0, 4.0, 0.0))
            .is_none());
        // parallel segment
        assert!(plane
            .intersect_segment(dvec3(0.0, 0.0, 0.0), dvec3(10.0, 0.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_intersect_segment_endpoints_inclusive() {
        let plane = Plane::new(dvec3(0.0, 5.0, 0.0), Vector3::Y);
        let hit = plane
            .intersect_segment(dvec3(1.0, 5.0, 0.0), dvec3(1.0, 10.0, 0.0))
            .unwrap();
        assert_eq!(hit, dvec3(1.0, 5.0, 0.0));
    }
}
