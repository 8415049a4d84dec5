//! Plane/box intersection.
//!
//! Both plane variants reduce to the same walk: pick an axis lying in the
//! plane, take the four corners of the box face at that axis' minimum, cut
//! the face edges with the plane, and extrude the two crossings to the
//! opposite face.

use fv_core::{FieldViewError, Result};
use fv_math::{points_eq, Frame3, Plane, Point3, Rect3, Vector3};
use tracing::debug;

/// Legend offset from the frame, as a fraction of the frame width.
pub const LEGEND_DISPLACEMENT: f64 = 0.1;
/// Legend width, as a fraction of the legend offset.
pub const LEGEND_WIDTH: f64 = 0.13;

/// Rectangles produced by cutting a plane through a field's bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub frame: Rect3,
    /// Color-scale key beside the frame; only z-parallel cuts carry one.
    pub legend: Option<Rect3>,
}

/// Cut the plane through `point` with `normal` against `bounds`.
///
/// One normal component must be exactly zero; the first such axis runs
/// along the rectangle's vertical edges.
pub fn intersect_general(point: Point3, normal: Vector3, bounds: &Frame3) -> Result<Intersection> {
    let plane = Plane::new(point, normal);
    let dir = plane.axis_in_plane().ok_or(FieldViewError::NoAxisInPlane)?;
    check_bounds(bounds)?;
    let frame = cut_box(&plane, bounds.min(), bounds.max(), dir)?;
    debug!(?dir, width = frame.width(), height = frame.height(), "general plane cut");
    Ok(Intersection { frame, legend: None })
}

/// Cut the vertical plane through `point` at azimuth `angle_deg` against
/// the x/y extent of `bounds`, spanning `z_min..z_max` regardless of the
/// box's own z extent. Also builds the legend rectangle.
pub fn intersect_z_parallel(
    point: Point3,
    angle_deg: f64,
    z_min: f64,
    z_max: f64,
    bounds: &Frame3,
) -> Result<Intersection> {
    let plane = Plane::from_azimuth(point, angle_deg);
    check_bounds(bounds)?;
    let mut lo = bounds.min();
    let mut hi = bounds.max();
    lo.z = z_min;
    hi.z = z_max;
    let frame = cut_box(&plane, lo, hi, 2)?;
    let displacement = LEGEND_DISPLACEMENT * frame.width();
    let legend = frame.offset_beside(displacement, LEGEND_WIDTH * displacement)?;
    debug!(angle_deg, width = frame.width(), height = frame.height(), "z-parallel plane cut");
    Ok(Intersection {
        frame,
        legend: Some(legend),
    })
}

fn check_bounds(bounds: &Frame3) -> Result<()> {
    if bounds.is_empty() {
        return Err(FieldViewError::InvalidBounds("field has no extent".into()));
    }
    Ok(())
}

/// Corners of the `dir`-minimum face, wound so consecutive corners share
/// an edge.
fn face_corners(lo: Point3, hi: Point3, dir: usize) -> [Point3; 4] {
    let dirn = (dir + 1) % 3;
    let dirnn = (dir + 2) % 3;
    std::array::from_fn(|i| {
        let mut c = lo;
        c[dirn] = if (i / 2) & 1 == 0 { lo[dirn] } else { hi[dirn] };
        c[dirnn] = if ((i + 1) / 2) & 1 == 0 { lo[dirnn] } else { hi[dirnn] };
        c
    })
}

fn cut_box(plane: &Plane, lo: Point3, hi: Point3, dir: usize) -> Result<Rect3> {
    let corners = face_corners(lo, hi, dir);
    let mut hits: Vec<Point3> = Vec::with_capacity(2);
    for i in 0..4 {
        if hits.len() == 2 {
            break;
        }
        let Some(p) = plane.intersect_segment(corners[i], corners[(i + 1) % 4]) else {
            continue;
        };
        // a plane through a face corner meets two edges at the same point
        if !hits.iter().any(|&h| points_eq(h, p)) {
            hits.push(p);
        }
    }
    let [fc0, fc1] = hits[..] else {
        return Err(FieldViewError::PlaneDoesNotIntersectBounds { found: hits.len() });
    };
    let mut fc2 = fc1;
    let mut fc3 = fc0;
    fc2[dir] = hi[dir];
    fc3[dir] = hi[dir];
    Rect3::try_new(fc0, fc1, fc2, fc3)
}
