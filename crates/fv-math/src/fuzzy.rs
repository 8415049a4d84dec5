//! Fuzzy equality for points and vectors.
//!
//! `Point3` and `Vector3` share a representation, but they do not share an
//! idea of equality: points compare per axis, vectors compare by magnitude
//! and direction.

use fv_core::Tolerance;

use crate::{Point3, Vector3};

/// Per-axis point comparison with the default tolerance.
pub fn points_eq(a: Point3, b: Point3) -> bool {
    points_eq_with(a, b, Tolerance::default())
}

pub fn points_eq_with(a: Point3, b: Point3, tol: Tolerance) -> bool {
    tol.coord_eq(a.x, b.x) && tol.coord_eq(a.y, b.y) && tol.coord_eq(a.z, b.z)
}

/// Magnitude-and-angle vector comparison with the default tolerance.
pub fn vectors_eq(a: Vector3, b: Vector3) -> bool {
    vectors_eq_with(a, b, Tolerance::default())
}

/// Two vectors are equal when their magnitudes agree to within the relative
/// tolerance and the angle between them, `acos(a·b / |a||b|)`, is within the
/// angular tolerance. A zero vector only equals another zero vector.
pub fn vectors_eq_with(a: Vector3, b: Vector3, tol: Tolerance) -> bool {
    let la = a.length();
    let lb = b.length();
    if la == 0.0 || lb == 0.0 {
        return la == lb;
    }
    if !tol.magnitude_eq(la, lb) {
        return false;
    }
    let cosine = (a.dot(b) / (la * lb)).clamp(-1.0, 1.0);
    tol.angle_eq(cosine.acos())
}
