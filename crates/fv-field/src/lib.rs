//! Field sources queried by the viewer.
//!
//! A [`Field`] answers "what is the vector value here, and what is it called"
//! for any point in space. Points where the field is undefined yield a
//! NaN-filled vector, which is data rather than an error: the resampler
//! skips it for range tracking and the color mappers render it distinctly.

pub mod analytic;
pub mod grid;
pub mod set;

use std::fmt;

use fv_math::{Frame3, Point3, Vector3};

pub use analytic::AnalyticField;
pub use grid::GridField;
pub use set::FieldSet;

/// Label reported where no field is defined.
pub const NO_FIELD_NAME: &str = "No Field";

/// A vector field over 3D space. Read-only, so concurrent queries are safe.
pub trait Field: fmt::Debug + Send + Sync {
    /// Interpolated value at `point`, NaN-filled where undefined.
    fn field_at(&self, point: Point3) -> Vector3;

    /// Name of the field answering at `point`.
    fn field_name_at(&self, point: Point3) -> &str;

    /// Region where the field may be defined.
    fn bounds(&self) -> Frame3;
}

/// The NaN-filled vector reported for an undefined sample.
pub fn undefined() -> Vector3 {
    Vector3::splat(f64::NAN)
}

/// Defined-ness test for field samples.
pub trait FieldSample {
    /// False when any component is NaN.
    fn is_defined(&self) -> bool;
}

impl FieldSample for Vector3 {
    fn is_defined(&self) -> bool {
        !self.is_nan()
    }
}

/// The trivial field: undefined everywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoField;

impl Field for NoField {
    fn field_at(&self, _point: Point3) -> Vector3 {
        undefined()
    }

    fn field_name_at(&self, _point: Point3) -> &str {
        NO_FIELD_NAME
    }

    fn bounds(&self) -> Frame3 {
        Frame3::empty()
    }
}

impl<F: Field + ?Sized> Field for Box<F> {
    fn field_at(&self, point: Point3) -> Vector3 {
        (**self).field_at(point)
    }

    fn field_name_at(&self, point: Point3) -> &str {
        (**self).field_name_at(point)
    }

    fn bounds(&self) -> Frame3 {
        (**self).bounds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv_math::dvec3;

    #[test]
    fn test_no_field() {
        let p = dvec3(1.0, 2.0, 3.0);
        assert!(!NoField.field_at(p).is_defined());
        assert_eq!(NoField.field_name_at(p), NO_FIELD_NAME);
        assert!(NoField.bounds().is_empty());
    }

    #[test]
    fn test_is_defined() {
        assert!(dvec3(0.0, 0.0, 0.0).is_defined());
        assert!(!dvec3(0.0, f64::NAN, 0.0).is_defined());
        assert!(!undefined().is_defined());
    }
}
