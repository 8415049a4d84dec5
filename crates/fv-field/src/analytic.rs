use std::fmt;

use fv_math::{Frame3, Point3, Vector3};

use crate::{undefined, Field};

/// A field computed from a closure, defined inside its bounds.
pub struct AnalyticField<F> {
    name: String,
    bounds: Frame3,
    f: F,
}

impl<F> AnalyticField<F>
where
    F: Fn(Point3) -> Vector3 + Send + Sync,
{
    pub fn new(name: impl Into<String>, bounds: Frame3, f: F) -> Self {
        Self {
            name: name.into(),
            bounds,
            f,
        }
    }
}

impl<F> fmt::Debug for AnalyticField<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnalyticField")
            .field("name", &self.name)
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}

impl<F> Field for AnalyticField<F>
where
    F: Fn(Point3) -> Vector3 + Send + Sync,
{
    fn field_at(&self, point: Point3) -> Vector3 {
        if self.bounds.contains_point(point) {
            (self.f)(point)
        } else {
            undefined()
        }
    }

    fn field_name_at(&self, _point: Point3) -> &str {
        &self.name
    }

    fn bounds(&self) -> Frame3 {
        self.bounds
    }
}
