//! Resolving a screen click to a field value.

use std::fmt;

use fv_core::Result;
use fv_field::{Field, FieldSample};
use fv_math::{PickRay, Point3, Rect3, Vector3};
use serde::Serialize;
use tracing::debug;

/// What lies under a click on a view plane.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClickResult {
    pub point: Point3,
    pub label: String,
    /// NaN-filled where the field is undefined.
    pub value: Vector3,
}

impl ClickResult {
    pub fn is_defined(&self) -> bool {
        self.value.is_defined()
    }
}

impl fmt::Display for ClickResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at ({:.4}, {:.4}, {:.4}): ",
            self.label, self.point.x, self.point.y, self.point.z
        )?;
        if self.is_defined() {
            write!(
                f,
                "({:.6e}, {:.6e}, {:.6e}) |{:.6e}|",
                self.value.x,
                self.value.y,
                self.value.z,
                self.value.length()
            )
        } else {
            write!(f, "undefined")
        }
    }
}

/// Intersect `ray` with the plane of `frame` and query `field` there.
///
/// The point need not lie inside the frame; outside the field's support the
/// value is simply undefined. Fails with
/// [`AmbiguousIntersection`](fv_core::FieldViewError::AmbiguousIntersection)
/// when the ray runs parallel to the plane.
pub fn resolve_click(frame: &Rect3, field: &dyn Field, ray: &PickRay) -> Result<ClickResult> {
    let point = ray.intersect_plane(frame.bottom_left(), frame.normal())?;
    let result = ClickResult {
        point,
        label: field.field_name_at(point).to_string(),
        value: field.field_at(point),
    };
    debug!(?point, label = %result.label, "click resolved");
    Ok(result)
}
