use crate::error::Result;

/// Validate structural integrity of a geometric entity.
///
/// Entities that can exist in an invalid state (a rectangle whose corners
/// do not describe a planar rectangle, an inverted bounding box) report the
/// reason through the error instead of being silently repaired.
pub trait Validate {
    fn validate(&self) -> Result<()>;

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
