use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldViewError {
    #[error("No coordinate axis lies in the plane (no normal component is exactly zero)")]
    NoAxisInPlane,

    #[error("Plane does not intersect bounds of field ({found} distinct edge crossings, need 2)")]
    PlaneDoesNotIntersectBounds { found: usize },

    #[error("Invalid rectangle: {0}")]
    InvalidRectangle(String),

    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("Pick ray is parallel to the selected plane, no point found")]
    AmbiguousIntersection,

    #[error("Zero-width data range [{value}, {value}]")]
    ZeroWidthRange { value: f64 },

    #[error("Data range [{min}, {max}] must have finite bounds")]
    NonFiniteRange { min: f64, max: f64 },

    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    #[error("No field loaded")]
    NoField,

    #[error("No field view selected")]
    NoViewSelected,

    #[error("Field view not found")]
    ViewNotFound,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FieldViewError {
    /// True for failures the user can fix by re-specifying the request
    /// (a different plane, a different click). None of the variants is fatal
    /// to the process; this only separates user input problems from I/O.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            Self::NoAxisInPlane
                | Self::PlaneDoesNotIntersectBounds { .. }
                | Self::InvalidRectangle(_)
                | Self::AmbiguousIntersection
                | Self::ZeroWidthRange { .. }
                | Self::NonFiniteRange { .. }
                | Self::NoViewSelected
        )
    }
}

pub type Result<T> = std::result::Result<T, FieldViewError>;
