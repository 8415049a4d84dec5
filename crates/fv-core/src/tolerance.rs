/// Tolerances for fuzzy comparison of points, vectors and rectangles.
///
/// Points compare per axis with an absolute plus a relative slack. Vectors
/// compare by relative magnitude and by the angle between them, so two
/// vectors can be "equal" without any component matching exactly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Absolute per-axis slack for point comparison (model units)
    pub point_abs: f64,
    /// Relative per-axis slack for point comparison (fraction of the coordinate)
    pub point_rel: f64,
    /// Relative magnitude slack for vector comparison
    pub magnitude_rel: f64,
    /// Angular slack for vector comparison and rectangle squareness (radians)
    pub angular: f64,
}

impl Tolerance {
    pub const DEFAULT_POINT_ABS: f64 = 0.001;
    pub const DEFAULT_POINT_REL: f64 = 0.0001;
    pub const DEFAULT_MAGNITUDE_REL: f64 = 0.01;
    pub const DEFAULT_ANGULAR: f64 = 0.01;

    pub fn new(point_abs: f64, point_rel: f64, magnitude_rel: f64, angular: f64) -> Self {
        Self {
            point_abs,
            point_rel,
            magnitude_rel,
            angular,
        }
    }

    pub fn default_precision() -> Self {
        Self::new(
            Self::DEFAULT_POINT_ABS,
            Self::DEFAULT_POINT_REL,
            Self::DEFAULT_MAGNITUDE_REL,
            Self::DEFAULT_ANGULAR,
        )
    }

    /// Check one coordinate pair: `|a - b| <= abs + rel * |a|`.
    pub fn coord_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.point_abs + self.point_rel * a.abs()
    }

    /// Check two magnitudes agree to within `magnitude_rel` of the first.
    pub fn magnitude_eq(self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.magnitude_rel * a.abs()
    }

    /// Check an angle (radians) is within the angular tolerance.
    pub fn angle_eq(self, angle: f64) -> bool {
        angle <= self.angular
    }

    /// Check that the cosine of the angle between two directions describes a
    /// right angle to within the angular tolerance.
    pub fn is_perpendicular(self, cosine: f64) -> bool {
        cosine.abs() <= self.angular.sin()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::default_precision()
    }
}
