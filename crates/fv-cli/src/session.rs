use std::path::Path;

use fv_core::{FieldViewError, Result};
use fv_field::{AnalyticField, Field, FieldSet, GridField};
use fv_math::{Frame3, Point3, Vector3};
use fv_view::{PlaneRequest, ViewerSettings, Viewport};
use serde::{Deserialize, Serialize};

/// Everything one batch run needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Camera and window size; fitted to the field bounds when absent.
    #[serde(default)]
    pub viewport: Option<Viewport>,
    #[serde(default)]
    pub settings: ViewerSettings,
    pub field: FieldSource,
    #[serde(default)]
    pub planes: Vec<PlaneRequest>,
    #[serde(default)]
    pub clicks: Vec<Click>,
}

impl Session {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Where the field comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldSource {
    /// Sampled grids, later grids taking precedence where they overlap.
    Grids { grids: Vec<GridField> },
    /// A built-in closed-form field over `[min, max]`, centred in the box.
    Analytic { preset: Preset, min: Point3, max: Point3 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// The position relative to the centre.
    Position,
    /// A unit z-dipole; undefined at the centre.
    Dipole,
    /// Rotation about the z axis.
    Swirl,
}

impl Preset {
    pub fn name(self) -> &'static str {
        match self {
            Preset::Position => "position",
            Preset::Dipole => "dipole",
            Preset::Swirl => "swirl",
        }
    }

    /// Value at offset `r` from the centre.
    pub fn eval(self, r: Vector3) -> Vector3 {
        match self {
            Preset::Position => r,
            Preset::Dipole => {
                let d = r.length();
                if d == 0.0 {
                    return fv_field::undefined();
                }
                let m = Vector3::Z;
                let n = r / d;
                (3.0 * m.dot(n) * n - m) / (d * d * d)
            }
            Preset::Swirl => Vector3::new(-r.y, r.x, 0.0),
        }
    }
}

impl FieldSource {
    pub fn build(&self) -> Result<Box<dyn Field>> {
        match self {
            FieldSource::Grids { grids } if grids.is_empty() => {
                Err(FieldViewError::Config("field source lists no grids".into()))
            }
            FieldSource::Grids { grids } => {
                Ok(Box::new(grids.iter().cloned().collect::<FieldSet>()))
            }
            FieldSource::Analytic { preset, min, max } => {
                let bounds = Frame3::new(*min, *max);
                let center = bounds.center();
                let preset = *preset;
                Ok(Box::new(AnalyticField::new(preset.name(), bounds, move |p: Point3| {
                    preset.eval(p - center)
                })))
            }
        }
    }
}

/// A click at window pixel `(x, y)`, optionally on a given view (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Click {
    #[serde(default)]
    pub view: Option<usize>,
    pub x: f64,
    pub y: f64,
}
