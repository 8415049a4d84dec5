//! Viewer settings and plane requests.

use std::path::Path;

use fv_color::{Palette, Scale};
use fv_core::Result;
use fv_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::resample::{Component, ValueRange};

/// Document-wide mapping settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerSettings {
    pub scale: Scale,
    pub palette: Palette,
}

impl ViewerSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

/// The two ways of specifying a cutting plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlaneSpec {
    /// Plane through `point` with `normal`; one normal component must be
    /// exactly zero.
    General { point: Point3, normal: Vector3 },
    /// Vertical plane through `point` whose normal is at `angle_deg` from
    /// the x axis, spanning `z_min..z_max`.
    ZParallel {
        point: Point3,
        angle_deg: f64,
        z_min: f64,
        z_max: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaneKind {
    General,
    #[default]
    ZParallel,
}

impl PlaneSpec {
    pub fn kind(&self) -> PlaneKind {
        match self {
            PlaneSpec::General { .. } => PlaneKind::General,
            PlaneSpec::ZParallel { .. } => PlaneKind::ZParallel,
        }
    }
}

/// A complete plane-selection request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneRequest {
    #[serde(flatten)]
    pub plane: PlaneSpec,
    #[serde(default)]
    pub component: Component,
    #[serde(default)]
    pub fixed_range: Option<ValueRange>,
}

impl PlaneRequest {
    pub fn general(point: Point3, normal: Vector3) -> Self {
        Self {
            plane: PlaneSpec::General { point, normal },
            component: Component::default(),
            fixed_range: None,
        }
    }

    pub fn z_parallel(point: Point3, angle_deg: f64, z_min: f64, z_max: f64) -> Self {
        Self {
            plane: PlaneSpec::ZParallel {
                point,
                angle_deg,
                z_min,
                z_max,
            },
            component: Component::default(),
            fixed_range: None,
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.component = component;
        self
    }

    pub fn with_fixed_range(mut self, min: f64, max: f64) -> Self {
        self.fixed_range = Some(ValueRange::new(min, max));
        self
    }
}

/// Last values entered in the plane dialog, carried by the caller between
/// invocations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneDialogState {
    pub kind: PlaneKind,
    pub point: Point3,
    pub normal: Vector3,
    pub angle_deg: f64,
    pub z_min: f64,
    pub z_max: f64,
    pub component: Component,
    pub fixed_range: Option<ValueRange>,
    /// Requested sample spacing; resolution actually follows the viewport.
    pub grid_spacing: f64,
}

impl Default for PlaneDialogState {
    fn default() -> Self {
        Self {
            kind: PlaneKind::ZParallel,
            point: Point3::ZERO,
            normal: Vector3::Z,
            angle_deg: 0.0,
            z_min: 25.0,
            z_max: 30.0,
            component: Component::X,
            fixed_range: None,
            grid_spacing: 0.1,
        }
    }
}

impl PlaneDialogState {
    /// Record the values of a submitted request.
    pub fn remember(&mut self, request: &PlaneRequest) {
        self.kind = request.plane.kind();
        match request.plane {
            PlaneSpec::General { point, normal } => {
                self.point = point;
                self.normal = normal;
            }
            PlaneSpec::ZParallel {
                point,
                angle_deg,
                z_min,
                z_max,
            } => {
                self.point = point;
                self.angle_deg = angle_deg;
                self.z_min = z_min;
                self.z_max = z_max;
            }
        }
        self.component = request.component;
        self.fixed_range = request.fixed_range;
    }

    /// Rebuild the last request of the remembered kind.
    pub fn to_request(&self) -> PlaneRequest {
        let plane = match self.kind {
            PlaneKind::General => PlaneSpec::General {
                point: self.point,
                normal: self.normal,
            },
            PlaneKind::ZParallel => PlaneSpec::ZParallel {
                point: self.point,
                angle_deg: self.angle_deg,
                z_min: self.z_min,
                z_max: self.z_max,
            },
        };
        PlaneRequest {
            plane,
            component: self.component,
            fixed_range: self.fixed_range,
        }
    }
}
