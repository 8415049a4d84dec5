use fv_math::{DMat4, DVec3, Frame3, PickRay, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::resample::Projector;

/// A perspective viewport: look-at camera plus the pixel size of the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub eye: Point3,
    pub target: Point3,
    pub up: Vector3,
    /// Vertical field of view in degrees.
    pub fov_y_deg: f64,
    pub near: f64,
    pub far: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    /// Eye at (0, 0, 5) looking at the origin, 45° FOV, 640×480.
    fn default() -> Self {
        Self {
            eye: Point3::new(0.0, 0.0, 5.0),
            target: Point3::ZERO,
            up: Vector3::Y,
            fov_y_deg: 45.0,
            near: 0.1,
            far: 100.0,
            width: 640,
            height: 480,
        }
    }
}

impl Viewport {
    pub fn aspect(&self) -> f64 {
        self.width.max(1) as f64 / self.height.max(1) as f64
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// OpenGL-style projection (NDC z in -1..1).
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh_gl(self.fov_y_deg.to_radians(), self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// On-screen size in pixels of a world distance seen at the middle of
    /// the depth range.
    pub fn project_distance(&self, world_distance: f64) -> f64 {
        let range = 0.5 * (self.near + self.far);
        let half_fov = 0.5 * self.fov_y_deg.to_radians();
        world_distance * self.height as f64 / (2.0 * range * half_fov.tan())
    }

    /// World point under pixel `(px, py)` at `depth` (0 near plane, 1 far
    /// plane). Pixel rows count down from the top of the window.
    pub fn unproject(&self, px: f64, py: f64, depth: f64) -> Point3 {
        let w = self.width.max(1) as f64;
        let h = self.height.max(1) as f64;
        let ndc = DVec3::new(
            2.0 * px / w - 1.0,
            2.0 * (h - py - 1.0) / h - 1.0,
            2.0 * depth - 1.0,
        );
        self.view_projection().inverse().project_point3(ndc)
    }

    /// Ray from the near plane to the far plane under a pixel.
    pub fn click_ray(&self, px: f64, py: f64) -> PickRay {
        PickRay::new(self.unproject(px, py, 0.0), self.unproject(px, py, 1.0))
    }

    /// Aim at the centre of `bounds` from far enough back to see all of it,
    /// keeping the current view direction.
    pub fn fit_to_frame(&mut self, bounds: &Frame3) {
        if bounds.is_empty() {
            return;
        }
        let center = bounds.center();
        let size = bounds.spans();
        let max_dim = size.x.max(size.y).max(size.z);
        let distance = max_dim / (2.0 * (0.5 * self.fov_y_deg.to_radians()).tan());

        let mut view_dir = (self.target - self.eye).normalize_or_zero();
        if view_dir == Vector3::ZERO {
            view_dir = Vector3::NEG_Z;
        }
        self.target = center;
        self.eye = center - view_dir * distance * 1.5;
        // keep the whole box between the clip planes
        self.far = self.far.max(distance * 1.5 + max_dim * 2.0);
    }
}

impl Projector for Viewport {
    fn project(&self, world_distance: f64) -> f64 {
        self.project_distance(world_distance)
    }
}
