use glam::Mat4;
use serde::{Deserialize, Serialize};

/// Perspective projection parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Projection {
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: 20_000.0,
        }
    }
}

impl Projection {
    /// Update the aspect ratio for a new surface size.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_sets_aspect() {
        let mut p = Projection::default();
        p.set_viewport(1280, 720);
        assert!((p.aspect - 16.0 / 9.0).abs() < 1e-6);
        p.set_viewport(800, 0);
        assert_eq!(p.aspect, 800.0);
    }

    #[test]
    fn matrix_is_finite() {
        let m = Projection::default().matrix();
        assert!(m.to_cols_array().iter().all(|v| v.is_finite()));
    }
}
