use crate::camera::FreeCamera;
use glam::{Quat, Vec3};

/// Automatic circling of the camera around a fixed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub target: Vec3,
    pub degrees_per_second: f32,
    active: bool,
}

impl Default for Orbit {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 60.0)
    }
}

impl Orbit {
    /// Inactive orbit around `target`.
    pub fn new(target: Vec3, degrees_per_second: f32) -> Self {
        Self {
            target,
            degrees_per_second,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Flip orbit mode. Turning it on aims the camera at the target.
    pub fn toggle(&mut self, camera: &mut FreeCamera) -> bool {
        self.active = !self.active;
        if self.active {
            camera.look_at(self.target);
        }
        tracing::debug!(active = self.active, "orbit toggled");
        self.active
    }

    /// Rotate the camera about the world-up axis through the target.
    ///
    /// Forward and up turn with the position, so a camera aimed at the
    /// target stays aimed at it.
    pub fn step(&self, camera: &mut FreeCamera, dt: f32) {
        if !self.active {
            return;
        }
        let rotation = Quat::from_rotation_y((self.degrees_per_second * dt).to_radians());
        camera.position = self.target + rotation * (camera.position - self.target);
        camera.set_orientation(rotation * camera.forward(), rotation * camera.up());
    }
}
