use crate::camera::FreeCamera;
use crate::orbit::Orbit;
use mapviz_input::Action;

/// Applies input actions to the one active camera.
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraController {
    pub camera: FreeCamera,
    pub orbit: Orbit,
}

impl CameraController {
    pub fn new(camera: FreeCamera, orbit: Orbit) -> Self {
        Self { camera, orbit }
    }

    /// Apply one frame of actions in order. Returns `true` if exit was requested.
    pub fn apply(&mut self, actions: &[Action]) -> bool {
        let mut exit = false;
        for action in actions {
            match *action {
                Action::Thrust(d) => self.camera.thrust(d),
                Action::StrafeHorizontal(d) => self.camera.strafe_horizontal(d),
                Action::StrafeVertical(d) => self.camera.strafe_vertical(d),
                Action::Yaw(deg) => self.camera.yaw(deg),
                Action::Pitch(deg) => self.camera.pitch(deg),
                Action::Roll(deg) => self.camera.roll(deg),
                Action::ToggleOrbit => {
                    self.orbit.toggle(&mut self.camera);
                }
                Action::Exit => exit = true,
            }
        }
        exit
    }

    /// Advance time-driven motion (orbit mode) by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.orbit.step(&mut self.camera, dt);
    }
}
