use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// How translation and yaw relate to the world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightModel {
    /// Everything is relative to the camera's own axes.
    #[default]
    Free,
    /// Thrust stays in the horizontal plane; vertical strafe and yaw use world up.
    Grounded,
}

/// Initial camera placement and behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub flight: FlightModel,
    pub orthonormalize: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 150.0, -300.0),
            forward: Vec3::Z,
            up: Vec3::Y,
            flight: FlightModel::Free,
            orthonormalize: true,
        }
    }
}

/// Camera with an explicit position, forward and up.
///
/// Camera motion exists outside the grid: the renderer only ever reads
/// `view_matrix()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeCamera {
    pub position: Vec3,
    forward: Vec3,
    up: Vec3,
    pub flight: FlightModel,
    /// Re-project `up` perpendicular to `forward` after each rotation.
    pub orthonormalize: bool,
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl FreeCamera {
    /// Zero-length `forward` or `up` fall back to `+Z` and `+Y`. An `up`
    /// parallel to `forward` is replaced by a perpendicular one.
    pub fn new(position: Vec3, forward: Vec3, up: Vec3) -> Self {
        let forward = forward.try_normalize().unwrap_or_else(|| {
            tracing::warn!("camera forward vector has zero length, using +Z");
            Vec3::Z
        });
        let up = up.try_normalize().unwrap_or_else(|| {
            tracing::warn!("camera up vector has zero length, using +Y");
            Vec3::Y
        });
        let up = if forward.cross(up).length_squared() > PARALLEL_EPSILON {
            up
        } else {
            tracing::warn!(?forward, ?up, "camera up is parallel to forward, picking another");
            perpendicular_up(forward, &[Vec3::Y, Vec3::Z])
        };
        Self {
            position,
            forward,
            up,
            flight: FlightModel::Free,
            orthonormalize: true,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.position, config.forward, config.up);
        camera.flight = config.flight;
        camera.orthonormalize = config.orthonormalize;
        camera
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// `normalize(cross(up, forward))`, or `None` when the two are parallel.
    pub fn left(&self) -> Option<Vec3> {
        self.up.cross(self.forward).try_normalize()
    }

    /// Move along the view direction. In [`FlightModel::Grounded`] the
    /// direction is flattened onto the horizontal plane first.
    pub fn thrust(&mut self, amount: f32) {
        self.forward = self.forward.normalize();
        let direction = match self.flight {
            FlightModel::Free => Some(self.forward),
            FlightModel::Grounded => Vec3::new(self.forward.x, 0.0, self.forward.z).try_normalize(),
        };
        if let Some(direction) = direction {
            self.position += direction * amount;
        }
    }

    /// Move along the left axis; negative amounts move right.
    pub fn strafe_horizontal(&mut self, amount: f32) {
        if let Some(left) = self.left() {
            self.position += left * amount;
        }
    }

    /// Move along the camera's up, or world up when grounded.
    pub fn strafe_vertical(&mut self, amount: f32) {
        self.up = self.up.normalize();
        self.position += self.vertical_axis() * amount;
    }

    /// Turn left by `degrees` about the yaw axis.
    pub fn yaw(&mut self, degrees: f32) {
        self.forward = self.forward.normalize();
        match self.flight {
            FlightModel::Free => {
                let axis = self.up.normalize();
                self.forward = rotate(self.forward, axis, degrees);
            }
            FlightModel::Grounded => {
                self.forward = rotate(self.forward, Vec3::Y, degrees);
                self.up = rotate(self.up, Vec3::Y, degrees);
            }
        }
        self.finish_rotation();
    }

    /// Rotate forward and up about the left axis. Positive pitches the nose down.
    pub fn pitch(&mut self, degrees: f32) {
        self.forward = self.forward.normalize();
        let Some(left) = self.left() else {
            return;
        };
        self.forward = rotate(self.forward, left, degrees);
        self.up = rotate(self.up, left, degrees);
        self.finish_rotation();
    }

    /// Rotate up about forward (right-hand rule). Positive tilts up toward the
    /// camera's right.
    pub fn roll(&mut self, degrees: f32) {
        self.up = self.up.normalize();
        self.up = rotate(self.up, self.forward.normalize(), degrees);
        self.finish_rotation();
    }

    /// Aim at `target`, keeping up as close to world up as the new forward allows.
    /// Looking straight up or down keeps the old up, or the old forward, instead.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        self.up = perpendicular_up(forward, &[Vec3::Y, self.up, self.forward]);
        self.forward = forward;
        self.finish_rotation();
    }

    /// Look-at matrix from `position` toward `position + forward`.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward, self.up)
    }

    /// Replace the orientation wholesale (used by orbit mode).
    pub(crate) fn set_orientation(&mut self, forward: Vec3, up: Vec3) {
        self.forward = forward;
        self.up = up;
        self.finish_rotation();
    }

    fn vertical_axis(&self) -> Vec3 {
        match self.flight {
            FlightModel::Free => self.up,
            FlightModel::Grounded => Vec3::Y,
        }
    }

    fn finish_rotation(&mut self) {
        self.forward = self.forward.normalize();
        self.up = self.up.normalize();
        if self.orthonormalize {
            if let Some(up) = self.forward.cross(self.up).cross(self.forward).try_normalize() {
                self.up = up;
            }
        }
    }
}

const PARALLEL_EPSILON: f32 = 1e-10;

/// Unit vector perpendicular to `forward`, taken from the first hint that is
/// not parallel to it.
fn perpendicular_up(forward: Vec3, hints: &[Vec3]) -> Vec3 {
    hints
        .iter()
        .filter(|hint| forward.cross(**hint).length_squared() > PARALLEL_EPSILON)
        .find_map(|hint| forward.cross(*hint).cross(forward).try_normalize())
        .unwrap_or_else(|| forward.any_orthonormal_vector())
}

fn rotate(v: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    Quat::from_axis_angle(axis, degrees.to_radians()) * v
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn scenario_camera() -> FreeCamera {
        FreeCamera::new(Vec3::new(0.0, 150.0, -300.0), Vec3::Z, Vec3::Y)
    }

    #[test]
    fn default_camera_matches_config_defaults() {
        let cam = FreeCamera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 150.0, -300.0));
        assert_eq!(cam.forward(), Vec3::Z);
        assert_eq!(cam.up(), Vec3::Y);
        assert!(cam.orthonormalize);
    }

    #[test]
    fn zero_vectors_fall_back() {
        let cam = FreeCamera::new(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO);
        assert_eq!(cam.forward(), Vec3::Z);
        assert_eq!(cam.up(), Vec3::Y);
    }

    #[test]
    fn view_matrix_is_pure() {
        let mut cam = scenario_camera();
        cam.yaw(17.0);
        cam.pitch(-8.0);
        let a = cam.view_matrix();
        let b = cam.view_matrix();
        assert_eq!(a, b);
        assert!(!a.col(0).x.is_nan());
    }

    #[test]
    fn view_matrix_maps_position_to_origin() {
        let cam = scenario_camera();
        let eye = cam.view_matrix().transform_point3(cam.position);
        assert!(eye.abs_diff_eq(Vec3::ZERO, EPS));
        // Right-handed: the look direction ends up on -Z in view space.
        let ahead = cam.view_matrix().transform_point3(cam.position + cam.forward());
        assert!(ahead.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), EPS));
    }

    #[test]
    fn thrust_round_trip() {
        for flight in [FlightModel::Free, FlightModel::Grounded] {
            let mut cam = FreeCamera::new(
                Vec3::new(3.0, -2.0, 7.0),
                Vec3::new(0.3, -0.4, 0.8),
                Vec3::Y,
            );
            cam.flight = flight;
            let start = cam.position;
            cam.thrust(12.5);
            assert!(!cam.position.abs_diff_eq(start, EPS));
            cam.thrust(-12.5);
            assert!(cam.position.abs_diff_eq(start, EPS), "{flight:?}");
        }
    }

    #[test]
    fn thrust_moves_along_forward() {
        let mut cam = scenario_camera();
        cam.thrust(10.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 150.0, -290.0), EPS));
    }

    #[test]
    fn grounded_thrust_stays_level() {
        let mut cam = FreeCamera::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 1.0), Vec3::Y);
        cam.flight = FlightModel::Grounded;
        cam.thrust(5.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), EPS));
    }

    #[test]
    fn grounded_thrust_straight_down_does_nothing() {
        let mut cam = FreeCamera::new(Vec3::ONE, Vec3::NEG_Y, Vec3::Z);
        cam.flight = FlightModel::Grounded;
        cam.thrust(5.0);
        assert_eq!(cam.position, Vec3::ONE);
    }

    #[test]
    fn strafe_horizontal_moves_left() {
        let mut cam = scenario_camera();
        // cross(+Y, +Z) = +X
        cam.strafe_horizontal(4.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(4.0, 150.0, -300.0), EPS));
        cam.strafe_horizontal(-4.0);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 150.0, -300.0), EPS));
    }

    #[test]
    fn strafe_vertical_follows_flight_model() {
        let mut free = FreeCamera::new(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 1.0, -1.0));
        free.orthonormalize = false;
        free.strafe_vertical(2.0_f32.sqrt());
        assert!(free.position.abs_diff_eq(Vec3::new(0.0, 1.0, -1.0), EPS));

        let mut grounded = free;
        grounded.position = Vec3::ZERO;
        grounded.flight = FlightModel::Grounded;
        grounded.strafe_vertical(3.0);
        assert!(grounded.position.abs_diff_eq(Vec3::new(0.0, 3.0, 0.0), EPS));
    }

    #[test]
    fn yaw_round_trip() {
        for flight in [FlightModel::Free, FlightModel::Grounded] {
            for theta in [-359.0, -90.0, -12.5, 0.0, 33.0, 180.0, 359.0] {
                let mut cam = FreeCamera::new(
                    Vec3::ZERO,
                    Vec3::new(0.2, -0.3, 0.9),
                    Vec3::new(0.1, 1.0, 0.0),
                );
                cam.flight = flight;
                cam.orthonormalize = false;
                let (f, u) = (cam.forward(), cam.up());
                cam.yaw(theta);
                cam.yaw(-theta);
                assert!(cam.forward().abs_diff_eq(f, EPS), "{flight:?} {theta}");
                assert!(cam.up().abs_diff_eq(u, EPS), "{flight:?} {theta}");
            }
        }
    }

    /// An already orthonormal camera with every setting at its default.
    fn tilted_camera(flight: FlightModel) -> FreeCamera {
        let mut cam = FreeCamera::new(Vec3::new(5.0, 40.0, -60.0), Vec3::Z, Vec3::Y);
        cam.yaw(23.0);
        cam.pitch(-17.0);
        cam.roll(9.0);
        cam.flight = flight;
        cam
    }

    #[test]
    fn yaw_round_trip_with_orthonormalize() {
        for flight in [FlightModel::Free, FlightModel::Grounded] {
            for theta in [-359.0, -90.0, -12.5, 0.0, 33.0, 180.0, 359.0] {
                let mut cam = tilted_camera(flight);
                assert!(cam.orthonormalize);
                assert!(cam.forward().dot(cam.up()).abs() < EPS);
                let (f, u) = (cam.forward(), cam.up());
                cam.yaw(theta);
                cam.yaw(-theta);
                assert!(cam.forward().abs_diff_eq(f, EPS), "{flight:?} {theta}");
                assert!(cam.up().abs_diff_eq(u, EPS), "{flight:?} {theta}");
            }
        }
    }

    #[test]
    fn thrust_round_trip_after_rotation() {
        for flight in [FlightModel::Free, FlightModel::Grounded] {
            let mut cam = tilted_camera(flight);
            cam.yaw(37.0);
            cam.pitch(-12.0);
            let start = cam.position;
            cam.thrust(25.0);
            assert!(!cam.position.abs_diff_eq(start, EPS), "{flight:?}");
            cam.thrust(-25.0);
            assert!(cam.position.abs_diff_eq(start, EPS), "{flight:?}");
        }
    }

    #[test]
    fn positive_yaw_turns_left() {
        let mut cam = scenario_camera();
        cam.yaw(90.0);
        assert!(cam.forward().abs_diff_eq(Vec3::X, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
    }

    #[test]
    fn pitch_ninety_points_down() {
        let mut cam = scenario_camera();
        // left = cross(+Y, +Z) = +X; rotating +Z by +90 about +X gives -Y.
        cam.pitch(90.0);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Y, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::Z, EPS));
        assert_eq!(cam.position, Vec3::new(0.0, 150.0, -300.0));
    }

    fn is_finite(m: Mat4) -> bool {
        m.to_cols_array().iter().all(|v| v.is_finite())
    }

    #[test]
    fn parallel_up_is_replaced() {
        let mut cam = FreeCamera::new(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert_eq!(cam.forward(), Vec3::Y);
        assert!(cam.forward().dot(cam.up()).abs() < EPS);
        assert!((cam.up().length() - 1.0).abs() < EPS);
        assert!(cam.left().is_some());
        assert!(is_finite(cam.view_matrix()));

        cam.pitch(30.0);
        assert!(!cam.forward().abs_diff_eq(Vec3::Y, EPS));
        cam.strafe_horizontal(5.0);
        assert!((cam.position.length() - 5.0).abs() < EPS);
    }

    #[test]
    fn anti_parallel_up_is_replaced() {
        let cam = FreeCamera::new(
            Vec3::ONE,
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(0.0, 0.0, -3.0),
        );
        assert!(cam.up().abs_diff_eq(Vec3::Y, EPS));
        assert!(is_finite(cam.view_matrix()));
    }

    #[test]
    fn look_at_straight_down_keeps_a_usable_up() {
        let mut cam = FreeCamera::new(Vec3::new(0.0, 150.0, 0.0), Vec3::Z, Vec3::Y);
        cam.look_at(Vec3::ZERO);
        assert!(cam.forward().abs_diff_eq(Vec3::NEG_Y, EPS));
        // The old forward becomes up, as with a 90 degree pitch.
        assert!(cam.up().abs_diff_eq(Vec3::Z, EPS));
        assert!(is_finite(cam.view_matrix()));

        let before = cam.forward();
        cam.pitch(-10.0);
        assert!(!cam.forward().abs_diff_eq(before, EPS));
        let before = cam.forward();
        cam.yaw(10.0);
        cam.pitch(5.0);
        assert!(!cam.forward().abs_diff_eq(before, EPS));
        assert!(is_finite(cam.view_matrix()));
    }

    #[test]
    fn look_at_straight_up_keeps_current_up() {
        let mut cam = FreeCamera::new(Vec3::ZERO, Vec3::Z, Vec3::X);
        cam.look_at(Vec3::new(0.0, 40.0, 0.0));
        assert!(cam.forward().abs_diff_eq(Vec3::Y, EPS));
        assert!(cam.up().abs_diff_eq(Vec3::X, EPS));
        assert!(is_finite(cam.view_matrix()));
    }

    #[test]
    fn positive_roll_tilts_up_to_the_right() {
        let mut cam = scenario_camera();
        // Right of a camera looking down +Z with +Y up is -X.
        cam.roll(90.0);
        assert!(cam.up().abs_diff_eq(Vec3::NEG_X, EPS));
        assert!(cam.forward().abs_diff_eq(Vec3::Z, EPS));
    }

    #[test]
    fn orthonormalize_keeps_axes_perpendicular() {
        let mut cam = FreeCamera::new(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 1.0, 0.5));
        cam.yaw(10.0);
        for _ in 0..500 {
            cam.yaw(3.7);
            cam.pitch(-2.1);
            cam.roll(1.3);
        }
        assert!(cam.forward().dot(cam.up()).abs() < 1e-4);
        assert!((cam.forward().length() - 1.0).abs() < 1e-4);
        assert!((cam.up().length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn without_orthonormalize_skew_is_preserved() {
        let mut cam = FreeCamera::new(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 1.0, 1.0));
        cam.orthonormalize = false;
        cam.roll(0.0);
        assert!(cam.forward().dot(cam.up()) > 0.5);
    }

    #[test]
    fn look_at_aims_at_target() {
        let mut cam = scenario_camera();
        cam.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!(cam.forward().abs_diff_eq(expected, EPS));
        assert!(cam.up().y > 0.0);
        assert!(cam.forward().dot(cam.up()).abs() < EPS);
    }
}
