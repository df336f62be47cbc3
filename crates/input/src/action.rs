/// A camera-level action derived from one frame of input.
///
/// The camera controller consumes actions, never raw key state. Magnitudes are
/// already scaled by frame time and speed: distances in world units, angles
/// in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Move along the camera's forward direction.
    Thrust(f32),
    /// Move along the camera's left axis (negative moves right).
    StrafeHorizontal(f32),
    /// Move along the vertical axis (negative moves down).
    StrafeVertical(f32),
    /// Turn left (negative turns right).
    Yaw(f32),
    /// Rotate about the left axis.
    Pitch(f32),
    /// Rotate up about the forward axis.
    Roll(f32),
    /// Switch automatic orbiting on or off.
    ToggleOrbit,
    /// Leave the application.
    Exit,
}
