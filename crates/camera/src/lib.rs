//! Free-flying camera for the map visualizer.
//!
//! The camera stores a position plus explicit `forward` and `up` vectors and
//! rotates them directly. Angles are in degrees throughout.
//!
//! # Invariants
//! - `view_matrix()` is a pure function of position, forward and up.
//! - `forward` and `up` are unit length after every operation.
//! - With `orthonormalize` enabled, `up` is re-projected perpendicular to
//!   `forward` after every rotation.

mod camera;
mod controller;
mod orbit;
mod projection;

pub use camera::{CameraConfig, FlightModel, FreeCamera};
pub use controller::CameraController;
pub use orbit::Orbit;
pub use projection::Projection;

pub fn crate_info() -> &'static str {
    "mapviz-camera v0.1.0"
}
