//! Shared types for the map visualizer.

mod types;

pub use types::{Instance, Rgba};
