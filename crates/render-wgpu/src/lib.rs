//! wgpu render backend for the height grid.
//!
//! Every box shares one unit-cube mesh. Per-box position, scale and color
//! live in an instance buffer uploaded once; each frame writes a single
//! world-view-projection uniform and issues one instanced draw for the solid
//! boxes and, optionally, one for their outlines.
//!
//! # Invariants
//! - The instance buffer is immutable after construction.
//! - Renderer never mutates the grid or the camera.

mod gpu;
mod mesh;
mod shaders;

pub use gpu::{GridRenderer, InstanceRaw, RenderError};
pub use mesh::{CUBE_LINE_INDICES, CUBE_TRIANGLE_INDICES, CUBE_VERTICES};
