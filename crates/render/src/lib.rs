//! Rendering adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read the grid and never mutate it.
//! - Everything a renderer knows about the camera arrives in a [`FrameView`]
//!   built for that frame; there is no shared camera state.

mod renderer;

pub use renderer::{DebugTextRenderer, FrameView, Renderer};

pub fn crate_info() -> &'static str {
    "mapviz-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
