use glam::{Mat4, Vec3};
use mapviz_common::Rgba;
use mapviz_grid::HeightGrid;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Camera matrices for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub view: Mat4,
    pub projection: Mat4,
}

impl Default for FrameView {
    fn default() -> Self {
        Self {
            view: Mat4::look_at_rh(Vec3::new(0.0, 150.0, -300.0), Vec3::ZERO, Vec3::Y),
            projection: Mat4::perspective_rh(45.0_f32.to_radians(), 16.0 / 9.0, 1.0, 20_000.0),
        }
    }
}

impl FrameView {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    /// Combined matrix for the shader. The grid has no world transform of its
    /// own, so this is `projection * view` (column vectors).
    pub fn world_view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Camera position recovered from the view matrix.
    pub fn eye(&self) -> Vec3 {
        self.view.inverse().transform_point3(Vec3::ZERO)
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the grid and a frame view, then produces output. It
/// never mutates the grid.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the grid from the given view.
    fn render(&self, grid: &HeightGrid, frame: &FrameView) -> Self::Output;
}

/// Text renderer for CLI output, logging and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Print every instance, not just the summary.
    pub list_instances: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self {
            list_instances: true,
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, grid: &HeightGrid, frame: &FrameView) -> String {
        let mut out = String::new();
        let (min, max) = grid.extent();
        let eye = frame.eye();

        let _ = writeln!(
            out,
            "=== Grid {}x{} (spacing={}, footprint={}) ===",
            grid.rows(),
            grid.columns(),
            grid.spacing(),
            grid.footprint()
        );
        let _ = writeln!(out, "Instances: {}", grid.len());
        let _ = writeln!(
            out,
            "Extent: ({:.1}, {:.1}, {:.1}) .. ({:.1}, {:.1}, {:.1})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
        let _ = writeln!(out, "Camera: eye=({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z);

        let mut colors: BTreeMap<Rgba, usize> = BTreeMap::new();
        for instance in grid.instances() {
            *colors.entry(instance.color).or_default() += 1;
        }
        let _ = writeln!(out, "Colors: {}", colors.len());
        for (c, count) in colors.iter().take(16) {
            let _ = writeln!(out, "  rgb({:3}, {:3}, {:3}) x{count}", c.r, c.g, c.b);
        }
        if colors.len() > 16 {
            let _ = writeln!(out, "  ... {} more", colors.len() - 16);
        }

        if self.list_instances {
            for (i, instance) in grid.instances().iter().enumerate() {
                let p = instance.position;
                let _ = writeln!(
                    out,
                    "  [{},{}] pos=({:.2}, {:.2}, {:.2}) height={:.2}",
                    i / grid.columns(),
                    i % grid.columns(),
                    p.x,
                    p.y,
                    p.z,
                    instance.height()
                );
            }
        }

        tracing::trace!(bytes = out.len(), "debug frame rendered");
        out
    }
}
