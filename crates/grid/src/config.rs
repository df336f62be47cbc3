use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How procedural boxes are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Coloring {
    /// Independent pseudo-random RGB per box, reproducible from `seed`.
    Random { seed: u64 },
    /// Red that fades from the center cell outward.
    Radial,
}

/// How procedural boxes get their height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Heights {
    Uniform { height: f32 },
    /// `max` at the center cell, falling to zero at the far corner.
    Radial { max: f32 },
}

/// Where the grid's data comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridSource {
    Procedural {
        rows: usize,
        columns: usize,
        coloring: Coloring,
        heights: Heights,
    },
    /// CSV of integer heights, colored by [`crate::HeightBand`].
    HeightMap { path: PathBuf },
}

impl Default for GridSource {
    fn default() -> Self {
        GridSource::Procedural {
            rows: 200,
            columns: 200,
            coloring: Coloring::Random { seed: 0 },
            heights: Heights::Uniform { height: 10.0 },
        }
    }
}

/// Everything needed to build a [`crate::HeightGrid`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Distance between neighbouring cell origins.
    pub spacing: f32,
    /// Box width and depth; defaults to `spacing` so boxes touch.
    pub footprint: Option<f32>,
    pub source: GridSource,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            spacing: 30.0,
            footprint: None,
            source: GridSource::default(),
        }
    }
}

impl GridConfig {
    pub fn footprint(&self) -> f32 {
        self.footprint.unwrap_or(self.spacing)
    }

    pub fn height_map(path: impl Into<PathBuf>) -> Self {
        Self {
            source: GridSource::HeightMap { path: path.into() },
            ..Self::default()
        }
    }
}
