//! Height grid: a flat, row-major lattice of colored boxes.
//!
//! A grid is built once from a [`GridConfig`] and never changes afterwards.
//! Changing the data means building a new grid.
//!
//! # Layout
//! Instance `(row, col)` lives at index `row * columns + col` with its minimum
//! corner at `(col_offset + col * spacing, 0, row_offset + row * spacing)`,
//! where `offset = spacing * count / -2`.

mod band;
mod config;
mod grid;
mod heightmap;

pub use band::HeightBand;
pub use config::{Coloring, GridConfig, GridSource, Heights};
pub use grid::{GridError, HeightGrid};
pub use heightmap::{HeightMap, HeightMapError};

pub fn crate_info() -> &'static str {
    "mapviz-grid v0.1.0"
}
