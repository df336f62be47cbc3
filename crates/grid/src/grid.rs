use crate::band::HeightBand;
use crate::config::{Coloring, GridConfig, GridSource, Heights};
use crate::heightmap::{HeightMap, HeightMapError, radial_falloff};
use glam::Vec3;
use mapviz_common::{Instance, Rgba};

/// Errors from building a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    #[error(transparent)]
    HeightMap(#[from] HeightMapError),
    #[error("grid must have at least one row and one column (got {rows}x{columns})")]
    Empty { rows: usize, columns: usize },
    #[error("cell spacing must be positive and finite (got {0})")]
    InvalidSpacing(f32),
}

/// Row-major lattice of box instances, fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
    rows: usize,
    columns: usize,
    spacing: f32,
    footprint: f32,
    instances: Vec<Instance>,
}

impl HeightGrid {
    /// Build a grid from its configured source. Height-map files are read here.
    pub fn build(config: &GridConfig) -> Result<Self, GridError> {
        let grid = match &config.source {
            GridSource::Procedural {
                rows,
                columns,
                coloring,
                heights,
            } => Self::procedural(
                *rows,
                *columns,
                config.spacing,
                config.footprint(),
                *coloring,
                *heights,
            )?,
            GridSource::HeightMap { path } => {
                let map = HeightMap::load(path)?;
                Self::from_height_map(&map, config.spacing, config.footprint())?
            }
        };
        tracing::info!(
            rows = grid.rows,
            columns = grid.columns,
            instances = grid.len(),
            "grid built"
        );
        Ok(grid)
    }

    pub fn procedural(
        rows: usize,
        columns: usize,
        spacing: f32,
        footprint: f32,
        coloring: Coloring,
        heights: Heights,
    ) -> Result<Self, GridError> {
        let lattice = Lattice::new(rows, columns, spacing)?;
        let mut random = match coloring {
            Coloring::Random { seed } => Some(SplitMix64::new(seed)),
            Coloring::Radial => None,
        };

        let mut instances = Vec::with_capacity(rows * columns);
        for r in 0..rows {
            for c in 0..columns {
                let t = radial_falloff(r, c, rows, columns) as f32;
                let color = match random.as_mut() {
                    Some(rng) => rng.next_color(),
                    None => Rgba::rgb((t * 150.0 + 100.0) as u8, 0, 0),
                };
                let height = match heights {
                    Heights::Uniform { height } => height,
                    Heights::Radial { max } => t * max,
                };
                instances.push(Instance {
                    position: lattice.position(r, c),
                    scale: Vec3::new(footprint, height, footprint),
                    color,
                });
            }
        }

        Ok(Self::from_parts(lattice, footprint, instances))
    }

    /// Boxes as tall as each height, colored by band.
    pub fn from_height_map(map: &HeightMap, spacing: f32, footprint: f32) -> Result<Self, GridError> {
        let lattice = Lattice::new(map.rows(), map.columns(), spacing)?;
        let instances = map
            .heights()
            .iter()
            .enumerate()
            .map(|(i, &height)| {
                let (r, c) = (i / map.columns(), i % map.columns());
                Instance {
                    position: lattice.position(r, c),
                    scale: Vec3::new(footprint, height as f32, footprint),
                    color: HeightBand::classify(height).color(),
                }
            })
            .collect();
        Ok(Self::from_parts(lattice, footprint, instances))
    }

    fn from_parts(lattice: Lattice, footprint: f32, instances: Vec<Instance>) -> Self {
        Self {
            rows: lattice.rows,
            columns: lattice.columns,
            spacing: lattice.spacing,
            footprint,
            instances,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    pub fn footprint(&self) -> f32 {
        self.footprint
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn instance_at(&self, row: usize, col: usize) -> Option<&Instance> {
        if row < self.rows && col < self.columns {
            self.instances.get(row * self.columns + col)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Axis-aligned bounds `(min, max)` covering every box.
    pub fn extent(&self) -> (Vec3, Vec3) {
        self.instances.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), i| {
                let far = i.position + i.scale;
                (min.min(i.position).min(far), max.max(i.position).max(far))
            },
        )
    }

    /// Movement speed that crosses the grid in a comfortable number of seconds.
    /// Both divisions truncate, so odd sizes round down.
    pub fn suggested_movement_speed(&self) -> f32 {
        let half = ((self.rows + self.columns) / 2) as f32;
        (half * self.footprint / 15.0).floor()
    }
}

/// Cell positions centered on the origin.
#[derive(Debug, Clone, Copy)]
struct Lattice {
    rows: usize,
    columns: usize,
    spacing: f32,
    row_offset: f32,
    col_offset: f32,
}

impl Lattice {
    fn new(rows: usize, columns: usize, spacing: f32) -> Result<Self, GridError> {
        if rows == 0 || columns == 0 {
            return Err(GridError::Empty { rows, columns });
        }
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(GridError::InvalidSpacing(spacing));
        }
        Ok(Self {
            rows,
            columns,
            spacing,
            row_offset: spacing * rows as f32 / -2.0,
            col_offset: spacing * columns as f32 / -2.0,
        })
    }

    fn position(&self, row: usize, col: usize) -> Vec3 {
        Vec3::new(
            self.col_offset + col as f32 * self.spacing,
            0.0,
            self.row_offset + row as f32 * self.spacing,
        )
    }
}

/// Splitmix64, for reproducible per-box colors without a global RNG.
struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Channels in `0..255`.
    fn next_color(&mut self) -> Rgba {
        let bits = self.next_u64();
        let channel = |shift: u32| ((bits >> shift) & 0xff) as u8 % 255;
        Rgba::rgb(channel(0), channel(8), channel(16))
    }
}
