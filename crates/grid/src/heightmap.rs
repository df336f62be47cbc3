use crate::band::HeightBand;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Errors from reading a height map.
#[derive(Debug, thiserror::Error)]
pub enum HeightMapError {
    #[error("failed to read height map {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("height map contains no rows")]
    Empty,
    #[error("line {line}, column {column}: invalid height {token:?}")]
    InvalidHeight {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("line {line}: expected {expected} heights, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Rectangular grid of integer heights read from comma-separated text.
///
/// One line per row, one non-negative integer per column. Every row must have
/// the same number of columns as the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    rows: usize,
    columns: usize,
    heights: Vec<u32>,
}

impl HeightMap {
    /// Build from rows of heights, which must all have the first row's length.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Result<Self, HeightMapError> {
        let columns = rows.first().map(Vec::len).ok_or(HeightMapError::Empty)?;
        if columns == 0 {
            return Err(HeightMapError::Empty);
        }
        let mut heights = Vec::with_capacity(rows.len() * columns);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(HeightMapError::RaggedRow {
                    line: i + 1,
                    expected: columns,
                    found: row.len(),
                });
            }
            heights.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            columns,
            heights,
        })
    }

    /// Parse CSV text. Blank lines are skipped; tokens may carry whitespace.
    pub fn parse(text: &str) -> Result<Self, HeightMapError> {
        let mut rows: Vec<Vec<u32>> = Vec::new();
        let mut columns = None;

        for (i, line) in text.lines().enumerate() {
            let line_no = i + 1;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split(',')
                .enumerate()
                .map(|(c, token)| {
                    let token = token.trim();
                    token
                        .parse::<u32>()
                        .map_err(|_| HeightMapError::InvalidHeight {
                            line: line_no,
                            column: c + 1,
                            token: token.to_string(),
                        })
                })
                .collect::<Result<Vec<u32>, _>>()?;

            let expected = *columns.get_or_insert(row.len());
            if row.len() != expected {
                return Err(HeightMapError::RaggedRow {
                    line: line_no,
                    expected,
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        Self::from_rows(rows)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, HeightMapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HeightMapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::parse(&text)?;
        tracing::debug!(
            path = %path.display(),
            rows = map.rows,
            columns = map.columns,
            "height map loaded"
        );
        Ok(map)
    }

    /// Radial hill: highest at the center cell, falling to zero at the corner.
    pub fn radial(rows: usize, columns: usize, max_height: u32) -> Result<Self, HeightMapError> {
        if rows == 0 || columns == 0 {
            return Err(HeightMapError::Empty);
        }
        let mut heights = Vec::with_capacity(rows * columns);
        for r in 0..rows {
            for c in 0..columns {
                let t = radial_falloff(r, c, rows, columns);
                heights.push((t * max_height as f64).round() as u32);
            }
        }
        Ok(Self {
            rows,
            columns,
            heights,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Height at `(row, col)`, `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.rows && col < self.columns {
            Some(self.heights[row * self.columns + col])
        } else {
            None
        }
    }

    /// All heights, row-major.
    pub fn heights(&self) -> &[u32] {
        &self.heights
    }

    pub fn max_height(&self) -> u32 {
        self.heights.iter().copied().max().unwrap_or(0)
    }

    pub fn min_height(&self) -> u32 {
        self.heights.iter().copied().min().unwrap_or(0)
    }

    /// Number of cells per band, in band order.
    pub fn band_counts(&self) -> [(HeightBand, usize); 5] {
        let mut counts = HeightBand::ALL.map(|b| (b, 0));
        for h in &self.heights {
            counts[HeightBand::classify(*h).index()].1 += 1;
        }
        counts
    }

    pub fn write_csv<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        for row in self.heights.chunks(self.columns.max(1)) {
            let line: Vec<String> = row.iter().map(u32::to_string).collect();
            writeln!(out, "{}", line.join(","))?;
        }
        Ok(())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), HeightMapError> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| HeightMapError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::create(path).map_err(io_err)?;
        let mut out = std::io::BufWriter::new(file);
        self.write_csv(&mut out).map_err(io_err)?;
        out.flush().map_err(io_err)
    }
}

/// `1 - distance / max_distance` from the center cell `(columns / 2, rows / 2)`.
///
/// A single-cell grid has no distance to speak of and returns `1.0`.
pub(crate) fn radial_falloff(row: usize, col: usize, rows: usize, columns: usize) -> f64 {
    let center_x = (columns / 2) as f64;
    let center_y = (rows / 2) as f64;
    let max_distance = (center_x * center_x + center_y * center_y).sqrt();
    if max_distance == 0.0 {
        return 1.0;
    }
    let dx = col as f64 - center_x;
    let dy = row as f64 - center_y;
    1.0 - (dx * dx + dy * dy).sqrt() / max_distance
}
