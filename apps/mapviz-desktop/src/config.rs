use glam::Vec3;
use mapviz_camera::{CameraConfig, Orbit, Projection};
use mapviz_grid::{Coloring, GridConfig, GridSource, HeightGrid, Heights};
use mapviz_input::{Scheme, Speeds};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Map Visualizer".into(),
            width: 1280,
            height: 720,
        }
    }
}

/// Speeds as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedConfig {
    /// Omitted means "derive from grid size".
    pub movement: Option<f32>,
    pub vertical: f32,
    pub angular: f32,
}

impl Default for SpeedConfig {
    fn default() -> Self {
        let speeds = Speeds::default();
        Self {
            movement: None,
            vertical: speeds.vertical,
            angular: speeds.angular,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub target: Vec3,
    pub degrees_per_second: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        let orbit = Orbit::default();
        Self {
            target: orbit.target,
            degrees_per_second: orbit.degrees_per_second,
        }
    }
}

/// Everything the viewer reads at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: Projection,
    pub speeds: SpeedConfig,
    pub orbit: OrbitConfig,
    pub grid: GridConfig,
    pub scheme: Scheme,
    pub wireframe: bool,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            projection: Projection::default(),
            speeds: SpeedConfig::default(),
            orbit: OrbitConfig::default(),
            grid: GridConfig::default(),
            scheme: Scheme::default(),
            wireframe: true,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub map: Option<PathBuf>,
    pub rows: Option<usize>,
    pub columns: Option<usize>,
    pub spacing: Option<f32>,
    pub scheme: Option<Scheme>,
    pub no_wireframe: bool,
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_yaml::from_reader(std::io::BufReader::new(file))?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Apply command-line overrides. A map path selects the height-map source;
    /// rows or columns select a procedural one.
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(spacing) = overrides.spacing {
            self.grid.spacing = spacing;
        }
        if let Some(scheme) = overrides.scheme {
            self.scheme = scheme;
        }
        if overrides.no_wireframe {
            self.wireframe = false;
        }

        if let Some(path) = &overrides.map {
            if overrides.rows.is_some() || overrides.columns.is_some() {
                tracing::warn!("--rows/--columns ignored when a height map is given");
            }
            self.grid.source = GridSource::HeightMap { path: path.clone() };
            return;
        }

        if overrides.rows.is_none() && overrides.columns.is_none() {
            return;
        }
        let (rows, columns, coloring, heights) = match &self.grid.source {
            GridSource::Procedural {
                rows,
                columns,
                coloring,
                heights,
            } => (*rows, *columns, *coloring, *heights),
            GridSource::HeightMap { .. } => {
                tracing::warn!("--rows/--columns replace the configured height map");
                (
                    0,
                    0,
                    Coloring::Random { seed: 0 },
                    Heights::Uniform { height: 10.0 },
                )
            }
        };
        let rows = overrides.rows.unwrap_or(rows.max(1));
        let columns = overrides.columns.unwrap_or(columns.max(1));
        self.grid.source = GridSource::Procedural {
            rows,
            columns,
            coloring,
            heights,
        };
    }

    /// Resolve speeds, deriving movement speed from the grid when unset.
    pub fn speeds(&self, grid: &HeightGrid) -> Speeds {
        Speeds {
            movement: self
                .speeds
                .movement
                .unwrap_or_else(|| grid.suggested_movement_speed()),
            vertical: self.speeds.vertical,
            angular: self.speeds.angular,
        }
    }

    pub fn orbit(&self) -> Orbit {
        Orbit::new(self.orbit.target, self.orbit.degrees_per_second)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapviz_camera::FlightModel;
    use std::io::Write;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config: ViewerConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert!(config.wireframe);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "
scheme: orbit
camera:
  position: [0, 30, -200]
  flight: grounded
speeds:
  movement: 120
grid:
  spacing: 10
  source: { kind: height_map, path: output.csv }
";
        let config: ViewerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.scheme, Scheme::Orbit);
        assert_eq!(config.camera.position, Vec3::new(0.0, 30.0, -200.0));
        assert_eq!(config.camera.forward, Vec3::Z);
        assert_eq!(config.camera.flight, FlightModel::Grounded);
        assert_eq!(config.speeds.movement, Some(120.0));
        assert_eq!(config.speeds.angular, Speeds::default().angular);
        assert_eq!(config.grid.spacing, 10.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn load_from_file_and_report_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "wireframe: false").unwrap();
        let config = ViewerConfig::load(file.path()).unwrap();
        assert!(!config.wireframe);

        let missing = ViewerConfig::load("/no/such/viewer.yaml").unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "wireframe: [not, a, bool]").unwrap();
        assert!(matches!(
            ViewerConfig::load(bad.path()).unwrap_err(),
            ConfigError::Yaml(_)
        ));
    }

    #[test]
    fn map_override_selects_height_map() {
        let mut config = ViewerConfig::default();
        config.apply(&Overrides {
            map: Some("terrain.csv".into()),
            spacing: Some(12.0),
            no_wireframe: true,
            ..Overrides::default()
        });
        assert_eq!(config.grid, {
            let mut g = GridConfig::height_map("terrain.csv");
            g.spacing = 12.0;
            g
        });
        assert!(!config.wireframe);
    }

    #[test]
    fn rows_override_keeps_procedural_settings() {
        let mut config = ViewerConfig::default();
        config.apply(&Overrides {
            rows: Some(3),
            ..Overrides::default()
        });
        assert_eq!(
            config.grid.source,
            GridSource::Procedural {
                rows: 3,
                columns: 200,
                coloring: Coloring::Random { seed: 0 },
                heights: Heights::Uniform { height: 10.0 },
            }
        );
    }

    #[test]
    fn rows_override_replaces_height_map() {
        let mut config = ViewerConfig::default();
        config.grid = GridConfig::height_map("terrain.csv");
        config.apply(&Overrides {
            rows: Some(4),
            columns: Some(5),
            ..Overrides::default()
        });
        assert!(matches!(
            config.grid.source,
            GridSource::Procedural {
                rows: 4,
                columns: 5,
                ..
            }
        ));
    }

    #[test]
    fn movement_speed_derives_from_grid() {
        let mut config = ViewerConfig::default();
        config.apply(&Overrides {
            rows: Some(20),
            columns: Some(40),
            ..Overrides::default()
        });
        let grid = HeightGrid::build(&config.grid).unwrap();
        assert_eq!(config.speeds(&grid).movement, 60.0);

        config.speeds.movement = Some(7.5);
        assert_eq!(config.speeds(&grid).movement, 7.5);
    }
}
