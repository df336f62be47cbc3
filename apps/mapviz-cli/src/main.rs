use anyhow::Context as _;
use clap::{Parser, Subcommand};
use mapviz_camera::{FreeCamera, Projection};
use mapviz_grid::{HeightBand, HeightGrid, HeightMap};
use mapviz_render::{DebugTextRenderer, FrameView, Renderer};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mapviz-cli", about = "CLI tool for height maps")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Summarize a height-map CSV as the viewer would build it
    Inspect {
        /// Height-map CSV
        path: PathBuf,
        /// Distance between neighbouring boxes
        #[arg(short, long, default_value = "30")]
        spacing: f32,
        /// List every instance, not just the summary
        #[arg(long)]
        verbose_instances: bool,
    },
    /// Print the elevation bands and their colors
    Bands,
    /// Write a radial hill height map
    Generate {
        #[arg(short, long, default_value = "50")]
        rows: usize,
        #[arg(short, long, default_value = "50")]
        columns: usize,
        /// Height of the center cell
        #[arg(short, long, default_value = "300")]
        max_height: u32,
        /// Output CSV
        #[arg(short, long)]
        out: PathBuf,
    },
}

fn inspect(path: &Path, spacing: f32, verbose_instances: bool) -> anyhow::Result<String> {
    let map = HeightMap::load(path)?;
    let grid = HeightGrid::from_height_map(&map, spacing, spacing)
        .with_context(|| format!("cannot build grid from {}", path.display()))?;

    let mut out = String::new();
    writeln!(
        out,
        "{}: {}x{}, heights {}..{}",
        path.display(),
        map.rows(),
        map.columns(),
        map.min_height(),
        map.max_height()
    )?;
    for (band, count) in map.band_counts() {
        writeln!(out, "  {:<8} {count}", band.name())?;
    }

    let frame = FrameView::new(
        FreeCamera::default().view_matrix(),
        Projection::default().matrix(),
    );
    let renderer = DebugTextRenderer {
        list_instances: verbose_instances,
    };
    out.push_str(&renderer.render(&grid, &frame));
    Ok(out)
}

fn bands() -> String {
    let mut out = String::new();
    let mut lower = 0;
    for band in HeightBand::ALL {
        let c = band.color();
        let range = match band.upper_bound() {
            Some(upper) => format!("{lower}..={upper}"),
            None => format!("{lower}.."),
        };
        let _ = writeln!(
            out,
            "{:<8} {:<10} rgb({}, {}, {})",
            band.name(),
            range,
            c.r,
            c.g,
            c.b
        );
        lower = band.upper_bound().map_or(lower, |u| u + 1);
    }
    out
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("mapviz-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", mapviz_input::crate_info());
            println!("camera: {}", mapviz_camera::crate_info());
            println!("grid: {}", mapviz_grid::crate_info());
            println!("render: {}", mapviz_render::crate_info());
        }
        Commands::Inspect {
            path,
            spacing,
            verbose_instances,
        } => {
            print!("{}", inspect(&path, spacing, verbose_instances)?);
        }
        Commands::Bands => {
            print!("{}", bands());
        }
        Commands::Generate {
            rows,
            columns,
            max_height,
            out,
        } => {
            let map = HeightMap::radial(rows, columns, max_height)
                .with_context(|| format!("cannot generate a {rows}x{columns} height map"))?;
            map.save(&out)?;
            tracing::info!(path = %out.display(), rows, columns, max_height, "height map written");
            println!("wrote {rows}x{columns} height map to {}", out.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_every_height() {
        let text = bands();
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("0..=25"));
        assert!(text.contains("26..=75"));
        assert!(text.contains("241.."));
        assert!(text.contains("rgb(19, 19, 220)"));
    }

    #[test]
    fn generated_map_inspects_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hill.csv");
        HeightMap::radial(5, 5, 300).unwrap().save(&path).unwrap();

        let report = inspect(&path, 30.0, false).unwrap();
        assert!(report.contains("5x5, heights 0..300"));
        assert!(report.contains("Grid 5x5"));
        assert!(report.contains("Instances: 25"));
        assert!(!report.contains("pos="));

        let verbose = inspect(&path, 30.0, true).unwrap();
        assert_eq!(verbose.matches("pos=").count(), 25);
    }

    #[test]
    fn inspect_reports_bad_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "1,2,3\n4,5\n").unwrap();
        assert!(inspect(&path, 30.0, false).is_err());
        assert!(inspect(&dir.path().join("missing.csv"), 30.0, false).is_err());
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::parse_from(["mapviz-cli", "generate", "--out", "hill.csv", "-r", "3"]);
        match cli.command {
            Commands::Generate {
                rows,
                columns,
                max_height,
                out,
            } => {
                assert_eq!((rows, columns, max_height), (3, 50, 300));
                assert_eq!(out, PathBuf::from("hill.csv"));
            }
            _ => panic!("expected generate"),
        }
    }
}
