use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for mapviz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Run fmt, clippy, tests and doc in order
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy on all crates, warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Run the grid build benchmarks in release mode
    Bench,
    /// Write a sample radial height map to sample_map.csv
    Sample,
}

impl Commands {
    fn label(self) -> &'static str {
        match self {
            Commands::Check => "check",
            Commands::Fmt => "cargo fmt --check",
            Commands::Clippy => "cargo clippy",
            Commands::Test => "cargo test",
            Commands::Doc => "cargo doc",
            Commands::Bench => "cargo bench",
            Commands::Sample => "mapviz-cli generate",
        }
    }

    fn cargo_args(self) -> &'static [&'static str] {
        match self {
            Commands::Check => &[],
            Commands::Fmt => &["fmt", "--all", "--", "--check"],
            Commands::Clippy => &[
                "clippy",
                "--workspace",
                "--all-targets",
                "--",
                "-D",
                "warnings",
            ],
            Commands::Test => &["test", "--workspace"],
            Commands::Doc => &["doc", "--workspace", "--no-deps"],
            Commands::Bench => &["bench", "-p", "mapviz-grid"],
            Commands::Sample => &[
                "run",
                "-p",
                "mapviz-cli",
                "--",
                "generate",
                "--rows",
                "100",
                "--columns",
                "100",
                "--out",
                "sample_map.csv",
            ],
        }
    }
}

fn run(step: Commands) -> Result<()> {
    println!("==> Running {}", step.label());
    let status = Command::new("cargo").args(step.cargo_args()).status()?;
    if !status.success() {
        anyhow::bail!("{} failed", step.label());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            for step in [Commands::Fmt, Commands::Clippy, Commands::Test, Commands::Doc] {
                run(step)?;
            }
        }
        step => run(step)?,
    }

    Ok(())
}
