#![warn(non_snake_case)]
//! # mazeforge command line
//!
//! Generates perfect mazes at a requested difficulty, prints or solves them,
//! exports SVG/PNG files, and renders whole batches of JPEGs grouped by
//! difficulty band. With the `gui` feature, `view` opens an interactive window.
//!
//! Logging goes through `env_logger`; set `RUST_LOG=info` (or `debug` to see
//! every generation attempt).

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info};

use mazeforge::config::validate_dimension;
use mazeforge::export::BatchExporter;
use mazeforge::maze::Backtrack;
use mazeforge::render::{self, ImageFormat};
use mazeforge::{MazeConfig, MazeError, MazeSession};

/// Perfect-maze generator with difficulty control
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Random seed for reproducible mazes
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Grid dimension (cells per side)
    #[arg(long, short = 'n', global = true, allow_negative_numbers = true)]
    dimension: Option<i64>,

    /// Minimum bend ratio of the accepted maze
    #[arg(long, short = 'd', global = true)]
    difficulty: Option<f64>,

    /// Give up after this many generation attempts
    #[arg(long, global = true)]
    max_attempts: Option<u64>,

    /// Dead-end strategy: rescan or frontier
    #[arg(long, global = true)]
    backtrack: Option<Backtrack>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a maze and print it
    Generate {
        /// Write the maze as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
        /// Write the maze as PNG
        #[arg(long)]
        png: Option<PathBuf>,
        /// PNG side length in pixels
        #[arg(long, default_value_t = 500)]
        size: u32,
        /// Do not print the maze to stdout
        #[arg(long)]
        quiet: bool,
    },
    /// Generate a maze and print it with its solution
    Solve {
        /// Write the solved maze as SVG
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// Export banded batches of JPEG mazes
    Batch {
        /// Output directory, one sub-directory per band
        #[arg(long, default_value = "mazes")]
        out: PathBuf,
        /// Override the batch maze dimension
        #[arg(long)]
        batch_dimension: Option<i64>,
    },
    /// Open the interactive viewer
    View,
}

fn build_config(cli: &Cli) -> Result<MazeConfig, MazeError> {
    let mut config = match &cli.config {
        Some(path) => MazeConfig::load(path)?,
        None => MazeConfig::default(),
    };
    if let Some(n) = cli.dimension {
        config.dimension = validate_dimension(n)?;
    }
    if let Some(d) = cli.difficulty {
        config.difficulty = d;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.max_attempts.is_some() {
        config.max_attempts = cli.max_attempts;
    }
    if let Some(b) = cli.backtrack {
        config.backtrack = b;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();

    let cli = Cli::parse();
    let mut config = build_config(&cli)?;
    info!("mazeforge starting ({:?})", cli.command);

    match cli.command {
        Command::Generate { svg, png, size, quiet } => {
            let session = MazeSession::new(config)?;
            if !quiet {
                print!("{}", session.ascii());
            }
            println!(
                "iterations: {}, bend ratio: {:.4}",
                session.attempts(),
                session.bend_ratio()
            );
            if let Some(path) = svg {
                fs::write(&path, session.svg())?;
                info!("SVG written to {}", path.display());
            }
            if let Some(path) = png {
                let bytes = render::encode(&session.raster(size)?, ImageFormat::Png)?;
                fs::write(&path, bytes)?;
                info!("PNG written to {}", path.display());
            }
        }
        Command::Solve { svg } => {
            let mut session = MazeSession::new(config)?;
            match session.toggle_solution() {
                Ok(overlay) => {
                    print!("{}", session.ascii());
                    let bends = overlay.map(|o| o.bends).unwrap_or_default();
                    println!("iterations: {}, bends: {}", session.attempts(), bends);
                    if let Some(path) = svg {
                        let solution = session.solve()?;
                        let doc = render::render_svg_with_solution(
                            session.grid(),
                            &solution,
                            session.config().cell_size,
                        );
                        fs::write(&path, doc)?;
                        info!("solved SVG written to {}", path.display());
                    }
                }
                // Reported, not fatal.
                Err(err @ MazeError::NoSolutionFound { .. }) => {
                    print!("{}", session.ascii());
                    eprintln!("No solution found! ({err})");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Command::Batch { out, batch_dimension } => {
            if let Some(n) = batch_dimension {
                config.batch.dimension = validate_dimension(n)?;
                config.validate()?;
            }
            let manifest = BatchExporter::new(&config).run(&out)?;
            let failed: Vec<_> = manifest.failures().collect();
            for unit in &failed {
                error!(
                    "{}/maze-{}: {}",
                    unit.band,
                    unit.number,
                    unit.error.as_deref().unwrap_or("unknown error")
                );
            }
            println!(
                "{} mazes written to {} ({} failed)",
                manifest.units.len() - failed.len(),
                out.display(),
                failed.len()
            );
        }
        Command::View => run_view(config)?,
    }

    info!("mazeforge exiting.");
    Ok(())
}

#[cfg(feature = "gui")]
fn run_view(config: MazeConfig) -> Result<(), Box<dyn Error>> {
    mazeforge::ui::run_viewer(config)
}

#[cfg(not(feature = "gui"))]
fn run_view(_config: MazeConfig) -> Result<(), Box<dyn Error>> {
    Err("this build has no viewer; rebuild with `--features gui`".into())
}
