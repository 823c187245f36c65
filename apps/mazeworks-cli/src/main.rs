use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use mazeworks_common::Cardinal;
use mazeworks_gen::{
    Algorithm, DriverConfig, GenerationDriver, Generator, GeneratorConfig, MazeGenerator, MazeRng,
    SeedMode,
};
use mazeworks_kernel::Maze2D;
use mazeworks_tools::MazeInspector;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mazeworks-cli", about = "CLI tool for mazeworks operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and available algorithms
    Info,
    /// Generate a maze and report its topology
    Generate {
        /// JSON config file; flags below override its values
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        rows: Option<i32>,
        #[arg(long)]
        cols: Option<i32>,
        /// Algorithm name, e.g. recursive-backtrack
        #[arg(short, long)]
        algorithm: Option<Algorithm>,
        /// Corridor direction for single-direction
        #[arg(short, long, value_parser = parse_direction)]
        direction: Option<Cardinal>,
        /// Fixed RNG seed; entropy is used when neither flag nor config sets one
        #[arg(short, long)]
        seed: Option<u64>,
        #[arg(long)]
        steps_per_frame: Option<usize>,
        /// Stop after this many frames
        #[arg(long)]
        max_frames: Option<usize>,
    },
    /// Run a generator twice from one seed and compare the grids
    Determinism {
        #[arg(short, long, default_value = "recursive-backtrack")]
        algorithm: Algorithm,
        #[arg(short, long, default_value = "32")]
        rows: i32,
        #[arg(long, default_value = "32")]
        cols: i32,
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },
}

fn parse_direction(s: &str) -> Result<Cardinal, String> {
    match s.to_ascii_lowercase().as_str() {
        "north" | "n" => Ok(Cardinal::North),
        "east" | "e" => Ok(Cardinal::East),
        "south" | "s" => Ok(Cardinal::South),
        "west" | "w" => Ok(Cardinal::West),
        other => Err(format!("unknown direction '{other}'")),
    }
}

fn run_once(algorithm: Algorithm, rows: i32, cols: i32, seed: u64) -> anyhow::Result<Maze2D> {
    let mut maze = Maze2D::new(rows, cols)?;
    let mut generator = Generator::new(algorithm, Cardinal::East, MazeRng::from_seed(seed));
    while !generator.is_complete() {
        generator.step(&mut maze)?;
    }
    Ok(maze)
}

/// Outcome of one `generate` run.
struct GenerationReport {
    maze: Maze2D,
    frames: usize,
    total_steps: usize,
    complete: bool,
    avg_frame: std::time::Duration,
}

fn run_generation(
    cfg: &GeneratorConfig,
    max_frames: Option<usize>,
) -> anyhow::Result<GenerationReport> {
    let rng = MazeRng::from_mode(cfg.seed);
    println!(
        "Generating {}x{} with {} (seed={})",
        cfg.rows,
        cfg.cols,
        cfg.algorithm,
        rng.seed()
    );

    let mut maze = cfg.build_maze()?;
    let mut generator = Generator::new(cfg.algorithm, cfg.direction, rng);
    let mut driver = GenerationDriver::new(DriverConfig {
        steps_per_frame: cfg.steps_per_frame,
        max_frames,
    });
    let frames = driver.run_to_completion(&mut generator, &mut maze)?;
    if !generator.is_complete() {
        tracing::warn!(
            frames,
            steps = driver.stats().total_steps,
            "stopped at the frame limit before generation completed"
        );
    }

    Ok(GenerationReport {
        maze,
        frames,
        total_steps: driver.stats().total_steps,
        complete: generator.is_complete(),
        avg_frame: driver.timer().average(),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("mazeworks-cli v{}", env!("CARGO_PKG_VERSION"));
            let default_seed = match SeedMode::default() {
                SeedMode::Fixed(seed) => format!("fixed ({seed})"),
                SeedMode::Entropy => "entropy".to_string(),
            };
            println!("default seed mode: {default_seed}");
            println!("algorithms:");
            for algorithm in Algorithm::ALL {
                let kind = if algorithm.is_perfect() {
                    "perfect"
                } else {
                    "baseline"
                };
                println!("  {algorithm} ({kind})");
            }
        }
        Commands::Generate {
            config,
            rows,
            cols,
            algorithm,
            direction,
            seed,
            steps_per_frame,
            max_frames,
        } => {
            let mut cfg = match &config {
                Some(path) => {
                    let loaded = GeneratorConfig::from_json_file(path)
                        .with_context(|| format!("loading config {}", path.display()))?;
                    tracing::info!(path = %path.display(), "config loaded");
                    loaded
                }
                None => GeneratorConfig::default(),
            };
            cfg.rows = rows.unwrap_or(cfg.rows);
            cfg.cols = cols.unwrap_or(cfg.cols);
            cfg.algorithm = algorithm.unwrap_or(cfg.algorithm);
            cfg.direction = direction.unwrap_or(cfg.direction);
            cfg.steps_per_frame = steps_per_frame.unwrap_or(cfg.steps_per_frame);
            if let Some(seed) = seed {
                cfg.seed = SeedMode::Fixed(seed);
            }
            cfg.validate()?;

            let report = run_generation(&cfg, max_frames)?;
            let maze = &report.maze;

            println!(
                "Frames: {}, steps: {}, complete: {}, avg frame: {:?}",
                report.frames, report.total_steps, report.complete, report.avg_frame
            );
            println!("{}", MazeInspector::summary(maze));
            println!(
                "Connected: {}, perfect: {}",
                MazeInspector::is_connected(maze),
                MazeInspector::is_perfect(maze)
            );
            if report.complete && cfg.algorithm.is_perfect() && !MazeInspector::is_perfect(maze) {
                bail!("{} finished without producing a perfect maze", cfg.algorithm);
            }
        }
        Commands::Determinism {
            algorithm,
            rows,
            cols,
            seed,
        } => {
            println!("Determinism check: {algorithm} {rows}x{cols}, seed={seed}");

            let first = run_once(algorithm, rows, cols, seed).context("first run")?;
            let second = run_once(algorithm, rows, cols, seed).context("second run")?;

            println!("Run 1: {}", MazeInspector::summary(&first));
            println!("Run 2: {}", MazeInspector::summary(&second));
            println!(
                "Match: {}",
                if first.cells() == second.cells() {
                    "OK"
                } else {
                    "MISMATCH"
                }
            );
        }
    }

    Ok(())
}
