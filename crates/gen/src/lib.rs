//! Steppable maze generators.
//!
//! A generator borrows a [`Maze2D`](mazeworks_kernel::Maze2D) mutably for each
//! `step` and performs one unit of work; a host loop (or
//! [`GenerationDriver`]) decides how many steps to run per frame.
//!
//! # Invariants
//! - `init` runs its setup at most once per generator instance.
//! - `is_complete` is monotonic, and `step` after completion is a no-op.
//! - Each generator owns its [`MazeRng`]; the same seed, algorithm and
//!   dimensions produce bit-identical grids.
//! - Backtracker and both hunt-and-kill orderings finish with a perfect maze.

pub mod backtrack;
pub mod baseline;
pub mod config;
pub mod driver;
pub mod generator;
pub mod hunt_and_kill;
pub mod rng;

pub use backtrack::RecursiveBacktrack;
pub use baseline::{PathSingleDirection, RandomFill};
pub use config::{Algorithm, ConfigError, GeneratorConfig};
pub use driver::{DriverConfig, FrameStats, FrameTimer, GenerationDriver};
pub use generator::{Generator, GeneratorState, MazeGenerator};
pub use hunt_and_kill::{HuntAndKill, HuntOrdering};
pub use rng::{DEFAULT_SEED, MazeRng, SeedMode};
