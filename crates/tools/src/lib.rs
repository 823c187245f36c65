//! Developer tooling: read-only inspection of generated mazes.
//!
//! # Invariants
//! - Tools only ever borrow `&Maze2D`; nothing here mutates a grid.

pub mod inspector;

pub use inspector::{CellInfo, MazeInspector, MazeSummary};
