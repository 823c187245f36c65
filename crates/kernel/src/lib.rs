//! Maze kernel: the authoritative grid, cell flags, path carving and
//! adjacency resolution.
//!
//! # Invariants
//! - Topology is symmetric: `PATH_EAST` on a cell iff `PATH_WEST` on its east
//!   neighbour, and likewise for every direction. Only `make_path` sets them.
//! - Out-of-grid neighbours are reported as `Cell::INVALID`, never omitted.
//! - Invalid requests return `MazeError` without mutating the grid.

pub mod adjacent;
pub mod cell;
pub mod error;
pub mod maze;

pub use adjacent::{AdjacentCells, AdjacentSlot, is_unvisited, is_visited};
pub use cell::{Cell, Flag, cellof};
pub use error::MazeError;
pub use maze::Maze2D;
pub use mazeworks_common::{Cardinal, Index2D};
