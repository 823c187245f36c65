//! Shared types for the mazeworks engine: grid positions and directions.
//!
//! # Invariants
//! - `Index2D` is a plain value; bounds are always checked against an explicit
//!   `(rows, cols)` pair, never stored on the index itself.
//! - `Cardinal::ALL` order (N, E, S, W) is the canonical direction order
//!   everywhere in the workspace.

mod types;

pub use types::{Cardinal, Index2D};
