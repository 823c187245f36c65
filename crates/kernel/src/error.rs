use mazeworks_common::Index2D;

/// Errors from grid access, carving and neighbour selection.
///
/// Every variant is a caller defect: the kernel never retries or degrades,
/// it reports the bad request and leaves the grid untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MazeError {
    #[error("position {pos} out of bounds for {bounds} grid")]
    IndexOutOfBounds { pos: Index2D, bounds: Index2D },
    #[error("invalid grid dimension: {rows}x{cols} (both must be > 0)")]
    InvalidDimension { rows: i32, cols: i32 },
    #[error("{from} and {to} are not cardinal neighbours")]
    InvalidAdjacency { from: Index2D, to: Index2D },
    #[error("flag index {index} exceeds flag count {count}")]
    InvalidFlagIndex { index: usize, count: usize },
    #[error("no neighbour of {pos} satisfies the predicate")]
    NoValidNeighbor { pos: Index2D },
}
