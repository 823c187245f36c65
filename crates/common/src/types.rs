use serde::{Deserialize, Serialize};
use std::ops::{Add, Neg, Sub};

/// A `(row, col)` position on a maze grid.
///
/// Signed so that neighbour offsets can step off the grid and be rejected by
/// [`Index2D::in_bounds`] instead of wrapping. Ordering is lexical: row first,
/// then column.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Index2D {
    pub row: i32,
    pub col: i32,
}

impl Index2D {
    pub const ZERO: Self = Self { row: 0, col: 0 };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// True if `0 <= row < bounds.row` and `0 <= col < bounds.col`.
    pub fn in_bounds(self, bounds: Index2D) -> bool {
        self.row >= 0 && self.col >= 0 && self.row < bounds.row && self.col < bounds.col
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Index2D) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    /// True if `other` is exactly one cardinal step away.
    pub fn is_adjacent(self, other: Index2D) -> bool {
        self.manhattan(other) == 1
    }

    /// The cardinal direction leading from `self` to an adjacent `other`.
    pub fn direction_to(self, other: Index2D) -> Option<Cardinal> {
        let delta = other - self;
        Cardinal::ALL.into_iter().find(|dir| dir.offset() == delta)
    }

    /// Next position in serpentine (boustrophedon) order: even rows run
    /// left to right, odd rows right to left, dropping one row at each end.
    ///
    /// Returns `None` once the scan has covered the last cell.
    pub fn next_serpentine(self, bounds: Index2D) -> Option<Index2D> {
        let left_to_right = self.row.rem_euclid(2) == 0;
        let next = if left_to_right && self.col + 1 < bounds.col {
            Index2D::new(self.row, self.col + 1)
        } else if !left_to_right && self.col > 0 {
            Index2D::new(self.row, self.col - 1)
        } else {
            Index2D::new(self.row + 1, self.col)
        };
        next.in_bounds(bounds).then_some(next)
    }

    pub fn has_next_serpentine(self, bounds: Index2D) -> bool {
        self.next_serpentine(bounds).is_some()
    }
}

impl Add for Index2D {
    type Output = Index2D;

    fn add(self, rhs: Index2D) -> Index2D {
        Index2D::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Index2D {
    type Output = Index2D;

    fn sub(self, rhs: Index2D) -> Index2D {
        Index2D::new(self.row - rhs.row, self.col - rhs.col)
    }
}

impl Neg for Index2D {
    type Output = Index2D;

    fn neg(self) -> Index2D {
        Index2D::new(-self.row, -self.col)
    }
}

impl std::fmt::Display for Index2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// One of the four grid directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinal {
    North,
    East,
    South,
    West,
}

impl Cardinal {
    /// All directions in canonical order.
    pub const ALL: [Cardinal; 4] = [
        Cardinal::North,
        Cardinal::East,
        Cardinal::South,
        Cardinal::West,
    ];

    /// Unit step for this direction. Rows grow southward.
    pub const fn offset(self) -> Index2D {
        match self {
            Cardinal::North => Index2D::new(-1, 0),
            Cardinal::East => Index2D::new(0, 1),
            Cardinal::South => Index2D::new(1, 0),
            Cardinal::West => Index2D::new(0, -1),
        }
    }

    pub const fn reverse(self) -> Cardinal {
        match self {
            Cardinal::North => Cardinal::South,
            Cardinal::East => Cardinal::West,
            Cardinal::South => Cardinal::North,
            Cardinal::West => Cardinal::East,
        }
    }
}
