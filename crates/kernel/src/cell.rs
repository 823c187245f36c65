use crate::error::MazeError;
use mazeworks_common::Cardinal;

bitflags::bitflags! {
    /// Packed per-position state.
    ///
    /// Three groups share one word:
    /// - topology: `EMPTY_PATH` and the four `PATH_*` bits
    /// - presentation hints: `RED`, `GREEN`, `BLUE` (no topological meaning)
    /// - traversal bookkeeping: `VISITED`, `INVALID`, `PROCESSED`, `MODIFIED`, `FINISHED`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Cell: u16 {
        const EMPTY_PATH = 1 << 0;
        const PATH_NORTH = 1 << 1;
        const PATH_EAST  = 1 << 2;
        const PATH_SOUTH = 1 << 3;
        const PATH_WEST  = 1 << 4;
        const RED        = 1 << 5;
        const GREEN      = 1 << 6;
        const BLUE       = 1 << 7;
        const VISITED    = 1 << 8;
        const INVALID    = 1 << 9;
        const PROCESSED  = 1 << 10;
        const MODIFIED   = 1 << 11;
        const FINISHED   = 1 << 12;
    }
}

impl Cell {
    /// Any of the four carved-path bits.
    pub const PATHS: Cell = Cell::PATH_NORTH
        .union(Cell::PATH_EAST)
        .union(Cell::PATH_SOUTH)
        .union(Cell::PATH_WEST);

    pub const COLORS: Cell = Cell::RED.union(Cell::GREEN).union(Cell::BLUE);

    /// Flags applied to every cell once a generator finishes.
    pub const TERMINAL: Cell = Cell::COLORS.union(Cell::FINISHED);

    /// The `PATH_*` bit for `dir`.
    pub const fn path(dir: Cardinal) -> Cell {
        match dir {
            Cardinal::North => Cell::PATH_NORTH,
            Cardinal::East => Cell::PATH_EAST,
            Cardinal::South => Cell::PATH_SOUTH,
            Cardinal::West => Cell::PATH_WEST,
        }
    }

    pub fn is_set(self, flag: Flag) -> bool {
        self.contains(flag.cell())
    }

    pub fn is_unset(self, flag: Flag) -> bool {
        !self.is_set(flag)
    }

    /// True iff every listed flag is clear. An empty list is vacuously true.
    pub fn is_all_unset(self, flags: &[Flag]) -> bool {
        flags.iter().all(|&flag| self.is_unset(flag))
    }

    /// True if a passage leads out of this cell towards `dir`.
    pub fn has_path(self, dir: Cardinal) -> bool {
        self.contains(Cell::path(dir))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY_PATH
    }
}

/// Named index of a single [`Cell`] bit, in bit order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Flag {
    EmptyPath,
    PathNorth,
    PathEast,
    PathSouth,
    PathWest,
    Red,
    Green,
    Blue,
    Visited,
    Invalid,
    Processed,
    Modified,
    Finished,
}

impl Flag {
    pub const COUNT: usize = 13;

    pub const ALL: [Flag; Flag::COUNT] = [
        Flag::EmptyPath,
        Flag::PathNorth,
        Flag::PathEast,
        Flag::PathSouth,
        Flag::PathWest,
        Flag::Red,
        Flag::Green,
        Flag::Blue,
        Flag::Visited,
        Flag::Invalid,
        Flag::Processed,
        Flag::Modified,
        Flag::Finished,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Result<Flag, MazeError> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(MazeError::InvalidFlagIndex {
                index,
                count: Self::COUNT,
            })
    }

    /// Bit value of this flag.
    pub const fn cell(self) -> Cell {
        Cell::from_bits_retain(1u16 << (self as u16))
    }
}

impl From<Flag> for Cell {
    fn from(flag: Flag) -> Self {
        flag.cell()
    }
}

/// Bit value of `flag`.
pub const fn cellof(flag: Flag) -> Cell {
    flag.cell()
}
