use crate::cell::{Cell, Flag};
use crate::error::MazeError;
use crate::maze::Maze2D;
use mazeworks_common::{Cardinal, Index2D};
use rand::Rng;
use rand::seq::SliceRandom;

/// One direction out of a position, with the cell found there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacentSlot {
    pub dir: Cardinal,
    pub pos: Index2D,
    pub cell: Cell,
}

/// Snapshot of the four cardinal neighbours of a position.
///
/// Every direction has a slot. Off-grid slots carry [`Cell::INVALID`], so a
/// predicate that rejects `INVALID` treats "no neighbour" and "unsuitable
/// neighbour" the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjacentCells {
    origin: Index2D,
    slots: [AdjacentSlot; 4],
}

impl AdjacentCells {
    pub fn origin(&self) -> Index2D {
        self.origin
    }

    pub fn get(&self, dir: Cardinal) -> AdjacentSlot {
        self.slots[slot_index(dir)]
    }

    /// Slots in canonical N, E, S, W order.
    pub fn iter(&self) -> impl Iterator<Item = &AdjacentSlot> {
        self.slots.iter()
    }

    pub fn count_where(&self, pred: impl Fn(Cell) -> bool) -> usize {
        self.slots.iter().filter(|s| pred(s.cell)).count()
    }

    pub fn count_where_alt(&self, pred: impl Fn(Cardinal, Cell) -> bool) -> usize {
        self.slots.iter().filter(|s| pred(s.dir, s.cell)).count()
    }

    /// Pick a neighbour satisfying `pred`, uniformly among all that do.
    pub fn get_random_where<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pred: impl Fn(Cell) -> bool,
    ) -> Result<AdjacentSlot, MazeError> {
        self.get_random_where_alt(rng, |_, cell| pred(cell))
    }

    /// Pick a neighbour satisfying `pred`, uniformly among all that do.
    ///
    /// The four directions are shuffled before a first-match scan. Scanning in
    /// fixed order would always favour north.
    pub fn get_random_where_alt<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        pred: impl Fn(Cardinal, Cell) -> bool,
    ) -> Result<AdjacentSlot, MazeError> {
        let no_match = MazeError::NoValidNeighbor { pos: self.origin };
        if self.count_where_alt(&pred) == 0 {
            return Err(no_match);
        }
        let mut order = Cardinal::ALL;
        order.shuffle(rng);
        order
            .into_iter()
            .map(|dir| self.get(dir))
            .find(|slot| pred(slot.dir, slot.cell))
            .ok_or(no_match)
    }
}

fn slot_index(dir: Cardinal) -> usize {
    match dir {
        Cardinal::North => 0,
        Cardinal::East => 1,
        Cardinal::South => 2,
        Cardinal::West => 3,
    }
}

/// In the grid and not yet visited.
pub fn is_unvisited(cell: Cell) -> bool {
    cell.is_all_unset(&[Flag::Invalid, Flag::Visited])
}

/// In the grid and already visited.
pub fn is_visited(cell: Cell) -> bool {
    cell.is_unset(Flag::Invalid) && cell.is_set(Flag::Visited)
}

impl Maze2D {
    /// Resolve the four neighbours of `pos`.
    pub fn get_adjacent(&self, pos: Index2D) -> Result<AdjacentCells, MazeError> {
        self.get_cell(pos)?;
        let slots = Cardinal::ALL.map(|dir| {
            let target = pos + dir.offset();
            let cell = self.get_cell(target).unwrap_or(Cell::INVALID);
            AdjacentSlot {
                dir,
                pos: target,
                cell,
            }
        });
        Ok(AdjacentCells { origin: pos, slots })
    }
}
