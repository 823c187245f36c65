use crate::cell::Cell;
use crate::error::MazeError;
use mazeworks_common::{Cardinal, Index2D};

/// The authoritative maze grid.
///
/// Cells are stored row-major in a flat vector. All topology changes go
/// through [`Maze2D::make_path`], which is what keeps neighbouring `PATH_*`
/// flags symmetric. Generators borrow the grid mutably for each step;
/// consumers read it through the `for_each_*` visitors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze2D {
    bounds: Index2D,
    cells: Vec<Cell>,
}

impl Maze2D {
    /// Create a `rows x cols` grid with every cell set to `EMPTY_PATH`.
    pub fn new(rows: i32, cols: i32) -> Result<Self, MazeError> {
        check_dimensions(rows, cols)?;
        Ok(Self {
            bounds: Index2D::new(rows, cols),
            cells: vec![Cell::EMPTY_PATH; (rows as usize) * (cols as usize)],
        })
    }

    /// `(rows, cols)` as an index; positions are valid iff `pos.in_bounds(bounds)`.
    pub fn bounds(&self) -> Index2D {
        self.bounds
    }

    pub fn rows(&self) -> i32 {
        self.bounds.row
    }

    pub fn cols(&self) -> i32 {
        self.bounds.col
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of distinct wall segments in a fully walled grid.
    ///
    /// Each cell owns its south and east faces; the north edge of row 0 and
    /// the west edge of column 0 add one segment per column and per row.
    pub fn total_wall_count(&self) -> usize {
        let rows = self.bounds.row as usize;
        let cols = self.bounds.col as usize;
        rows * cols * 2 + rows + cols
    }

    /// Row-major view of every cell.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Index2D) -> bool {
        pos.in_bounds(self.bounds)
    }

    /// Position of the `index`-th cell in row-major order.
    pub fn position_of(&self, index: usize) -> Index2D {
        let cols = self.bounds.col as usize;
        Index2D::new((index / cols) as i32, (index % cols) as i32)
    }

    fn index_of(&self, pos: Index2D) -> Result<usize, MazeError> {
        if !self.in_bounds(pos) {
            return Err(MazeError::IndexOutOfBounds {
                pos,
                bounds: self.bounds,
            });
        }
        Ok(pos.row as usize * self.bounds.col as usize + pos.col as usize)
    }

    pub fn get_cell(&self, pos: Index2D) -> Result<Cell, MazeError> {
        let i = self.index_of(pos)?;
        Ok(self.cells[i])
    }

    pub fn get_cell_mut(&mut self, pos: Index2D) -> Result<&mut Cell, MazeError> {
        let i = self.index_of(pos)?;
        Ok(&mut self.cells[i])
    }

    /// OR `flags` into the cell at `pos`.
    pub fn set_flags(&mut self, pos: Index2D, flags: Cell) -> Result<(), MazeError> {
        self.get_cell_mut(pos)?.insert(flags);
        Ok(())
    }

    /// Clear `flags` on the cell at `pos`.
    pub fn unset_flags(&mut self, pos: Index2D, flags: Cell) -> Result<(), MazeError> {
        self.get_cell_mut(pos)?.remove(flags);
        Ok(())
    }

    /// Set `flags` on `pos` and on each of its in-bounds cardinal neighbours.
    pub fn set_flags_adjacent(&mut self, pos: Index2D, flags: Cell) -> Result<(), MazeError> {
        self.set_flags(pos, flags)?;
        for neighbour in self.neighbours(pos) {
            self.set_flags(neighbour, flags)?;
        }
        Ok(())
    }

    /// Clear `flags` on `pos` and on each of its in-bounds cardinal neighbours.
    pub fn unset_flags_adjacent(&mut self, pos: Index2D, flags: Cell) -> Result<(), MazeError> {
        self.unset_flags(pos, flags)?;
        for neighbour in self.neighbours(pos) {
            self.unset_flags(neighbour, flags)?;
        }
        Ok(())
    }

    fn neighbours(&self, pos: Index2D) -> Vec<Index2D> {
        Cardinal::ALL
            .into_iter()
            .map(|dir| pos + dir.offset())
            .filter(|n| self.in_bounds(*n))
            .collect()
    }

    /// Carve a passage from `pos` towards `dir`.
    ///
    /// Clears `EMPTY_PATH` on both cells and sets the complementary `PATH_*`
    /// bits. Both positions are validated before either cell is touched.
    pub fn make_path(&mut self, pos: Index2D, dir: Cardinal) -> Result<(), MazeError> {
        let from = self.index_of(pos)?;
        let to = self.index_of(pos + dir.offset())?;

        let a = &mut self.cells[from];
        a.remove(Cell::EMPTY_PATH);
        a.insert(Cell::path(dir));

        let b = &mut self.cells[to];
        b.remove(Cell::EMPTY_PATH);
        b.insert(Cell::path(dir.reverse()));

        tracing::trace!(%pos, ?dir, "carved path");
        Ok(())
    }

    /// Carve a passage between two positions one cardinal step apart.
    pub fn make_path_between(&mut self, a: Index2D, b: Index2D) -> Result<(), MazeError> {
        let dir = a
            .direction_to(b)
            .ok_or(MazeError::InvalidAdjacency { from: a, to: b })?;
        self.make_path(a, dir)
    }

    /// Visit every cell in row-major order.
    pub fn for_each_cell(&self, mut f: impl FnMut(Index2D, Cell)) {
        for (i, &cell) in self.cells.iter().enumerate() {
            f(self.position_of(i), cell);
        }
    }

    /// Visit every cell in row-major order with mutable access.
    pub fn for_each_cell_mut(&mut self, mut f: impl FnMut(Index2D, &mut Cell)) {
        let cols = self.bounds.col as usize;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            f(Index2D::new((i / cols) as i32, (i % cols) as i32), cell);
        }
    }

    /// Visit every wall face: each direction of each cell with no passage.
    ///
    /// Interior walls are reported twice, once from each side.
    pub fn for_each_wall(&self, mut f: impl FnMut(Index2D, Cardinal, Cell)) {
        self.for_each_cell(|pos, cell| {
            for dir in Cardinal::ALL {
                if !cell.has_path(dir) {
                    f(pos, dir, cell);
                }
            }
        });
    }

    /// Visit every wall segment exactly once.
    ///
    /// North faces are only reported on row 0 and west faces only on column 0;
    /// every other north/west face is the south/east face of a neighbour.
    pub fn for_each_wall_unique(&self, mut f: impl FnMut(Index2D, Cardinal, Cell)) {
        self.for_each_cell(|pos, cell| {
            for dir in Cardinal::ALL {
                let owned = match dir {
                    Cardinal::North => pos.row == 0,
                    Cardinal::West => pos.col == 0,
                    Cardinal::East | Cardinal::South => true,
                };
                if owned && !cell.has_path(dir) {
                    f(pos, dir, cell);
                }
            }
        });
    }

    /// Restore every cell to `EMPTY_PATH`, dropping all other flags.
    pub fn reset(&mut self) {
        self.cells.fill(Cell::EMPTY_PATH);
    }

    /// Reallocate to `rows x cols`; all previous flag state is discarded.
    pub fn resize(&mut self, rows: i32, cols: i32) -> Result<(), MazeError> {
        check_dimensions(rows, cols)?;
        self.bounds = Index2D::new(rows, cols);
        self.cells = vec![Cell::EMPTY_PATH; (rows as usize) * (cols as usize)];
        tracing::debug!(rows, cols, "maze resized");
        Ok(())
    }
}

fn check_dimensions(rows: i32, cols: i32) -> Result<(), MazeError> {
    if rows <= 0 || cols <= 0 {
        return Err(MazeError::InvalidDimension { rows, cols });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_rejects_non_positive_dimensions() {
        assert_eq!(
            Maze2D::new(0, 3),
            Err(MazeError::InvalidDimension { rows: 0, cols: 3 })
        );
        assert!(Maze2D::new(3, -1).is_err());
    }

    #[test]
    fn two_by_two_sizing() {
        let maze = Maze2D::new(2, 2).unwrap();
        assert_eq!(maze.cell_count(), 4);
        assert_eq!(maze.total_wall_count(), 12);
    }

    #[test]
    fn single_cell_has_four_walls() {
        let maze = Maze2D::new(1, 1).unwrap();
        assert_eq!(maze.total_wall_count(), 4);
        let mut walls = 0;
        maze.for_each_wall_unique(|_, _, _| walls += 1);
        assert_eq!(walls, 4);
    }

    #[test]
    fn get_cell_out_of_bounds() {
        let mut maze = Maze2D::new(2, 3).unwrap();
        let err = maze.get_cell(Index2D::new(2, 0)).unwrap_err();
        assert!(matches!(err, MazeError::IndexOutOfBounds { .. }));
        assert!(maze.get_cell_mut(Index2D::new(0, -1)).is_err());
        assert!(maze.set_flags(Index2D::new(0, 3), Cell::RED).is_err());
    }

    #[test]
    fn set_and_unset_flags() {
        let mut maze = Maze2D::new(2, 2).unwrap();
        let pos = Index2D::new(1, 0);
        maze.set_flags(pos, Cell::RED | Cell::VISITED).unwrap();
        assert_eq!(
            maze.get_cell(pos).unwrap(),
            Cell::EMPTY_PATH | Cell::RED | Cell::VISITED
        );
        maze.unset_flags(pos, Cell::RED | Cell::EMPTY_PATH).unwrap();
        assert_eq!(maze.get_cell(pos).unwrap(), Cell::VISITED);
    }

    #[test]
    fn set_flags_adjacent_paints_neighbourhood() {
        let mut maze = Maze2D::new(3, 3).unwrap();
        maze.set_flags_adjacent(Index2D::new(0, 0), Cell::BLUE).unwrap();
        let mut painted = Vec::new();
        maze.for_each_cell(|pos, cell| {
            if cell.contains(Cell::BLUE) {
                painted.push(pos);
            }
        });
        assert_eq!(
            painted,
            vec![Index2D::new(0, 0), Index2D::new(0, 1), Index2D::new(1, 0)]
        );

        maze.unset_flags_adjacent(Index2D::new(1, 1), Cell::BLUE).unwrap();
        assert!(maze.get_cell(Index2D::new(0, 0)).unwrap().contains(Cell::BLUE));
        assert!(!maze.get_cell(Index2D::new(0, 1)).unwrap().contains(Cell::BLUE));
    }

    #[test]
    fn make_path_sets_both_sides() {
        let mut maze = Maze2D::new(2, 2).unwrap();
        maze.make_path(Index2D::new(0, 0), Cardinal::East).unwrap();
        assert_eq!(maze.get_cell(Index2D::new(0, 0)).unwrap(), Cell::PATH_EAST);
        assert_eq!(maze.get_cell(Index2D::new(0, 1)).unwrap(), Cell::PATH_WEST);
        assert_eq!(
            maze.get_cell(Index2D::new(1, 0)).unwrap(),
            Cell::EMPTY_PATH
        );
    }

    #[test]
    fn make_path_off_grid_leaves_cell_untouched() {
        let mut maze = Maze2D::new(2, 2).unwrap();
        let err = maze.make_path(Index2D::new(0, 0), Cardinal::North).unwrap_err();
        assert!(matches!(err, MazeError::IndexOutOfBounds { .. }));
        assert_eq!(maze.get_cell(Index2D::ZERO).unwrap(), Cell::EMPTY_PATH);
    }

    #[test]
    fn make_path_between_rejects_non_adjacent() {
        let mut maze = Maze2D::new(3, 3).unwrap();
        let a = Index2D::new(0, 0);
        assert_eq!(
            maze.make_path_between(a, Index2D::new(2, 0)),
            Err(MazeError::InvalidAdjacency {
                from: a,
                to: Index2D::new(2, 0)
            })
        );
        assert!(maze.make_path_between(a, a).is_err());
        assert!(maze.make_path_between(a, Index2D::new(1, 1)).is_err());
        maze.make_path_between(Index2D::new(1, 1), Index2D::new(0, 1))
            .unwrap();
        assert!(maze.get_cell(Index2D::new(1, 1)).unwrap().has_path(Cardinal::North));
    }

    #[test]
    fn for_each_cell_is_row_major() {
        let maze = Maze2D::new(2, 3).unwrap();
        let mut order = Vec::new();
        maze.for_each_cell(|pos, _| order.push(pos));
        assert_eq!(order.len(), 6);
        assert_eq!(order[0], Index2D::new(0, 0));
        assert_eq!(order[2], Index2D::new(0, 2));
        assert_eq!(order[3], Index2D::new(1, 0));
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn for_each_cell_mut_writes_through() {
        let mut maze = Maze2D::new(2, 2).unwrap();
        maze.for_each_cell_mut(|pos, cell| {
            if pos.row == 1 {
                cell.insert(Cell::MODIFIED);
            }
        });
        assert!(maze.get_cell(Index2D::new(1, 1)).unwrap().contains(Cell::MODIFIED));
        assert!(!maze.get_cell(Index2D::new(0, 1)).unwrap().contains(Cell::MODIFIED));
    }

    #[test]
    fn carving_removes_wall_from_both_visitors() {
        let mut maze = Maze2D::new(2, 2).unwrap();
        let mut before = 0;
        maze.for_each_wall(|_, _, _| before += 1);
        assert_eq!(before, 16);

        maze.make_path(Index2D::new(0, 0), Cardinal::South).unwrap();
        let mut all = 0;
        maze.for_each_wall(|_, _, _| all += 1);
        let mut unique = 0;
        maze.for_each_wall_unique(|_, _, _| unique += 1);
        assert_eq!(all, 14);
        assert_eq!(unique, maze.total_wall_count() - 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut maze = Maze2D::new(2, 2).unwrap();
        maze.make_path(Index2D::ZERO, Cardinal::East).unwrap();
        maze.set_flags(Index2D::new(1, 1), Cell::FINISHED).unwrap();
        maze.reset();
        assert!(maze.cells().iter().all(|&c| c == Cell::EMPTY_PATH));
    }

    #[test]
    fn resize_reallocates() {
        let mut maze = Maze2D::new(2, 2).unwrap();
        maze.set_flags(Index2D::ZERO, Cell::VISITED).unwrap();
        maze.resize(3, 5).unwrap();
        assert_eq!(maze.bounds(), Index2D::new(3, 5));
        assert_eq!(maze.cell_count(), 15);
        assert!(maze.cells().iter().all(|&c| c == Cell::EMPTY_PATH));
        assert_eq!(
            maze.resize(0, 5),
            Err(MazeError::InvalidDimension { rows: 0, cols: 5 })
        );
        assert_eq!(maze.bounds(), Index2D::new(3, 5));
    }

    proptest! {
        #[test]
        fn fresh_grid_sizing(rows in 1i32..40, cols in 1i32..40) {
            let maze = Maze2D::new(rows, cols).unwrap();
            let n = (rows * cols) as usize;
            prop_assert_eq!(maze.cell_count(), n);
            prop_assert!(maze.cells().iter().all(|&c| c == Cell::EMPTY_PATH));
            prop_assert_eq!(
                maze.total_wall_count(),
                n * 2 + rows as usize + cols as usize
            );
            let mut unique = 0;
            maze.for_each_wall_unique(|_, _, _| unique += 1);
            prop_assert_eq!(unique, maze.total_wall_count());
        }

        #[test]
        fn make_path_is_symmetric(
            rows in 1i32..12,
            cols in 1i32..12,
            r in 0i32..12,
            c in 0i32..12,
            d in 0usize..4,
        ) {
            let pos = Index2D::new(r % rows, c % cols);
            let dir = Cardinal::ALL[d];
            let target = pos + dir.offset();
            let mut maze = Maze2D::new(rows, cols).unwrap();
            prop_assume!(maze.in_bounds(target));

            maze.make_path(pos, dir).unwrap();
            let a = maze.get_cell(pos).unwrap();
            let b = maze.get_cell(target).unwrap();
            prop_assert!(a.has_path(dir));
            prop_assert!(b.has_path(dir.reverse()));
            prop_assert!(!a.contains(Cell::EMPTY_PATH));
            prop_assert!(!b.contains(Cell::EMPTY_PATH));
        }

        #[test]
        fn make_path_between_requires_unit_distance(
            ar in 0i32..6, ac in 0i32..6,
            br in 0i32..6, bc in 0i32..6,
        ) {
            let a = Index2D::new(ar, ac);
            let b = Index2D::new(br, bc);
            prop_assume!(a.manhattan(b) != 1);
            let mut maze = Maze2D::new(6, 6).unwrap();
            prop_assert_eq!(
                maze.make_path_between(a, b),
                Err(MazeError::InvalidAdjacency { from: a, to: b })
            );
        }
    }
}
