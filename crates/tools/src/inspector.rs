use std::collections::VecDeque;

use mazeworks_kernel::{Cardinal, Cell, Flag, Index2D, Maze2D};

/// Maze inspector for developer tooling.
///
/// Read-only queries over a grid: counts, connectivity and consistency of
/// the carved topology.
pub struct MazeInspector;

impl MazeInspector {
    /// Produce a summary of the maze state.
    pub fn summary(maze: &Maze2D) -> MazeSummary {
        let mut visited = 0;
        let mut finished = 0;
        maze.for_each_cell(|_, cell| {
            visited += usize::from(cell.contains(Cell::VISITED));
            finished += usize::from(cell.contains(Cell::FINISHED));
        });
        let mut walls = 0;
        maze.for_each_wall_unique(|_, _, _| walls += 1);

        MazeSummary {
            rows: maze.rows(),
            cols: maze.cols(),
            cells: maze.cell_count(),
            carved_edges: Self::carved_edge_count(maze),
            visited,
            finished,
            walls,
        }
    }

    /// Flags and open directions of one cell, or `None` if off-grid.
    pub fn inspect_cell(maze: &Maze2D, pos: Index2D) -> Option<CellInfo> {
        let cell = maze.get_cell(pos).ok()?;
        Some(CellInfo {
            pos,
            flags: Flag::ALL
                .into_iter()
                .filter(|flag| cell.is_set(*flag))
                .collect(),
            open: Cardinal::ALL
                .into_iter()
                .filter(|dir| cell.has_path(*dir))
                .collect(),
        })
    }

    /// Number of carved passages. Each passage is counted once, from its
    /// west or north end.
    pub fn carved_edge_count(maze: &Maze2D) -> usize {
        let mut edges = 0;
        maze.for_each_cell(|_, cell| {
            edges += usize::from(cell.has_path(Cardinal::East));
            edges += usize::from(cell.has_path(Cardinal::South));
        });
        edges
    }

    /// Cells reachable from the origin cell by following carved passages.
    pub fn reachable_count(maze: &Maze2D) -> usize {
        let mut seen = vec![false; maze.cell_count()];
        let cols = maze.cols() as usize;
        let slot = |pos: Index2D| pos.row as usize * cols + pos.col as usize;

        let mut queue = VecDeque::from([Index2D::ZERO]);
        seen[0] = true;
        let mut reached = 0;
        while let Some(pos) = queue.pop_front() {
            reached += 1;
            let Ok(cell) = maze.get_cell(pos) else {
                continue;
            };
            for dir in Cardinal::ALL {
                let next = pos + dir.offset();
                if cell.has_path(dir) && maze.in_bounds(next) && !seen[slot(next)] {
                    seen[slot(next)] = true;
                    queue.push_back(next);
                }
            }
        }
        reached
    }

    pub fn is_connected(maze: &Maze2D) -> bool {
        Self::reachable_count(maze) == maze.cell_count()
    }

    /// Connected with exactly `cells - 1` passages, i.e. a spanning tree.
    pub fn is_perfect(maze: &Maze2D) -> bool {
        let perfect = Self::symmetry_violations(maze) == 0
            && Self::carved_edge_count(maze) + 1 == maze.cell_count()
            && Self::is_connected(maze);
        if !perfect {
            tracing::debug!(
                rows = maze.rows(),
                cols = maze.cols(),
                "maze is not a spanning tree"
            );
        }
        perfect
    }

    /// Passage flags without a matching flag on the other side, including
    /// passages that lead off the grid.
    pub fn symmetry_violations(maze: &Maze2D) -> usize {
        let mut violations = 0;
        maze.for_each_cell(|pos, cell| {
            for dir in Cardinal::ALL {
                if !cell.has_path(dir) {
                    continue;
                }
                let matched = maze
                    .get_cell(pos + dir.offset())
                    .is_ok_and(|other| other.has_path(dir.reverse()));
                if !matched {
                    violations += 1;
                }
            }
        });
        violations
    }
}

/// Summary of maze state for the inspector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeSummary {
    pub rows: i32,
    pub cols: i32,
    pub cells: usize,
    pub carved_edges: usize,
    pub visited: usize,
    pub finished: usize,
    /// Wall segments still standing, each counted once.
    pub walls: usize,
}

impl std::fmt::Display for MazeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Maze: {}x{} cells={} edges={} visited={} finished={} walls={}",
            self.rows,
            self.cols,
            self.cells,
            self.carved_edges,
            self.visited,
            self.finished,
            self.walls
        )
    }
}

/// Detailed info about a single cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellInfo {
    pub pos: Index2D,
    pub flags: Vec<Flag>,
    pub open: Vec<Cardinal>,
}

impl std::fmt::Display for CellInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cell {} flags={:?} open={:?}", self.pos, self.flags, self.open)
    }
}
