//! Randomized depth-first generator with an explicit stack.

use crate::generator::{GeneratorState, MazeGenerator};
use crate::rng::MazeRng;
use mazeworks_common::Index2D;
use mazeworks_kernel::{Cell, Maze2D, MazeError, is_unvisited};

const NAME: &str = "recursive-backtrack";

/// Depth-first spanning-tree carver.
///
/// The stack holds the current carving path; its top is the active frontier
/// (coloured `RED`). Large grids never touch the call stack.
#[derive(Debug)]
pub struct RecursiveBacktrack {
    state: GeneratorState,
    rng: MazeRng,
    stack: Vec<Index2D>,
}

impl RecursiveBacktrack {
    pub fn new(rng: MazeRng) -> Self {
        Self {
            state: GeneratorState::default(),
            rng,
            stack: Vec::new(),
        }
    }

    /// Current carving path, bottom first.
    pub fn stack(&self) -> &[Index2D] {
        &self.stack
    }
}

impl MazeGenerator for RecursiveBacktrack {
    fn name(&self) -> &'static str {
        NAME
    }

    fn state(&self) -> &GeneratorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GeneratorState {
        &mut self.state
    }

    fn on_init(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        let start = self.rng.cell_in(maze.bounds());
        tracing::debug!(%start, "backtracker start");
        self.stack.push(start);
        Ok(())
    }

    fn on_step(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        let Some(&pos) = self.stack.last() else {
            self.state.finish(maze, NAME);
            return Ok(());
        };

        let adjacent = maze.get_adjacent(pos)?;
        if adjacent.count_where(is_unvisited) == 0 {
            self.stack.pop();
            if let Some(&top) = self.stack.last() {
                maze.set_flags(top, Cell::RED)?;
                maze.unset_flags(top, Cell::GREEN)?;
                maze.unset_flags(pos, Cell::GREEN)?;
            }
            tracing::trace!(%pos, depth = self.stack.len(), "backtrack");
            return Ok(());
        }

        let next = adjacent.get_random_where(&mut self.rng, is_unvisited)?;
        maze.unset_flags(pos, Cell::EMPTY_PATH | Cell::RED)?;
        maze.set_flags(pos, Cell::VISITED | Cell::GREEN)?;
        maze.set_flags(next.pos, Cell::VISITED | Cell::GREEN)?;
        maze.make_path(pos, next.dir)?;
        self.stack.push(next.pos);
        Ok(())
    }
}
