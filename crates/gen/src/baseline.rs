//! Non-realistic generators used to exercise the stepping contract.
//!
//! Neither produces a perfect maze.

use crate::generator::{GeneratorState, MazeGenerator};
use crate::rng::MazeRng;
use mazeworks_common::{Cardinal, Index2D};
use mazeworks_kernel::{Cell, Maze2D, MazeError};

fn in_grid(cell: Cell) -> bool {
    !cell.contains(Cell::INVALID)
}

/// Noise fill: each step takes the next cell in row-major order and opens
/// one random passage out of it.
#[derive(Debug)]
pub struct RandomFill {
    state: GeneratorState,
    rng: MazeRng,
    cursor: usize,
}

impl RandomFill {
    const NAME: &str = "random-fill";

    pub fn new(rng: MazeRng) -> Self {
        Self {
            state: GeneratorState::default(),
            rng,
            cursor: 0,
        }
    }

    /// Number of cells processed so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl MazeGenerator for RandomFill {
    fn name(&self) -> &'static str {
        RandomFill::NAME
    }

    fn state(&self) -> &GeneratorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GeneratorState {
        &mut self.state
    }

    fn on_init(&mut self, _maze: &mut Maze2D) -> Result<(), MazeError> {
        self.cursor = 0;
        Ok(())
    }

    fn on_step(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        if self.cursor >= maze.cell_count() {
            self.state.finish(maze, Self::NAME);
            return Ok(());
        }
        let pos = maze.position_of(self.cursor);
        let adjacent = maze.get_adjacent(pos)?;
        if adjacent.count_where(in_grid) > 0 {
            let slot = adjacent.get_random_where(&mut self.rng, in_grid)?;
            maze.make_path(pos, slot.dir)?;
        }
        maze.set_flags(pos, Cell::VISITED)?;
        self.cursor += 1;
        if self.cursor == maze.cell_count() {
            self.state.finish(maze, Self::NAME);
        }
        Ok(())
    }
}

/// Straight corridors: every lane perpendicular to `dir` is carved end to
/// end, one edge per step.
#[derive(Debug)]
pub struct PathSingleDirection {
    state: GeneratorState,
    dir: Cardinal,
    lane: i32,
    pos: Index2D,
}

impl PathSingleDirection {
    const NAME: &str = "single-direction";

    pub fn new(dir: Cardinal) -> Self {
        Self {
            state: GeneratorState::default(),
            dir,
            lane: 0,
            pos: Index2D::ZERO,
        }
    }

    pub fn direction(&self) -> Cardinal {
        self.dir
    }

    fn lane_count(&self, maze: &Maze2D) -> i32 {
        match self.dir {
            Cardinal::East | Cardinal::West => maze.rows(),
            Cardinal::North | Cardinal::South => maze.cols(),
        }
    }

    fn lane_start(&self, maze: &Maze2D, lane: i32) -> Index2D {
        match self.dir {
            Cardinal::East => Index2D::new(lane, 0),
            Cardinal::West => Index2D::new(lane, maze.cols() - 1),
            Cardinal::South => Index2D::new(0, lane),
            Cardinal::North => Index2D::new(maze.rows() - 1, lane),
        }
    }
}

impl MazeGenerator for PathSingleDirection {
    fn name(&self) -> &'static str {
        PathSingleDirection::NAME
    }

    fn state(&self) -> &GeneratorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GeneratorState {
        &mut self.state
    }

    fn on_init(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        self.lane = 0;
        self.pos = self.lane_start(maze, 0);
        Ok(())
    }

    fn on_step(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        maze.set_flags(self.pos, Cell::VISITED)?;
        let next = self.pos + self.dir.offset();
        if maze.in_bounds(next) {
            maze.make_path(self.pos, self.dir)?;
            self.pos = next;
            return Ok(());
        }

        self.lane += 1;
        if self.lane < self.lane_count(maze) {
            self.pos = self.lane_start(maze, self.lane);
        } else {
            self.state.finish(maze, Self::NAME);
        }
        Ok(())
    }
}
