//! Hunt-and-kill: random walks joined by scans over a rotating queue.

use crate::generator::{GeneratorState, MazeGenerator};
use crate::rng::MazeRng;
use mazeworks_common::Index2D;
use mazeworks_kernel::{Cell, Maze2D, MazeError, is_unvisited, is_visited};
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// How the hunt queue is filled and where the first walk begins.
#[derive(Debug, Clone, Copy)]
pub struct HuntOrdering {
    pub name: &'static str,
    pub populate: fn(&Maze2D, &mut MazeRng) -> VecDeque<Index2D>,
    pub starting_cell: fn(&VecDeque<Index2D>, &mut MazeRng) -> Option<Index2D>,
}

impl HuntOrdering {
    /// Every cell, shuffled once; the walk starts anywhere.
    pub const RANDOM: HuntOrdering = HuntOrdering {
        name: "random-hunt-and-kill",
        populate: populate_shuffled,
        starting_cell: random_element,
    };

    /// Boustrophedon row order; the walk starts at the first cell.
    pub const SERPENTINE: HuntOrdering = HuntOrdering {
        name: "standard-hunt-and-kill",
        populate: populate_serpentine,
        starting_cell: first_element,
    };
}

fn populate_shuffled(maze: &Maze2D, rng: &mut MazeRng) -> VecDeque<Index2D> {
    let mut cells: Vec<Index2D> = (0..maze.cell_count())
        .map(|i| maze.position_of(i))
        .collect();
    cells.shuffle(rng);
    cells.into()
}

fn populate_serpentine(maze: &Maze2D, _rng: &mut MazeRng) -> VecDeque<Index2D> {
    let bounds = maze.bounds();
    std::iter::successors(Some(Index2D::ZERO), |pos| pos.next_serpentine(bounds)).collect()
}

fn random_element(queue: &VecDeque<Index2D>, rng: &mut MazeRng) -> Option<Index2D> {
    if queue.is_empty() {
        return None;
    }
    queue.get(rng.below(queue.len())).copied()
}

fn first_element(queue: &VecDeque<Index2D>, _rng: &mut MazeRng) -> Option<Index2D> {
    queue.front().copied()
}

/// Two-phase hunt-and-kill generator parameterised by a [`HuntOrdering`].
///
/// Cells stay in the hunt queue after the walk visits them; such entries
/// count as failed hunts. Generation is declared complete once
/// `rows * cols` consecutive hunts fail.
#[derive(Debug)]
pub struct HuntAndKill {
    state: GeneratorState,
    rng: MazeRng,
    ordering: HuntOrdering,
    unvisited: VecDeque<Index2D>,
    current: Index2D,
    is_random_walk: bool,
    failed_attempts: usize,
}

impl HuntAndKill {
    pub fn new(ordering: HuntOrdering, rng: MazeRng) -> Self {
        Self {
            state: GeneratorState::default(),
            rng,
            ordering,
            unvisited: VecDeque::new(),
            current: Index2D::ZERO,
            is_random_walk: true,
            failed_attempts: 0,
        }
    }

    pub fn random(rng: MazeRng) -> Self {
        Self::new(HuntOrdering::RANDOM, rng)
    }

    pub fn standard(rng: MazeRng) -> Self {
        Self::new(HuntOrdering::SERPENTINE, rng)
    }

    pub fn ordering(&self) -> &HuntOrdering {
        &self.ordering
    }

    pub fn current(&self) -> Index2D {
        self.current
    }

    pub fn is_random_walk(&self) -> bool {
        self.is_random_walk
    }

    pub fn failed_attempts(&self) -> usize {
        self.failed_attempts
    }

    pub fn unvisited_len(&self) -> usize {
        self.unvisited.len()
    }

    fn walk(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        let adjacent = maze.get_adjacent(self.current)?;
        if adjacent.count_where(is_unvisited) == 0 {
            self.is_random_walk = false;
            tracing::trace!(at = %self.current, "walk exhausted, hunting");
            return Ok(());
        }
        let next = adjacent.get_random_where(&mut self.rng, is_unvisited)?;
        maze.make_path(self.current, next.dir)?;
        mark_visited(maze, self.current)?;
        mark_visited(maze, next.pos)?;
        self.current = next.pos;
        Ok(())
    }

    fn hunt(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        let Some(candidate) = self.unvisited.pop_back() else {
            self.state.finish(maze, self.ordering.name);
            return Ok(());
        };

        let adjacent = maze.get_adjacent(candidate)?;
        let open = is_unvisited(maze.get_cell(candidate)?);
        if open && adjacent.count_where(is_visited) > 0 {
            let from = adjacent.get_random_where(&mut self.rng, is_visited)?;
            maze.make_path(candidate, from.dir)?;
            mark_visited(maze, candidate)?;
            tracing::trace!(
                %candidate,
                failed = self.failed_attempts,
                "hunt hit"
            );
            self.failed_attempts = 0;
            self.current = candidate;
            self.is_random_walk = true;
            return Ok(());
        }

        self.unvisited.push_front(candidate);
        self.failed_attempts += 1;
        if self.failed_attempts >= maze.cell_count() {
            self.state.finish(maze, self.ordering.name);
        }
        Ok(())
    }
}

fn mark_visited(maze: &mut Maze2D, pos: Index2D) -> Result<(), MazeError> {
    maze.unset_flags(pos, Cell::COLORS)?;
    maze.set_flags(pos, Cell::VISITED)
}

impl MazeGenerator for HuntAndKill {
    fn name(&self) -> &'static str {
        self.ordering.name
    }

    fn state(&self) -> &GeneratorState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut GeneratorState {
        &mut self.state
    }

    fn on_init(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        self.unvisited = (self.ordering.populate)(maze, &mut self.rng);
        // A `Maze2D` always has at least one cell, so the built-in orderings
        // never come back empty. A custom ordering that does is rejected the
        // way an empty grid would be.
        let start = (self.ordering.starting_cell)(&self.unvisited, &mut self.rng).ok_or(
            MazeError::InvalidDimension {
                rows: maze.rows(),
                cols: maze.cols(),
            },
        )?;
        mark_visited(maze, start)?;
        self.current = start;
        self.is_random_walk = true;
        self.failed_attempts = 0;
        tracing::debug!(%start, queued = self.unvisited.len(), "hunt-and-kill start");
        Ok(())
    }

    fn on_step(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        if self.is_random_walk {
            self.walk(maze)
        } else {
            self.hunt(maze)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mazeworks_tools::MazeInspector;
    use proptest::prelude::*;

    fn run(mut g: HuntAndKill, rows: i32, cols: i32) -> (Maze2D, HuntAndKill) {
        let mut maze = Maze2D::new(rows, cols).unwrap();
        let mut steps = 0;
        while !g.is_complete() {
            g.step(&mut maze).unwrap();
            steps += 1;
            assert!(steps < 1_000_000);
        }
        (maze, g)
    }

    #[test]
    fn serpentine_populates_boustrophedon() {
        let maze = Maze2D::new(2, 3).unwrap();
        let mut rng = MazeRng::from_seed(0);
        let queue = (HuntOrdering::SERPENTINE.populate)(&maze, &mut rng);
        let expected: Vec<Index2D> = [(0, 0), (0, 1), (0, 2), (1, 2), (1, 1), (1, 0)]
            .into_iter()
            .map(|(r, c)| Index2D::new(r, c))
            .collect();
        assert_eq!(queue.into_iter().collect::<Vec<_>>(), expected);
        let queue: VecDeque<_> = expected.into();
        assert_eq!(
            (HuntOrdering::SERPENTINE.starting_cell)(&queue, &mut rng),
            Some(Index2D::ZERO)
        );
    }

    #[test]
    fn random_populate_is_a_permutation() {
        let maze = Maze2D::new(5, 4).unwrap();
        let mut rng = MazeRng::from_seed(17);
        let mut cells: Vec<_> = (HuntOrdering::RANDOM.populate)(&maze, &mut rng)
            .into_iter()
            .collect();
        assert_eq!(cells.len(), 20);
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 20);
        assert!(cells.iter().all(|p| maze.in_bounds(*p)));
    }

    #[test]
    fn starting_cell_of_empty_queue_is_none() {
        let mut rng = MazeRng::from_seed(1);
        let empty = VecDeque::new();
        assert_eq!((HuntOrdering::RANDOM.starting_cell)(&empty, &mut rng), None);
        assert_eq!((HuntOrdering::SERPENTINE.starting_cell)(&empty, &mut rng), None);
    }

    #[test]
    fn init_marks_start_visited() {
        let mut maze = Maze2D::new(3, 3).unwrap();
        let mut g = HuntAndKill::standard(MazeRng::from_seed(2));
        g.init(&mut maze).unwrap();
        assert_eq!(g.current(), Index2D::ZERO);
        assert!(g.is_random_walk());
        assert_eq!(g.unvisited_len(), 9);
        assert!(maze.get_cell(Index2D::ZERO).unwrap().contains(Cell::VISITED));
    }

    #[test]
    fn single_cell_completes_after_one_failed_hunt() {
        let mut maze = Maze2D::new(1, 1).unwrap();
        let mut g = HuntAndKill::random(MazeRng::from_seed(9));
        g.step(&mut maze).unwrap();
        assert!(!g.is_random_walk());
        assert!(!g.is_complete());
        g.step(&mut maze).unwrap();
        assert!(g.is_complete());
        assert_eq!(g.failed_attempts(), 1);
        assert!(maze.get_cell(Index2D::ZERO).unwrap().contains(Cell::TERMINAL));
    }

    #[test]
    fn completion_follows_a_full_rotation_of_failures() {
        // Documented stopping rule: exactly rows * cols consecutive misses.
        for g in [
            HuntAndKill::random(MazeRng::from_seed(31)),
            HuntAndKill::standard(MazeRng::from_seed(31)),
        ] {
            let (maze, g) = run(g, 6, 8);
            assert_eq!(g.failed_attempts(), 48);
            assert!(maze.cells().iter().all(|c| c.contains(Cell::VISITED)));
        }
    }

    #[test]
    fn walk_clears_stale_colours() {
        let mut maze = Maze2D::new(1, 2).unwrap();
        maze.set_flags(Index2D::new(0, 1), Cell::RED | Cell::BLUE).unwrap();
        let mut g = HuntAndKill::standard(MazeRng::from_seed(0));
        g.step(&mut maze).unwrap();
        let cell = maze.get_cell(Index2D::new(0, 1)).unwrap();
        assert!(cell.contains(Cell::VISITED));
        assert!(!cell.intersects(Cell::COLORS));
        assert!(cell.has_path(mazeworks_common::Cardinal::West));
    }

    #[test]
    fn stepping_after_completion_changes_nothing() {
        let (mut maze, mut g) = run(HuntAndKill::random(MazeRng::from_seed(5)), 5, 5);
        let snapshot = maze.clone();
        let failed = g.failed_attempts();
        g.step_n(&mut maze, 40).unwrap();
        assert_eq!(maze, snapshot);
        assert_eq!(g.failed_attempts(), failed);
        assert!(g.is_complete());
    }

    #[test]
    fn fixed_seed_runs_are_bit_identical() {
        let (a, _) = run(HuntAndKill::random(MazeRng::from_seed(77)), 9, 11);
        let (b, _) = run(HuntAndKill::random(MazeRng::from_seed(77)), 9, 11);
        assert_eq!(a.cells(), b.cells());

        let (a, _) = run(HuntAndKill::standard(MazeRng::from_seed(77)), 9, 11);
        let (b, _) = run(HuntAndKill::standard(MazeRng::from_seed(77)), 9, 11);
        assert_eq!(a.cells(), b.cells());
    }

    #[test]
    fn tall_narrow_grids_complete_perfectly() {
        for g in [
            HuntAndKill::random(MazeRng::from_seed(40)),
            HuntAndKill::standard(MazeRng::from_seed(40)),
        ] {
            let (maze, g) = run(g, 40, 3);
            assert!(MazeInspector::is_perfect(&maze));
            assert_eq!(g.failed_attempts(), 120);
        }
    }

    #[test]
    fn empty_ordering_is_rejected_at_init() {
        fn nothing(_: &Maze2D, _: &mut MazeRng) -> VecDeque<Index2D> {
            VecDeque::new()
        }
        let ordering = HuntOrdering {
            name: "empty",
            populate: nothing,
            starting_cell: first_element,
        };
        let mut maze = Maze2D::new(2, 2).unwrap();
        let mut g = HuntAndKill::new(ordering, MazeRng::from_seed(0));
        assert_eq!(
            g.init(&mut maze),
            Err(MazeError::InvalidDimension { rows: 2, cols: 2 })
        );
        assert!(!g.state().is_init());
        assert_eq!(maze, Maze2D::new(2, 2).unwrap());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(48))]

        #[test]
        fn random_ordering_produces_perfect_maze(
            rows in 1i32..12,
            cols in 1i32..12,
            seed in any::<u64>(),
        ) {
            let (maze, _) = run(HuntAndKill::random(MazeRng::from_seed(seed)), rows, cols);
            prop_assert!(MazeInspector::is_perfect(&maze));
        }

        #[test]
        fn serpentine_ordering_produces_perfect_maze(
            rows in 1i32..12,
            cols in 1i32..12,
            seed in any::<u64>(),
        ) {
            let (maze, _) = run(HuntAndKill::standard(MazeRng::from_seed(seed)), rows, cols);
            prop_assert!(MazeInspector::is_perfect(&maze));
        }
    }
}
