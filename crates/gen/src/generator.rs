use crate::backtrack::RecursiveBacktrack;
use crate::baseline::{PathSingleDirection, RandomFill};
use crate::config::{Algorithm, GeneratorConfig};
use crate::hunt_and_kill::HuntAndKill;
use crate::rng::MazeRng;
use mazeworks_common::Cardinal;
use mazeworks_kernel::{Cell, Maze2D, MazeError};

/// Lifecycle flags shared by every generator.
///
/// `Uninitialized -> Initialized -> (Stepping)* -> Complete`. Both flags only
/// ever go from `false` to `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GeneratorState {
    is_init: bool,
    is_complete: bool,
}

impl GeneratorState {
    pub fn is_init(&self) -> bool {
        self.is_init
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    fn mark_init(&mut self) {
        self.is_init = true;
    }

    /// Apply the terminal colour pass to every cell and latch completion.
    ///
    /// Generators call this from `on_step` once they have no work left.
    pub fn finish(&mut self, maze: &mut Maze2D, name: &'static str) {
        maze.for_each_cell_mut(|_, cell| cell.insert(Cell::TERMINAL));
        self.is_complete = true;
        tracing::debug!(generator = name, "generation complete");
    }
}

/// The steppable generator contract.
///
/// Implementors provide `on_init` and `on_step`; callers use `init`, `step`,
/// `step_n` and `is_complete`. The maze passed to every call must be the
/// same grid for the whole run.
pub trait MazeGenerator {
    fn name(&self) -> &'static str;

    fn state(&self) -> &GeneratorState;

    fn state_mut(&mut self) -> &mut GeneratorState;

    /// One-time setup such as seeding the frontier.
    fn on_init(&mut self, maze: &mut Maze2D) -> Result<(), MazeError>;

    /// One unit of algorithmic work. Never called after completion.
    fn on_step(&mut self, maze: &mut Maze2D) -> Result<(), MazeError>;

    /// Run `on_init` the first time only; later calls are no-ops.
    fn init(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        if self.state().is_init() {
            return Ok(());
        }
        self.on_init(maze)?;
        self.state_mut().mark_init();
        tracing::debug!(
            generator = self.name(),
            rows = maze.rows(),
            cols = maze.cols(),
            "generator initialized"
        );
        Ok(())
    }

    /// Advance by one unit of work. Does nothing once complete.
    fn step(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        if self.is_complete() {
            return Ok(());
        }
        self.init(maze)?;
        self.on_step(maze)
    }

    fn step_n(&mut self, maze: &mut Maze2D, n: usize) -> Result<(), MazeError> {
        for _ in 0..n {
            self.step(maze)?;
        }
        Ok(())
    }

    fn is_complete(&self) -> bool {
        self.state().is_complete()
    }
}

/// The closed set of generators, selected at runtime from configuration.
#[derive(Debug)]
pub enum Generator {
    RecursiveBacktrack(RecursiveBacktrack),
    HuntAndKill(HuntAndKill),
    RandomFill(RandomFill),
    SingleDirection(PathSingleDirection),
}

impl Generator {
    /// Build the generator for `algorithm`. `direction` only matters for
    /// [`Algorithm::SingleDirection`].
    pub fn new(algorithm: Algorithm, direction: Cardinal, rng: MazeRng) -> Self {
        match algorithm {
            Algorithm::RecursiveBacktrack => {
                Generator::RecursiveBacktrack(RecursiveBacktrack::new(rng))
            }
            Algorithm::RandomHuntAndKill => Generator::HuntAndKill(HuntAndKill::random(rng)),
            Algorithm::StandardHuntAndKill => Generator::HuntAndKill(HuntAndKill::standard(rng)),
            Algorithm::RandomFill => Generator::RandomFill(RandomFill::new(rng)),
            Algorithm::SingleDirection => {
                Generator::SingleDirection(PathSingleDirection::new(direction))
            }
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self::new(
            config.algorithm,
            config.direction,
            MazeRng::from_mode(config.seed),
        )
    }

    fn inner(&self) -> &dyn MazeGenerator {
        match self {
            Generator::RecursiveBacktrack(g) => g,
            Generator::HuntAndKill(g) => g,
            Generator::RandomFill(g) => g,
            Generator::SingleDirection(g) => g,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn MazeGenerator {
        match self {
            Generator::RecursiveBacktrack(g) => g,
            Generator::HuntAndKill(g) => g,
            Generator::RandomFill(g) => g,
            Generator::SingleDirection(g) => g,
        }
    }
}

impl MazeGenerator for Generator {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn state(&self) -> &GeneratorState {
        self.inner().state()
    }

    fn state_mut(&mut self) -> &mut GeneratorState {
        self.inner_mut().state_mut()
    }

    fn on_init(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        self.inner_mut().on_init(maze)
    }

    fn on_step(&mut self, maze: &mut Maze2D) -> Result<(), MazeError> {
        self.inner_mut().on_step(maze)
    }
}
