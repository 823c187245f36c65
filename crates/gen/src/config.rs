use std::fmt;
use std::path::Path;
use std::str::FromStr;

use mazeworks_common::Cardinal;
use mazeworks_kernel::{Maze2D, MazeError};
use serde::{Deserialize, Serialize};

use crate::generator::Generator;
use crate::rng::SeedMode;

/// Errors from loading or validating a [`GeneratorConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid maze dimensions {rows}x{cols}: both must be positive")]
    InvalidDimension { rows: i32, cols: i32 },
    #[error("steps_per_frame must be at least 1")]
    ZeroStepsPerFrame,
    #[error("unknown algorithm '{0}'")]
    UnknownAlgorithm(String),
    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// Selectable generation algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    RecursiveBacktrack,
    RandomHuntAndKill,
    StandardHuntAndKill,
    RandomFill,
    SingleDirection,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::RecursiveBacktrack,
        Algorithm::RandomHuntAndKill,
        Algorithm::StandardHuntAndKill,
        Algorithm::RandomFill,
        Algorithm::SingleDirection,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::RecursiveBacktrack => "recursive-backtrack",
            Algorithm::RandomHuntAndKill => "random-hunt-and-kill",
            Algorithm::StandardHuntAndKill => "standard-hunt-and-kill",
            Algorithm::RandomFill => "random-fill",
            Algorithm::SingleDirection => "single-direction",
        }
    }

    /// Whether a completed run is guaranteed to be a spanning tree.
    pub fn is_perfect(self) -> bool {
        matches!(
            self,
            Algorithm::RecursiveBacktrack
                | Algorithm::RandomHuntAndKill
                | Algorithm::StandardHuntAndKill
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownAlgorithm(s.to_string()))
    }
}

/// Everything needed to set up one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rows: i32,
    pub cols: i32,
    pub algorithm: Algorithm,
    /// Corridor direction; only read by [`Algorithm::SingleDirection`].
    pub direction: Cardinal,
    pub seed: SeedMode,
    pub steps_per_frame: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            algorithm: Algorithm::default(),
            direction: Cardinal::East,
            seed: SeedMode::default(),
            steps_per_frame: 1,
        }
    }
}

impl GeneratorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config: GeneratorConfig = serde_json::from_reader(std::fs::File::open(path)?)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), ?config, "loaded generator config");
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows <= 0 || self.cols <= 0 {
            return Err(ConfigError::InvalidDimension {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.steps_per_frame == 0 {
            return Err(ConfigError::ZeroStepsPerFrame);
        }
        Ok(())
    }

    pub fn build_maze(&self) -> Result<Maze2D, ConfigError> {
        self.validate()?;
        Ok(Maze2D::new(self.rows, self.cols)?)
    }

    pub fn build_generator(&self) -> Generator {
        Generator::from_config(self)
    }
}
