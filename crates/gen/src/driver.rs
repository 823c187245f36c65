//! Frame-paced host loop for stepping a generator.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use mazeworks_kernel::{Maze2D, MazeError};

use crate::generator::MazeGenerator;

/// Pacing for a [`GenerationDriver`].
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Generator steps per frame. Zero is treated as one.
    pub steps_per_frame: usize,
    /// Stop `run_to_completion` after this many frames, complete or not.
    pub max_frames: Option<usize>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            steps_per_frame: 1,
            max_frames: None,
        }
    }
}

/// Counters from the most recent frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub frame: usize,
    pub steps_this_frame: usize,
    pub total_steps: usize,
    pub complete: bool,
    pub frame_time: Duration,
}

/// Rolling window of recent frame durations.
#[derive(Debug)]
pub struct FrameTimer {
    window: VecDeque<Duration>,
    capacity: usize,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(dt);
    }

    pub fn average(&self) -> Duration {
        if self.window.is_empty() {
            return Duration::ZERO;
        }
        self.window.iter().sum::<Duration>() / self.window.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.window.iter().copied().max().unwrap_or_default()
    }

    pub fn min(&self) -> Duration {
        self.window.iter().copied().min().unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.window.len()
    }
}

/// Calls `step` on a generator a fixed number of times per frame.
///
/// Holds no reference to the maze or generator between frames, so the host
/// can render from `&Maze2D` after each `run_frame`.
#[derive(Debug)]
pub struct GenerationDriver {
    config: DriverConfig,
    stats: FrameStats,
    timer: FrameTimer,
}

impl GenerationDriver {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            config,
            stats: FrameStats::default(),
            timer: FrameTimer::new(120),
        }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    /// Run one frame. Stops early if the generator completes mid-frame.
    pub fn run_frame(
        &mut self,
        generator: &mut impl MazeGenerator,
        maze: &mut Maze2D,
    ) -> Result<&FrameStats, MazeError> {
        let _span = tracing::info_span!("generation_frame", frame = self.stats.frame).entered();
        let start = Instant::now();

        let mut steps = 0;
        while steps < self.config.steps_per_frame.max(1) && !generator.is_complete() {
            generator.step(maze)?;
            steps += 1;
        }

        let frame_time = start.elapsed();
        self.timer.record(frame_time);
        self.stats = FrameStats {
            frame: self.stats.frame + 1,
            steps_this_frame: steps,
            total_steps: self.stats.total_steps + steps,
            complete: generator.is_complete(),
            frame_time,
        };
        tracing::trace!(
            steps,
            total = self.stats.total_steps,
            complete = self.stats.complete,
            "frame done"
        );
        Ok(&self.stats)
    }

    /// Run frames until the generator completes or `max_frames` is reached.
    /// Returns the number of frames run by this call.
    pub fn run_to_completion(
        &mut self,
        generator: &mut impl MazeGenerator,
        maze: &mut Maze2D,
    ) -> Result<usize, MazeError> {
        let mut frames = 0;
        while !generator.is_complete() {
            if self.config.max_frames.is_some_and(|max| frames >= max) {
                tracing::info!(frames, "frame limit reached before completion");
                return Ok(frames);
            }
            self.run_frame(generator, maze)?;
            frames += 1;
        }
        tracing::info!(
            generator = generator.name(),
            frames,
            steps = self.stats.total_steps,
            avg_frame_us = self.timer.average().as_micros() as u64,
            "generation finished"
        );
        Ok(frames)
    }
}
