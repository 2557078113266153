//! Timed run state and per-tick stepping.

use std::fmt;

use crate::clock::FrameTick;
use crate::config::{Config, FrameTiming};
use crate::InterpolationError;

/// Called once when a run ends: `Ok(())` when it reached its target or was
/// stopped, `Err` when a tick failed.
pub type CompletionCallback = Box<dyn FnOnce(Result<(), InterpolationError>)>;

pub(crate) struct AnimationRun {
    pub id: u64,
    pub target: f64,
    pub duration: f64,
    pub ticks: u64,
    on_complete: Option<CompletionCallback>,
}

impl fmt::Debug for AnimationRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRun")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("duration", &self.duration)
            .field("ticks", &self.ticks)
            .finish()
    }
}

impl AnimationRun {
    pub fn new(id: u64, target: f64, duration: f64, on_complete: CompletionCallback) -> Self {
        Self {
            id,
            target,
            duration,
            ticks: 0,
            on_complete: Some(on_complete),
        }
    }

    /// Next raw progress for this tick and whether the target was reached.
    /// A reached target is returned exactly.
    pub fn step(&mut self, progress: f64, tick: &FrameTick, config: &Config) -> (f64, bool) {
        self.ticks += 1;
        let direction = if self.target > progress { 1.0 } else { -1.0 };
        let increment = if self.duration <= 0.0 {
            f64::INFINITY
        } else {
            match config.frame_timing {
                FrameTiming::Elapsed => tick.delta / self.duration,
                FrameTiming::FixedRate => 1.0 / (self.duration * config.assumed_frame_rate),
            }
        };
        let next = progress + direction * increment;
        let reached = if direction > 0.0 {
            next >= self.target
        } else {
            next <= self.target
        };
        if reached {
            (self.target, true)
        } else {
            (next, false)
        }
    }

    pub fn complete(mut self, result: Result<(), InterpolationError>) {
        if let Some(done) = self.on_complete.take() {
            done(result);
        }
    }
}
