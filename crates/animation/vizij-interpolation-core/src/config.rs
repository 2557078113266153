//! Core configuration for vizij-interpolation-core.

use serde::{Deserialize, Serialize};

/// How a timed run converts clock ticks into progress steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameTiming {
    /// Step by the tick's measured delta: `delta / duration`.
    #[default]
    Elapsed,
    /// Step by a fixed amount per tick: `1 / (duration * assumed_frame_rate)`.
    /// Wall-clock duration is only accurate when the clock really ticks at
    /// `assumed_frame_rate`.
    FixedRate,
}

/// Configuration for interpolators and timed runs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub frame_timing: FrameTiming,
    /// Ticks per second assumed by [`FrameTiming::FixedRate`].
    pub assumed_frame_rate: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_timing: FrameTiming::Elapsed,
            assumed_frame_rate: 60.0,
        }
    }
}

impl Config {
    /// Legacy fixed-rate stepping at `fps` ticks per second.
    pub fn fixed_rate(fps: f64) -> Self {
        Self {
            frame_timing: FrameTiming::FixedRate,
            assumed_frame_rate: fps,
        }
    }
}
