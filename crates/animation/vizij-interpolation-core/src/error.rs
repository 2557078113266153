//! Error types for interpolation and timed runs.

use thiserror::Error;
use vizij_api_core::{ConversionError, ValueKind};

/// Failure reported by a [`crate::FrameClock`] implementation.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ClockError {
    #[error("frame clock failed to start: {reason}")]
    StartFailed { reason: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum InterpolationError {
    /// Fewer than two keyframes were supplied.
    #[error("at least 2 keyframes are required, got {count}")]
    InsufficientKeyframes { count: usize },

    /// A keyframe's kind differs from the first keyframe's kind.
    #[error("keyframe {index} is {actual}, expected {expected}")]
    HeterogeneousKeyframes {
        index: usize,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// A vectorized sequence handed to the diff calculator is malformed.
    #[error("invalid keyframe sequence: {reason}")]
    InvalidKeyframeSequence { reason: String },

    #[error("progress must be a number, got {value}")]
    InvalidProgress { value: f64 },

    #[error("duration must be finite and non-negative, got {duration}")]
    InvalidDuration { duration: f64 },

    #[error("assumed frame rate must be positive, got {fps}")]
    InvalidFrameRate { fps: f64 },

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Clock(#[from] ClockError),
}

impl InterpolationError {
    /// Get error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InsufficientKeyframes { .. }
            | Self::HeterogeneousKeyframes { .. }
            | Self::InvalidKeyframeSequence { .. } => "construction",
            Self::InvalidProgress { .. }
            | Self::InvalidDuration { .. }
            | Self::InvalidFrameRate { .. } => "input",
            Self::Conversion(_) => "conversion",
            Self::Clock(_) => "clock",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories() {
        assert_eq!(
            InterpolationError::InsufficientKeyframes { count: 1 }.category(),
            "construction"
        );
        assert_eq!(
            InterpolationError::InvalidDuration { duration: -1.0 }.category(),
            "input"
        );
        let conv: InterpolationError = ConversionError::UnsupportedType { type_name: "X" }.into();
        assert_eq!(conv.category(), "conversion");
        let clock: InterpolationError = ClockError::StartFailed {
            reason: "no display".into(),
        }
        .into();
        assert_eq!(clock.category(), "clock");
    }

    #[test]
    fn messages_name_the_problem() {
        let err = InterpolationError::HeterogeneousKeyframes {
            index: 2,
            expected: ValueKind::ColorRgba,
            actual: ValueKind::ColorHsba,
        };
        assert_eq!(
            err.to_string(),
            "keyframe 2 is color-hsba[4], expected color-rgba[4]"
        );
    }
}
