//! Vizij Interpolation Core (engine-agnostic)
//!
//! Piecewise-linear interpolation across any number of typed keyframes:
//! keyframes are vectorized through [`vizij_api_core::Vectorize`] or a
//! [`vizij_api_core::ConversionTable`], eased by a [`TimingFunction`], and
//! delivered to a callback on every progress change. An [`Animator`] advances
//! progress over time from a host [`FrameClock`].

pub mod animator;
pub mod clock;
pub mod config;
pub mod diff;
pub mod error;
pub mod interpolator;
pub mod run;
pub mod timing;

// Re-exports for consumers (adapters)
pub use animator::Animator;
pub use clock::{FrameClock, FrameTick, ManualClock, TickCallback, DEFAULT_FRAME_INTERVAL};
pub use config::{Config, FrameTiming};
pub use diff::{diff, DiffTable};
pub use error::{ClockError, InterpolationError};
pub use interpolator::{segment_position, Delivery, Interpolator, ValueCallback};
pub use run::CompletionCallback;
pub use timing::{CubicBezier, Linear, Spring, TimingCurve, TimingFunction};
pub use vizij_api_core::{
    Color, ColorModel, Conversion, ConversionError, ConversionTable, Value, ValueKind, Vectorize,
    VectorizedValue,
};

/// Interpolation result type
pub type Result<T> = std::result::Result<T, InterpolationError>;
