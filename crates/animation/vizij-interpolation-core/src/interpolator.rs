//! Interpolator: keyframe ownership, progress state and value delivery.
//!
//! Keyframes are vectorized once at construction and a diff table is built
//! from them. Every progress write recomputes the `current` vector in place:
//!
//! 1. clamp raw progress to `[0, 1]`
//! 2. eased = timing(raw)
//! 3. `v = eased * (n - 1)`, segment `i = max(0, ceil(v) - 1)` (capped at `n - 2`)
//! 4. `current[j] = keyframes[i][j] + diffs[i][j] * (v - i)`
//!
//! and hands the devectorized value to the callback, if one is attached.
//!
//! Computing and delivering are separate steps so a driver holding the
//! interpolator behind a `RefCell` can release its borrow before the
//! callback runs.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace, warn};
use vizij_api_core::{Conversion, ValueKind, Vectorize, VectorizedValue};

use crate::config::Config;
use crate::diff::{diff, DiffTable};
use crate::timing::TimingFunction;
use crate::{InterpolationError, Result};

pub type ValueCallback<T> = Box<dyn FnMut(T)>;

type SharedCallback<T> = Rc<RefCell<ValueCallback<T>>>;

fn share<T>(callback: impl FnMut(T) + 'static) -> SharedCallback<T> {
    let boxed: ValueCallback<T> = Box::new(callback);
    Rc::new(RefCell::new(boxed))
}

/// A devectorized value waiting to be handed to its callback.
///
/// Produced while the interpolator is borrowed, delivered after the borrow
/// ends.
#[must_use = "a pending delivery does nothing until delivered"]
pub struct Delivery<T> {
    callback: SharedCallback<T>,
    value: T,
}

impl<T> Delivery<T> {
    /// Invoke the callback. A callback that is already running (re-entered
    /// through its own interpolator) drops this value instead.
    pub fn deliver(self) {
        match self.callback.try_borrow_mut() {
            Ok(mut callback) => (&mut **callback)(self.value),
            Err(_) => warn!("value callback re-entered, skipping nested delivery"),
        }
    }
}

/// Segment index and local fraction for eased progress over `segments` segments.
///
/// A keyframe boundary resolves to the end of the preceding segment. Eased
/// progress outside `[0, 1]` extrapolates along the first or last segment.
#[inline]
pub fn segment_position(eased: f64, segments: usize) -> (usize, f64) {
    let last = segments.saturating_sub(1);
    let v = eased * segments as f64;
    let index = (v.ceil() - 1.0).max(0.0).min(last as f64) as usize;
    (index, v - index as f64)
}

pub struct Interpolator<T> {
    progress: f64,
    eased: f64,
    keyframes: Vec<VectorizedValue>,
    diffs: DiffTable,
    timing: Box<dyn TimingFunction>,
    current: VectorizedValue,
    conversion: Conversion<T>,
    callback: Option<SharedCallback<T>>,
    config: Config,
}

impl<T> fmt::Debug for Interpolator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interpolator")
            .field("progress", &self.progress)
            .field("eased", &self.eased)
            .field("kind", self.current.kind())
            .field("keyframes", &self.keyframes.len())
            .field("invalidated", &self.callback.is_none())
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Vectorize> Interpolator<T> {
    /// Build from two or more keyframes using the type's [`Vectorize`] impl.
    pub fn new(
        keyframes: &[T],
        timing: impl TimingFunction + 'static,
        callback: impl FnMut(T) + 'static,
    ) -> Result<Self> {
        Self::with_conversion(Conversion::of(), keyframes, timing, callback)
    }

    /// Build a two-keyframe interpolator.
    pub fn between(
        from: T,
        to: T,
        timing: impl TimingFunction + 'static,
        callback: impl FnMut(T) + 'static,
    ) -> Result<Self> {
        Self::new(&[from, to], timing, callback)
    }
}

impl<T> Interpolator<T> {
    /// Build with an explicit conversion, e.g. one looked up in a
    /// [`vizij_api_core::ConversionTable`].
    pub fn with_conversion(
        conversion: Conversion<T>,
        keyframes: &[T],
        timing: impl TimingFunction + 'static,
        callback: impl FnMut(T) + 'static,
    ) -> Result<Self> {
        if keyframes.len() < 2 {
            return Err(InterpolationError::InsufficientKeyframes {
                count: keyframes.len(),
            });
        }

        let vectorized = keyframes
            .iter()
            .map(|k| conversion.vectorize(k))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let expected = vectorized[0].kind();
        if let Some((index, odd)) = vectorized
            .iter()
            .enumerate()
            .find(|(_, v)| v.kind() != expected)
        {
            return Err(InterpolationError::HeterogeneousKeyframes {
                index,
                expected: expected.clone(),
                actual: odd.kind().clone(),
            });
        }

        let diffs = diff(&vectorized)?;
        let current = vectorized[0].clone();
        debug!(
            kind = %current.kind(),
            keyframes = vectorized.len(),
            "interpolator created"
        );

        Ok(Self {
            progress: 0.0,
            eased: 0.0,
            keyframes: vectorized,
            diffs,
            timing: Box::new(timing),
            current,
            conversion,
            callback: Some(share(callback)),
            config: Config::default(),
        })
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Raw progress in `[0, 1]`.
    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Progress after the timing function, as used for the last update.
    #[inline]
    pub fn eased_progress(&self) -> f64 {
        self.eased
    }

    /// Set raw progress, recompute the current value and deliver it.
    pub fn set_progress(&mut self, progress: f64) -> Result<()> {
        if let Some(delivery) = self.update(progress)? {
            delivery.deliver();
        }
        Ok(())
    }

    /// Re-deliver the value at the current progress.
    pub fn refresh(&mut self) -> Result<()> {
        self.set_progress(self.progress)
    }

    /// Set raw progress and recompute the current value, returning the
    /// value for the callback instead of invoking it.
    ///
    /// Returns `None` when no callback is attached.
    pub fn update(&mut self, progress: f64) -> Result<Option<Delivery<T>>> {
        if progress.is_nan() {
            return Err(InterpolationError::InvalidProgress { value: progress });
        }
        let progress = progress.clamp(0.0, 1.0);
        let eased = self.timing.apply(progress);
        if !eased.is_finite() {
            return Err(InterpolationError::InvalidProgress { value: eased });
        }
        self.progress = progress;
        self.eased = eased;

        let (index, t) = segment_position(eased, self.diffs.len());
        let base = self.keyframes[index].components();
        let delta = self.diffs.row(index);
        for ((out, b), d) in self
            .current
            .components_mut()
            .iter_mut()
            .zip(base)
            .zip(delta)
        {
            *out = b + d * t;
        }
        trace!(progress, eased, segment = index, local = t, "progress updated");

        let Some(callback) = self.callback.as_ref() else {
            return Ok(None);
        };
        let value = self.conversion.devectorize(&self.current)?;
        Ok(Some(Delivery {
            callback: Rc::clone(callback),
            value,
        }))
    }

    /// The interpolated vector for the current progress.
    #[inline]
    pub fn current(&self) -> &VectorizedValue {
        &self.current
    }

    /// The current value, devectorized.
    pub fn value(&self) -> Result<T> {
        Ok(self.conversion.devectorize(&self.current)?)
    }

    #[inline]
    pub fn keyframes(&self) -> &[VectorizedValue] {
        &self.keyframes
    }

    #[inline]
    pub fn keyframe_count(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn diffs(&self) -> &DiffTable {
        &self.diffs
    }

    #[inline]
    pub fn kind(&self) -> &ValueKind {
        self.current.kind()
    }

    /// Stop delivering values. Progress updates keep computing `current`.
    pub fn invalidate(&mut self) {
        if self.callback.take().is_some() {
            debug!(progress = self.progress, "interpolator invalidated");
        }
    }

    #[inline]
    pub fn is_invalidated(&self) -> bool {
        self.callback.is_none()
    }

    /// Attach (or replace) the value callback.
    pub fn set_callback(&mut self, callback: impl FnMut(T) + 'static) {
        self.callback = Some(share(callback));
    }

    /// Replace the timing function; takes effect on the next progress write.
    pub fn set_timing_function(&mut self, timing: impl TimingFunction + 'static) {
        self.timing = Box::new(timing);
    }
}
