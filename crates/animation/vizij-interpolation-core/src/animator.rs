//! Animator: drives an [`Interpolator`] across time with a [`FrameClock`].
//!
//! Only one run is active per animator. Starting a run first stops the active
//! one and fires its completion, then subscribes the new run to the clock.
//! Value and completion callbacks run after internal borrows are released, so
//! either may query, stop or restart the animator.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, trace, warn};

use crate::clock::{FrameClock, FrameTick, ManualClock};
use crate::config::FrameTiming;
use crate::interpolator::Interpolator;
use crate::run::AnimationRun;
use crate::timing::TimingFunction;
use crate::{InterpolationError, Result};

struct Shared<T> {
    engine: Interpolator<T>,
    run: Option<AnimationRun>,
    next_run_id: u64,
}

pub struct Animator<T, C: FrameClock = ManualClock> {
    shared: Rc<RefCell<Shared<T>>>,
    clock: Rc<C>,
}

impl<T, C: FrameClock> std::fmt::Debug for Animator<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Animator")
            .field("engine", &shared.engine)
            .field("run", &shared.run)
            .finish()
    }
}

impl<T: 'static, C: FrameClock + 'static> Animator<T, C> {
    pub fn new(engine: Interpolator<T>, clock: C) -> Self {
        Self {
            shared: Rc::new(RefCell::new(Shared {
                engine,
                run: None,
                next_run_id: 0,
            })),
            clock: Rc::new(clock),
        }
    }

    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Borrow the underlying interpolator.
    pub fn engine(&self) -> Ref<'_, Interpolator<T>> {
        Ref::map(self.shared.borrow(), |s| &s.engine)
    }

    pub fn progress(&self) -> f64 {
        self.shared.borrow().engine.progress()
    }

    /// Direct progress write; an active run continues from the new position.
    pub fn set_progress(&self, progress: f64) -> Result<()> {
        let pending = self.shared.borrow_mut().engine.update(progress)?;
        if let Some(delivery) = pending {
            delivery.deliver();
        }
        Ok(())
    }

    pub fn value(&self) -> Result<T> {
        self.shared.borrow().engine.value()
    }

    pub fn invalidate(&self) {
        self.shared.borrow_mut().engine.invalidate();
    }

    pub fn set_callback(&self, callback: impl FnMut(T) + 'static) {
        self.shared.borrow_mut().engine.set_callback(callback);
    }

    pub fn set_timing_function(&self, timing: impl TimingFunction + 'static) {
        self.shared.borrow_mut().engine.set_timing_function(timing);
    }

    pub fn is_running(&self) -> bool {
        self.shared.borrow().run.is_some()
    }

    /// Target progress of the active run.
    pub fn target(&self) -> Option<f64> {
        self.shared.borrow().run.as_ref().map(|r| r.target)
    }

    /// Animate to progress 1.0.
    pub fn play(
        &self,
        duration: f64,
        on_complete: impl FnOnce(Result<()>) + 'static,
    ) -> Result<()> {
        self.animate(1.0, duration, on_complete)
    }

    /// Start a run toward `target` (clamped to `[0, 1]`) over `duration` seconds.
    ///
    /// Any active run is stopped and its completion fires before the new run
    /// begins. On a clock start failure the new run is discarded and the
    /// error returned; `on_complete` is not called.
    pub fn animate(
        &self,
        target: f64,
        duration: f64,
        on_complete: impl FnOnce(Result<()>) + 'static,
    ) -> Result<()> {
        if target.is_nan() {
            return Err(InterpolationError::InvalidProgress { value: target });
        }
        if !duration.is_finite() || duration < 0.0 {
            return Err(InterpolationError::InvalidDuration { duration });
        }
        {
            let shared = self.shared.borrow();
            let config = shared.engine.config();
            let fps = config.assumed_frame_rate;
            if config.frame_timing == FrameTiming::FixedRate && !(fps.is_finite() && fps > 0.0) {
                return Err(InterpolationError::InvalidFrameRate { fps });
            }
        }
        let target = target.clamp(0.0, 1.0);

        finish(&*self.shared, &*self.clock, Ok(()));

        // The old completion may itself have started a run; this call wins.
        let displaced = {
            let mut shared = self.shared.borrow_mut();
            shared.next_run_id += 1;
            let run = AnimationRun::new(
                shared.next_run_id,
                target,
                duration,
                Box::new(on_complete),
            );
            shared.run.replace(run)
        };
        if let Some(displaced) = displaced {
            self.clock.stop();
            debug!(ticks = displaced.ticks, "animation run superseded");
            displaced.complete(Ok(()));
        }

        let shared = Rc::downgrade(&self.shared);
        let clock = Rc::downgrade(&self.clock);
        let started = self
            .clock
            .start(Box::new(move |tick| handle_tick(&shared, &clock, tick)));

        match started {
            Ok(()) => {
                debug!(
                    from = self.progress(),
                    target, duration, "animation run started"
                );
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "frame clock failed to start");
                self.shared.borrow_mut().run = None;
                Err(err.into())
            }
        }
    }

    /// Stop the clock and fire the active run's completion. Idempotent.
    pub fn stop_animation(&self) {
        finish(&*self.shared, &*self.clock, Ok(()));
    }
}

impl<T, C: FrameClock> Drop for Animator<T, C> {
    fn drop(&mut self) {
        finish(&*self.shared, &*self.clock, Ok(()));
    }
}

fn finish<T, C: FrameClock>(shared: &RefCell<Shared<T>>, clock: &C, result: Result<()>) {
    clock.stop();
    let run = shared.borrow_mut().run.take();
    if let Some(run) = run {
        debug!(
            progress = shared.borrow().engine.progress(),
            ticks = run.ticks,
            ok = result.is_ok(),
            "animation run stopped"
        );
        run.complete(result);
    }
}

fn handle_tick<T, C: FrameClock>(
    shared: &Weak<RefCell<Shared<T>>>,
    clock: &Weak<C>,
    tick: FrameTick,
) {
    let (Some(shared), Some(clock)) = (shared.upgrade(), clock.upgrade()) else {
        return;
    };

    let (run_id, reached, pending) = {
        let mut guard = shared.borrow_mut();
        let state = &mut *guard;
        let Some(run) = state.run.as_mut() else {
            return;
        };
        let (next, reached) = run.step(state.engine.progress(), &tick, state.engine.config());
        trace!(timestamp = tick.timestamp, delta = tick.delta, next, "tick");
        (run.id, reached, state.engine.update(next))
    };

    let outcome = match pending {
        Ok(delivery) => {
            if let Some(delivery) = delivery {
                delivery.deliver();
            }
            reached.then_some(Ok(()))
        }
        Err(err) => {
            warn!(error = %err, category = err.category(), "tick failed, stopping run");
            Some(Err(err))
        }
    };

    // The value callback may have stopped this run or started another one.
    let still_active = shared.borrow().run.as_ref().map(|r| r.id) == Some(run_id);
    if let (Some(result), true) = (outcome, still_active) {
        finish(&*shared, &*clock, result);
    }
}
