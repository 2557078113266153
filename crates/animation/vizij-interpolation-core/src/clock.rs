//! Frame clock capability.
//!
//! A [`FrameClock`] invokes one subscriber per display refresh. Platform
//! clocks (compositor refresh signals, `requestAnimationFrame`, game loops)
//! implement the trait outside this crate; [`ManualClock`] is driven by the
//! host calling [`ManualClock::advance`].

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::ClockError;

/// Per-tick metadata, in seconds on the clock's own timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTick {
    /// Time of this tick.
    pub timestamp: f64,
    /// Expected time of the next tick.
    pub target_timestamp: f64,
    /// Time since the previous tick.
    pub delta: f64,
}

pub type TickCallback = Box<dyn FnMut(FrameTick)>;

/// Methods take `&self`: a subscriber may stop or restart the clock from
/// inside its own tick, so implementations keep their state behind interior
/// mutability.
pub trait FrameClock {
    /// Subscribe `on_tick`, replacing any existing subscription.
    fn start(&self, on_tick: TickCallback) -> Result<(), ClockError>;

    /// Drop the subscription. Safe to call when not started.
    fn stop(&self);

    fn is_running(&self) -> bool;
}

pub const DEFAULT_FRAME_INTERVAL: f64 = 1.0 / 60.0;

struct ManualClockState {
    subscriber: Option<TickCallback>,
    running: bool,
    generation: u64,
    timestamp: f64,
    frame_interval: f64,
}

/// Host-driven frame clock. Clones share one timeline and subscription.
#[derive(Clone)]
pub struct ManualClock {
    state: Rc<RefCell<ManualClockState>>,
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("ManualClock")
            .field("running", &state.running)
            .field("timestamp", &state.timestamp)
            .field("frame_interval", &state.frame_interval)
            .finish()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Clock with a nominal 60 Hz frame interval.
    pub fn new() -> Self {
        Self::with_frame_interval(DEFAULT_FRAME_INTERVAL)
    }

    pub fn with_frame_interval(frame_interval: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(ManualClockState {
                subscriber: None,
                running: false,
                generation: 0,
                timestamp: 0.0,
                frame_interval: frame_interval.max(0.0),
            })),
        }
    }

    pub fn timestamp(&self) -> f64 {
        self.state.borrow().timestamp
    }

    pub fn frame_interval(&self) -> f64 {
        self.state.borrow().frame_interval
    }

    /// Move the timeline forward by `delta` seconds and tick the subscriber.
    ///
    /// Returns whether a subscriber was ticked. The subscriber may stop or
    /// restart the clock from inside the tick.
    pub fn advance(&self, delta: f64) -> bool {
        let (generation, mut callback, tick) = {
            let mut state = self.state.borrow_mut();
            let delta = delta.max(0.0);
            state.timestamp += delta;
            let Some(callback) = state.subscriber.take() else {
                return false;
            };
            let tick = FrameTick {
                timestamp: state.timestamp,
                target_timestamp: state.timestamp + state.frame_interval,
                delta,
            };
            (state.generation, callback, tick)
        };

        callback(tick);

        let mut state = self.state.borrow_mut();
        if state.generation == generation && state.running {
            state.subscriber = Some(callback);
        }
        true
    }

    /// Advance by one frame interval.
    pub fn tick(&self) -> bool {
        let interval = self.frame_interval();
        self.advance(interval)
    }

    /// Tick at most `max_frames` frames, stopping early once nothing is
    /// subscribed. Returns the number of ticks delivered.
    pub fn run_frames(&self, max_frames: usize) -> usize {
        let mut delivered = 0;
        while delivered < max_frames && self.is_running() {
            if !self.tick() {
                break;
            }
            delivered += 1;
        }
        delivered
    }
}

impl FrameClock for ManualClock {
    fn start(&self, on_tick: TickCallback) -> Result<(), ClockError> {
        let mut state = self.state.borrow_mut();
        state.generation = state.generation.wrapping_add(1);
        state.subscriber = Some(on_tick);
        state.running = true;
        Ok(())
    }

    fn stop(&self) {
        let mut state = self.state.borrow_mut();
        state.generation = state.generation.wrapping_add(1);
        state.subscriber = None;
        state.running = false;
    }

    fn is_running(&self) -> bool {
        self.state.borrow().running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn ticks_carry_delta_and_timestamp() {
        let clock = ManualClock::with_frame_interval(0.5);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        clock
            .start(Box::new(move |tick| sink.borrow_mut().push(tick)))
            .unwrap();
        assert!(clock.tick());
        assert!(clock.advance(0.25));
        let seen = seen.borrow();
        assert_eq!(
            seen[0],
            FrameTick {
                timestamp: 0.5,
                target_timestamp: 1.0,
                delta: 0.5
            }
        );
        assert_eq!(seen[1].timestamp, 0.75);
        assert_eq!(seen[1].delta, 0.25);
    }

    #[test]
    fn stop_is_idempotent_and_safe_before_start() {
        let clock = ManualClock::new();
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        assert!(!clock.tick());
        assert!(clock.timestamp() > 0.0);
    }

    #[test]
    fn start_replaces_previous_subscriber() {
        let clock = ManualClock::new();
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let f = Rc::clone(&first);
        clock.start(Box::new(move |_| f.set(f.get() + 1))).unwrap();
        clock.tick();
        let s = Rc::clone(&second);
        clock.start(Box::new(move |_| s.set(s.get() + 1))).unwrap();
        clock.tick();
        clock.tick();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn subscriber_can_stop_the_clock_mid_tick() {
        let clock = ManualClock::new();
        let count = Rc::new(Cell::new(0));
        let handle = clock.clone();
        let c = Rc::clone(&count);
        clock
            .start(Box::new(move |_| {
                c.set(c.get() + 1);
                if c.get() == 3 {
                    handle.stop();
                }
            }))
            .unwrap();
        assert_eq!(clock.run_frames(10), 3);
        assert_eq!(count.get(), 3);
        assert!(!clock.is_running());
    }
}
