//! Time sources and countdown bookkeeping for animated spins.
//!
//! Nothing here spawns threads or timers. A host pumps [`Countdown::poll`] (usually through
//! `Wheel::poll`) from whatever loop it already runs, and the countdown reports which ticks have
//! come due since the last poll.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Monotonic time, as an offset from an arbitrary origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A simulated clock. Clones share the same time, so a test can keep one handle and give another
/// to the wheel.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }

    pub fn set(&self, now: Duration) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Tick { remaining: Duration },
    Finish,
}

/// Fires a tick every `interval` until `duration` has elapsed, then finishes once.
///
/// The first tick is due the moment the countdown starts. Ticks missed by a late poll are all
/// delivered, in order, by the next one.
#[derive(Debug, Clone)]
pub struct Countdown {
    duration: Duration,
    interval: Duration,
    started_at: Option<Duration>,
    ticks_fired: u32,
    done: bool,
}

impl Countdown {
    pub fn new(duration: Duration, interval: Duration) -> Self {
        Self {
            duration,
            interval: interval.max(MIN_INTERVAL),
            started_at: None,
            ticks_fired: 0,
            done: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && !self.done
    }

    pub fn start(&mut self, now: Duration) {
        self.started_at = Some(now);
        self.ticks_fired = 0;
        self.done = false;
    }

    pub fn cancel(&mut self) {
        self.done = true;
    }

    pub fn poll(&mut self, now: Duration) -> Vec<CountdownEvent> {
        let Some(started_at) = self.started_at else {
            return Vec::new();
        };
        if self.done {
            return Vec::new();
        }

        let elapsed = now.saturating_sub(started_at);
        let mut events = Vec::new();

        while let Some(due) = self.interval.checked_mul(self.ticks_fired) {
            if due >= self.duration || due > elapsed {
                break;
            }
            events.push(CountdownEvent::Tick {
                remaining: self.duration - due,
            });
            self.ticks_fired += 1;
        }

        if elapsed >= self.duration {
            self.done = true;
            events.push(CountdownEvent::Finish);
        }

        events
    }
}
