//! Turns elapsed time into engine ticks.

use alloc::vec::Vec;
use core::time::Duration;

use crate::engine::{Engine, RoundEvent};

/// Fixed-timestep driver for an [`Engine`].
///
/// Elapsed time is accumulated and spent in whole tick periods. The cadence
/// is chosen per tick from the engine's current phase, so a countdown that
/// finishes halfway through an advance continues with multiplier ticks.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    pending: Duration,
}

impl Scheduler {
    /// Creates a scheduler with no pending time.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pending: Duration::ZERO,
        }
    }

    /// Returns the accumulated time not yet spent on a tick.
    #[must_use]
    pub const fn pending(&self) -> Duration {
        self.pending
    }

    /// Advances the engine by `elapsed` and returns the events produced.
    ///
    /// At most [`EngineOptions::max_catch_up_ticks`](crate::EngineOptions)
    /// ticks are applied per call; any backlog beyond that is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    ///
    /// use crashrs::{Engine, EngineOptions, RoundPhase, Scheduler};
    ///
    /// let engine = Engine::new(EngineOptions::default(), 3).unwrap();
    /// let mut scheduler = Scheduler::new();
    ///
    /// scheduler.advance(&engine, Duration::from_secs(10));
    /// assert_eq!(engine.phase(), RoundPhase::Playing);
    /// ```
    pub fn advance(&mut self, engine: &Engine, elapsed: Duration) -> Vec<RoundEvent> {
        self.pending = self.pending.saturating_add(elapsed);

        let options = engine.options();
        let mut events = Vec::new();
        let mut ticks = 0_u32;

        while let Some(cadence) = engine.phase().cadence() {
            let period = cadence.period(options);
            if self.pending < period {
                break;
            }
            if ticks >= options.max_catch_up_ticks {
                log::warn!(
                    "scheduler fell behind, dropping {:?} of pending time",
                    self.pending
                );
                self.pending = Duration::ZERO;
                break;
            }

            self.pending -= period;
            events.extend(engine.tick(cadence));
            ticks += 1;
        }

        events
    }

    /// Drives the engine in real time on the calling thread until `stop` is
    /// set, passing every non-empty batch of events to `on_events`.
    ///
    /// Other threads can keep calling stake and cash-out methods on the same
    /// engine while this runs.
    #[cfg(feature = "std")]
    pub fn run_until<F>(&mut self, engine: &Engine, stop: &core::sync::atomic::AtomicBool, mut on_events: F)
    where
        F: FnMut(Vec<RoundEvent>),
    {
        use core::sync::atomic::Ordering;
        use std::time::Instant;

        let options = engine.options();
        let sleep = options.countdown_period.min(options.multiplier_period);
        let mut last = Instant::now();

        while !stop.load(Ordering::Acquire) {
            std::thread::sleep(sleep);

            let now = Instant::now();
            let events = self.advance(engine, now.duration_since(last));
            last = now;

            if !events.is_empty() {
                on_events(events);
            }
        }
    }
}
