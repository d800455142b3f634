//! The live round: countdown, multiplier growth, and crash-point draws.

use alloc::collections::VecDeque;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::options::EngineOptions;

use super::RoundPhase;

/// Multiplier at launch.
pub const START_MULTIPLIER: f64 = 1.0;

/// Base multiplier increment per tick, before acceleration.
const MULTIPLIER_STEP: f64 = 0.01;

#[cfg(feature = "std")]
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub(crate) fn round_cents(value: f64) -> f64 {
    libm::round(value * 100.0) / 100.0
}

/// Returns whether `value` is a whole number of cents.
pub(crate) fn is_whole_cents(value: f64) -> bool {
    (round_cents(value) - value).abs() < 1e-9
}

/// Draws a crash point uniformly from `[min, max]`, rounded to two decimals.
pub(crate) fn draw_crash_point(rng: &mut ChaCha8Rng, min: f64, max: f64) -> f64 {
    if max <= min {
        return min;
    }
    let raw = rng.random_range(min..=max);
    round_cents(raw).clamp(min, max)
}

/// Next multiplier value. The increment scales with the current value so
/// growth accelerates.
pub(crate) fn next_multiplier(multiplier: f64) -> f64 {
    round_cents(multiplier + MULTIPLIER_STEP * (1.0 + multiplier / 10.0))
}

/// State of the singleton round owned by an engine.
#[derive(Debug, Clone)]
pub(crate) struct Round {
    pub phase: RoundPhase,
    pub countdown: f64,
    pub multiplier: f64,
    /// Hidden from lanes until reached.
    pub crash_point: f64,
    pub round_index: u64,
    /// Most recent first.
    pub crash_history: VecDeque<f64>,
}

impl Round {
    pub(crate) fn new(options: &EngineOptions, rng: &mut ChaCha8Rng) -> Self {
        Self {
            phase: RoundPhase::Waiting,
            countdown: options.countdown_seconds,
            multiplier: START_MULTIPLIER,
            crash_point: draw_crash_point(rng, options.crash_point_min, options.crash_point_max),
            round_index: 0,
            crash_history: VecDeque::new(),
        }
    }

    /// Applies one countdown step. Returns `true` once the countdown is over.
    pub(crate) fn countdown_tick(&mut self, step: f64) -> bool {
        self.countdown = round_cents(self.countdown - step).max(0.0);
        self.countdown <= 0.0
    }

    pub(crate) const fn launch(&mut self) {
        self.phase = RoundPhase::Playing;
        self.multiplier = START_MULTIPLIER;
        self.countdown = 0.0;
    }

    /// Applies one multiplier step. Returns `true` if the crash point was
    /// reached.
    pub(crate) fn multiplier_tick(&mut self) -> bool {
        self.multiplier = next_multiplier(self.multiplier);
        self.multiplier >= self.crash_point
    }

    /// Freezes the multiplier at the crash point and closes the round.
    pub(crate) fn crash(&mut self, history_capacity: usize) {
        self.phase = RoundPhase::Crashed;
        self.multiplier = self.crash_point;
        self.crash_history.push_front(self.crash_point);
        self.crash_history.truncate(history_capacity);
        self.round_index += 1;
    }

    /// Starts the next countdown with a freshly drawn crash point.
    pub(crate) fn reset(&mut self, options: &EngineOptions, rng: &mut ChaCha8Rng) {
        self.phase = RoundPhase::Waiting;
        self.countdown = options.countdown_seconds;
        self.multiplier = START_MULTIPLIER;
        self.crash_point =
            draw_crash_point(rng, options.crash_point_min, options.crash_point_max);
    }
}
