//! Engine configuration options.

use core::time::Duration;

use crate::engine::is_whole_cents;
use crate::error::ConfigError;

/// Lowest accepted auto cash-out target.
pub const MIN_AUTO_CASHOUT_TARGET: f64 = 1.01;

/// Engine-wide automatic cash-out settings, shared by both panels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AutoCashoutPolicy {
    /// Whether automatic cash-out is enabled.
    pub enabled: bool,
    /// Multiplier at which active lanes are cashed out.
    pub target_multiplier: f64,
}

impl AutoCashoutPolicy {
    /// Creates a policy, raising the target to [`MIN_AUTO_CASHOUT_TARGET`] if
    /// it is lower or not a number.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::AutoCashoutPolicy;
    ///
    /// let policy = AutoCashoutPolicy::new(true, 0.5);
    /// assert_eq!(policy.target_multiplier, 1.01);
    /// ```
    #[must_use]
    pub fn new(enabled: bool, target_multiplier: f64) -> Self {
        let target_multiplier = if target_multiplier >= MIN_AUTO_CASHOUT_TARGET {
            target_multiplier
        } else {
            MIN_AUTO_CASHOUT_TARGET
        };
        Self {
            enabled,
            target_multiplier,
        }
    }

    /// Returns whether the policy fires at `multiplier`.
    #[must_use]
    pub fn triggers_at(&self, multiplier: f64) -> bool {
        self.enabled && multiplier >= self.target_multiplier
    }
}

impl Default for AutoCashoutPolicy {
    fn default() -> Self {
        Self {
            enabled: false,
            target_multiplier: 2.0,
        }
    }
}

/// Configuration options for a crash engine.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use core::time::Duration;
///
/// use crashrs::EngineOptions;
///
/// let options = EngineOptions::default()
///     .with_countdown_seconds(5.0)
///     .with_crash_point_range(1.5, 20.0)
///     .with_multiplier_period(Duration::from_millis(50));
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineOptions {
    /// Countdown length in seconds at the start of each round.
    pub countdown_seconds: f64,
    /// Amount subtracted from the countdown per countdown tick.
    pub countdown_step: f64,
    /// Wall-clock period of a countdown tick.
    pub countdown_period: Duration,
    /// Wall-clock period of a multiplier tick.
    pub multiplier_period: Duration,
    /// Lowest possible crash point (inclusive).
    pub crash_point_min: f64,
    /// Highest possible crash point (inclusive).
    pub crash_point_max: f64,
    /// Number of settled bets retained in the history log.
    pub history_capacity: usize,
    /// Number of past crash points retained.
    pub crash_history_capacity: usize,
    /// Maximum number of ticks a scheduler applies per advance before it
    /// drops the remaining backlog.
    pub max_catch_up_ticks: u32,
    /// Auto cash-out policy the engine starts with.
    pub auto_cashout: AutoCashoutPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            countdown_seconds: 10.0,
            countdown_step: 0.01,
            countdown_period: Duration::from_millis(10),
            multiplier_period: Duration::from_millis(100),
            crash_point_min: 1.10,
            crash_point_max: 10.0,
            history_capacity: 20,
            crash_history_capacity: 10,
            max_catch_up_ticks: 10_000,
            auto_cashout: AutoCashoutPolicy {
                enabled: false,
                target_multiplier: 2.0,
            },
        }
    }
}

impl EngineOptions {
    /// Checks that the options describe a runnable engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the crash range is inverted, below 1.0 or not in
    /// whole cents, the countdown or its step is not a positive whole number
    /// of cents, a tick period is zero, or a capacity or the catch-up cap is
    /// zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // NaN fails both comparisons.
        if !(self.crash_point_min >= 1.0 && self.crash_point_min <= self.crash_point_max)
            || !self.crash_point_max.is_finite()
            || !is_whole_cents(self.crash_point_min)
            || !is_whole_cents(self.crash_point_max)
        {
            return Err(ConfigError::InvalidCrashRange);
        }
        // The countdown is kept at two decimals, so it and its step must be
        // whole cents.
        if !(self.countdown_seconds > 0.0 && self.countdown_step >= 0.01)
            || !self.countdown_seconds.is_finite()
            || !is_whole_cents(self.countdown_seconds)
            || !is_whole_cents(self.countdown_step)
        {
            return Err(ConfigError::InvalidCountdown);
        }
        if self.countdown_period.is_zero() || self.multiplier_period.is_zero() {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if self.history_capacity == 0
            || self.crash_history_capacity == 0
            || self.max_catch_up_ticks == 0
        {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }

    /// Sets the countdown length in seconds.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_countdown_seconds(3.0);
    /// assert_eq!(options.countdown_seconds, 3.0);
    /// ```
    #[must_use]
    pub const fn with_countdown_seconds(mut self, seconds: f64) -> Self {
        self.countdown_seconds = seconds;
        self
    }

    /// Sets the amount subtracted per countdown tick.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_countdown_step(0.1);
    /// assert_eq!(options.countdown_step, 0.1);
    /// ```
    #[must_use]
    pub const fn with_countdown_step(mut self, step: f64) -> Self {
        self.countdown_step = step;
        self
    }

    /// Sets the countdown tick period.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    ///
    /// use crashrs::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_countdown_period(Duration::from_millis(20));
    /// assert_eq!(options.countdown_period, Duration::from_millis(20));
    /// ```
    #[must_use]
    pub const fn with_countdown_period(mut self, period: Duration) -> Self {
        self.countdown_period = period;
        self
    }

    /// Sets the multiplier tick period.
    ///
    /// # Example
    ///
    /// ```
    /// use core::time::Duration;
    ///
    /// use crashrs::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_multiplier_period(Duration::from_millis(50));
    /// assert_eq!(options.multiplier_period, Duration::from_millis(50));
    /// ```
    #[must_use]
    pub const fn with_multiplier_period(mut self, period: Duration) -> Self {
        self.multiplier_period = period;
        self
    }

    /// Sets the inclusive crash point range.
    ///
    /// Setting both bounds to the same value makes every round crash at that
    /// value.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_crash_point_range(2.0, 2.0);
    /// assert_eq!(options.crash_point_min, 2.0);
    /// assert_eq!(options.crash_point_max, 2.0);
    /// ```
    #[must_use]
    pub const fn with_crash_point_range(mut self, min: f64, max: f64) -> Self {
        self.crash_point_min = min;
        self.crash_point_max = max;
        self
    }

    /// Sets the number of retained history entries.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_history_capacity(50);
    /// assert_eq!(options.history_capacity, 50);
    /// ```
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Sets the number of retained crash points.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_crash_history_capacity(5);
    /// assert_eq!(options.crash_history_capacity, 5);
    /// ```
    #[must_use]
    pub const fn with_crash_history_capacity(mut self, capacity: usize) -> Self {
        self.crash_history_capacity = capacity;
        self
    }

    /// Sets the scheduler catch-up cap.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::EngineOptions;
    ///
    /// let options = EngineOptions::default().with_max_catch_up_ticks(100);
    /// assert_eq!(options.max_catch_up_ticks, 100);
    /// ```
    #[must_use]
    pub const fn with_max_catch_up_ticks(mut self, ticks: u32) -> Self {
        self.max_catch_up_ticks = ticks;
        self
    }

    /// Sets the initial auto cash-out policy.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::{AutoCashoutPolicy, EngineOptions};
    ///
    /// let options = EngineOptions::default().with_auto_cashout(AutoCashoutPolicy::new(true, 1.5));
    /// assert!(options.auto_cashout.enabled);
    /// ```
    #[must_use]
    pub const fn with_auto_cashout(mut self, policy: AutoCashoutPolicy) -> Self {
        self.auto_cashout = policy;
        self
    }
}
