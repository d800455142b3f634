//! Error types for engine operations.

use thiserror::Error;

/// The two kinds of rejection an engine operation can produce.
///
/// Both are expected and recoverable. A presentation layer usually has the
/// corresponding control disabled already and maps them onto `false` / `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A stake amount that is zero, negative, or not finite.
    InvalidStake,
    /// The operation is not allowed in the current phase or lane state.
    IllegalTransition,
}

/// Errors that can occur when placing a stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StakeError {
    /// Stake amount is not a positive finite number.
    #[error("stake amount must be positive")]
    InvalidStake,
    /// The lane already holds an active stake.
    #[error("lane already holds an active stake")]
    IllegalTransition,
}

impl StakeError {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        match self {
            Self::InvalidStake => ErrorKind::InvalidStake,
            Self::IllegalTransition => ErrorKind::IllegalTransition,
        }
    }
}

/// Errors that can occur when cancelling a stake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CancelError {
    /// Stakes can only be cancelled while waiting for the round to start.
    #[error("stakes can only be cancelled while waiting")]
    InvalidState,
    /// The lane has no active stake.
    #[error("lane has no active stake")]
    NotActive,
}

impl CancelError {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        ErrorKind::IllegalTransition
    }
}

/// Errors that can occur when cashing out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CashOutError {
    /// Cash-out is only possible while the multiplier is running.
    #[error("cash-out is only possible while playing")]
    InvalidState,
    /// The lane has no active stake.
    #[error("lane has no active stake")]
    NotActive,
}

impl CashOutError {
    /// Returns the error kind.
    #[must_use]
    pub const fn kind(self) -> ErrorKind {
        ErrorKind::IllegalTransition
    }
}

/// Errors that can occur when validating [`EngineOptions`](crate::EngineOptions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Crash-point floor is below 1.0, above the ceiling, or either bound is
    /// not in whole cents.
    #[error("crash point range must satisfy 1.0 <= min <= max in whole cents")]
    InvalidCrashRange,
    /// Countdown length or step is not a positive whole number of cents.
    #[error("countdown length and step must be positive whole cents")]
    InvalidCountdown,
    /// A tick period is zero.
    #[error("tick periods must be non-zero")]
    ZeroTickPeriod,
    /// A history capacity or the scheduler catch-up cap is zero.
    #[error("capacities and the catch-up cap must be non-zero")]
    ZeroCapacity,
}
