//! Per-panel stake bookkeeping.

use crate::error::StakeError;

/// Stake state of a single betting lane.
///
/// The lane only knows about its own stake. Phase rules (cancel only while
/// waiting, cash out only while playing) are enforced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lane {
    /// Stake amount.
    stake: f64,
    /// Whether a confirmed stake exists for the current or upcoming round.
    active: bool,
    /// Whether the automatic cash-out already fired this round.
    auto_cashout_armed: bool,
}

impl Lane {
    /// Creates an inactive lane with no stake.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stake: 0.0,
            active: false,
            auto_cashout_armed: false,
        }
    }

    /// Returns the stake amount.
    #[must_use]
    pub const fn stake(&self) -> f64 {
        self.stake
    }

    /// Returns whether the lane holds an active stake.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns whether the automatic cash-out has been armed this round.
    #[must_use]
    pub const fn is_auto_cashout_armed(&self) -> bool {
        self.auto_cashout_armed
    }

    /// Returns `stake * multiplier` if the lane is active, otherwise 0.
    #[must_use]
    pub fn potential_winnings(&self, multiplier: f64) -> f64 {
        if self.active {
            self.stake * multiplier
        } else {
            0.0
        }
    }

    /// Places a stake on this lane.
    ///
    /// # Errors
    ///
    /// Returns [`StakeError::InvalidStake`] if the amount is not a positive
    /// finite number, or [`StakeError::IllegalTransition`] if the lane already
    /// holds an active stake.
    pub fn place(&mut self, amount: f64) -> Result<(), StakeError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(StakeError::InvalidStake);
        }
        if self.active {
            return Err(StakeError::IllegalTransition);
        }

        self.stake = amount;
        self.active = true;
        Ok(())
    }

    /// Clears the stake without settling it.
    ///
    /// Returns the refunded stake, or `None` if the lane was not active.
    pub fn cancel(&mut self) -> Option<f64> {
        if !self.active {
            return None;
        }

        let stake = self.stake;
        self.stake = 0.0;
        self.active = false;
        Some(stake)
    }

    /// Deactivates the lane for settlement and returns its stake.
    ///
    /// The stake amount is kept so the presentation can keep showing the last
    /// bet; it becomes mutable again once the lane is inactive.
    pub fn settle(&mut self) -> Option<f64> {
        if !self.active {
            return None;
        }

        self.active = false;
        Some(self.stake)
    }

    pub const fn arm_auto_cashout(&mut self) {
        self.auto_cashout_armed = true;
    }

    pub const fn disarm_auto_cashout(&mut self) {
        self.auto_cashout_armed = false;
    }
}
