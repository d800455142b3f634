use crate::error::{CancelError, StakeError};
use crate::panel::Panel;

use super::state::RoundEvent;
use super::{Engine, EngineState, RoundPhase};

impl EngineState {
    fn place_stake(&mut self, panel: Panel, amount: f64) -> Result<(), StakeError> {
        self.lane_mut(panel).place(amount)?;
        log::debug!("stake placed on {panel} panel: {amount:.2}");
        Ok(())
    }

    /// Places autoplay stakes for the round that is about to count down.
    pub(super) fn place_autoplay_stakes(&mut self, events: &mut alloc::vec::Vec<RoundEvent>) {
        for panel in Panel::ALL {
            let Some(amount) = self.autoplay[panel.index()] else {
                continue;
            };
            if self.lane(panel).is_active() {
                continue;
            }
            if self.place_stake(panel, amount).is_ok() {
                log::debug!("autoplay staked {amount:.2} on {panel} panel");
                events.push(RoundEvent::AutoplayStaked { panel, amount });
            }
        }
    }
}

impl Engine {
    /// Places a stake on the given lane.
    ///
    /// Stakes are accepted while waiting and while playing; a stake placed
    /// mid-round is live immediately. The stake of an active lane cannot be
    /// changed until it is cancelled or settled.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is not a positive finite number or the
    /// lane already holds an active stake.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::{Engine, EngineOptions, Panel, StakeError};
    ///
    /// let engine = Engine::new(EngineOptions::default(), 1).unwrap();
    /// assert_eq!(engine.place_stake(Panel::Left, 0.0), Err(StakeError::InvalidStake));
    /// assert!(engine.place_stake(Panel::Left, 10.0).is_ok());
    /// ```
    pub fn place_stake(&self, panel: Panel, amount: f64) -> Result<(), StakeError> {
        self.state.lock().place_stake(panel, amount)
    }

    /// Cancels the stake on the given lane and returns the refunded amount.
    ///
    /// Cancelling also turns off autoplay for that lane.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not waiting or the lane has no active
    /// stake.
    pub fn cancel_stake(&self, panel: Panel) -> Result<f64, CancelError> {
        let mut state = self.state.lock();
        if state.round.phase != RoundPhase::Waiting {
            return Err(CancelError::InvalidState);
        }

        let refund = state.lane_mut(panel).cancel().ok_or(CancelError::NotActive)?;
        let autoplay_was_on = state.autoplay[panel.index()].take().is_some();
        drop(state);

        log::debug!("stake cancelled on {panel} panel: {refund:.2}");
        if autoplay_was_on {
            log::debug!("autoplay disabled for {panel} panel");
        }
        Ok(refund)
    }

    /// Sets the stake re-placed on the lane at the start of every round, or
    /// turns autoplay off with `None`.
    ///
    /// Autoplay stakes are placed when the next countdown begins; turning it
    /// on does not stake the current round.
    ///
    /// # Errors
    ///
    /// Returns [`StakeError::InvalidStake`] if the amount is not a positive
    /// finite number.
    pub fn set_autoplay(&self, panel: Panel, amount: Option<f64>) -> Result<(), StakeError> {
        if let Some(amount) = amount {
            if !amount.is_finite() || amount <= 0.0 {
                return Err(StakeError::InvalidStake);
            }
        }

        self.state.lock().autoplay[panel.index()] = amount;
        match amount {
            Some(amount) => log::debug!("autoplay set to {amount:.2} on {panel} panel"),
            None => log::debug!("autoplay disabled for {panel} panel"),
        }
        Ok(())
    }

    /// Returns the autoplay stake of the given lane.
    pub fn autoplay(&self, panel: Panel) -> Option<f64> {
        self.state.lock().autoplay[panel.index()]
    }
}
