use alloc::vec::Vec;

use crate::error::CashOutError;
use crate::history::{BetHistoryEntry, BetOutcome};
use crate::panel::Panel;

use super::state::RoundEvent;
use super::{Engine, EngineState, RoundPhase};

impl EngineState {
    /// Settles an active lane as a win at the current multiplier and returns
    /// the winnings.
    fn cash_out(&mut self, panel: Panel, auto: bool) -> Result<f64, CashOutError> {
        if self.round.phase != RoundPhase::Playing {
            return Err(CashOutError::InvalidState);
        }

        let multiplier = self.round.multiplier;
        let stake = self
            .lane_mut(panel)
            .settle()
            .ok_or(CashOutError::NotActive)?;

        let winnings = stake * multiplier;
        let profit = winnings - stake;
        let entry = BetHistoryEntry {
            id: self.take_entry_id(),
            panel,
            stake,
            outcome: BetOutcome::Win,
            multiplier,
            profit,
            timestamp: self.clock,
            auto_cashout: auto,
        };
        self.history.record(entry);

        log::debug!("cashed out {panel} panel at {multiplier:.2}x: {winnings:.2}");
        Ok(winnings)
    }

    /// Runs the auto cash-out policy against both lanes.
    ///
    /// The arm flag is set before cashing out, so each lane fires at most
    /// once per round even though this runs on every multiplier tick.
    pub(super) fn check_auto_cashout(&mut self, events: &mut Vec<RoundEvent>) {
        let multiplier = self.round.multiplier;
        if !self.auto_cashout.triggers_at(multiplier) {
            return;
        }

        for panel in Panel::ALL {
            let lane = self.lane(panel);
            if !lane.is_active() || lane.is_auto_cashout_armed() {
                continue;
            }

            self.lane_mut(panel).arm_auto_cashout();
            if let Ok(winnings) = self.cash_out(panel, true) {
                log::debug!("auto cash-out triggered for {panel} panel at {multiplier:.2}x");
                events.push(RoundEvent::AutoCashedOut {
                    panel,
                    multiplier,
                    winnings,
                });
            }
        }
    }

    /// Settles every still-active lane as a loss at the crash point.
    pub(super) fn settle_losses(&mut self) -> Vec<BetHistoryEntry> {
        let crash_point = self.round.crash_point;
        let mut losses = Vec::new();

        for panel in Panel::ALL {
            let Some(stake) = self.lane_mut(panel).settle() else {
                continue;
            };

            let entry = BetHistoryEntry {
                id: self.take_entry_id(),
                panel,
                stake,
                outcome: BetOutcome::Loss,
                multiplier: crash_point,
                profit: -stake,
                timestamp: self.clock,
                auto_cashout: false,
            };
            self.history.record(entry);
            losses.push(entry);

            log::debug!("{panel} panel lost {stake:.2} at {crash_point:.2}x");
        }

        losses
    }
}

impl Engine {
    /// Cashes out the given lane at the current multiplier.
    ///
    /// Returns the winnings (`stake * multiplier`). `auto` only marks the
    /// history entry; the engine runs its own auto cash-out check on every
    /// multiplier tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not playing or the lane has no active
    /// stake. A lane that already cashed out this round is inactive, so a
    /// second cash-out fails without touching the statistics.
    pub fn cash_out(&self, panel: Panel, auto: bool) -> Result<f64, CashOutError> {
        self.state.lock().cash_out(panel, auto)
    }
}
