use alloc::vec::Vec;

use crate::options::EngineOptions;

use super::state::{Cadence, RoundEvent};
use super::{Engine, EngineState, RoundPhase};

impl EngineState {
    fn tick(&mut self, options: &EngineOptions, cadence: Cadence) -> Vec<RoundEvent> {
        let mut events = Vec::new();

        match (self.round.phase, cadence) {
            (RoundPhase::Waiting, Cadence::Countdown) => {
                self.clock += options.countdown_period;
                if self.round.countdown_tick(options.countdown_step) {
                    self.round.launch();
                    log::info!("round {} launched", self.round.round_index);
                    events.push(RoundEvent::Launched {
                        round_index: self.round.round_index,
                    });
                }
            }
            (RoundPhase::Playing, Cadence::Multiplier) => {
                self.clock += options.multiplier_period;
                if self.round.multiplier_tick() {
                    self.finish_round(options, &mut events);
                } else {
                    self.check_auto_cashout(&mut events);
                }
            }
            // Cadence does not drive the current phase.
            _ => {}
        }

        events
    }

    /// Crashes the round, settles it, and starts the next countdown.
    ///
    /// The next crash point is drawn only after every loss has been settled
    /// against the current one.
    fn finish_round(&mut self, options: &EngineOptions, events: &mut Vec<RoundEvent>) {
        let round_index = self.round.round_index;
        let crash_point = self.round.crash_point;

        self.round.crash(options.crash_history_capacity);
        log::info!("round {round_index} crashed at {crash_point:.2}x");

        let losses = self.settle_losses();
        events.push(RoundEvent::Crashed {
            round_index,
            crash_point,
            losses,
        });

        self.round.reset(options, &mut self.rng);
        for lane in &mut self.lanes {
            lane.disarm_auto_cashout();
        }
        self.place_autoplay_stakes(events);
    }
}

impl Engine {
    /// Applies one tick of the given cadence.
    ///
    /// A countdown tick only applies while waiting and a multiplier tick only
    /// while playing; any other combination is a no-op. The tick runs to
    /// completion, including crash settlement and the reset into the next
    /// countdown, before the lock is released.
    ///
    /// Returns the events the tick produced.
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::{Cadence, Engine, EngineOptions, RoundPhase};
    ///
    /// let engine = Engine::new(EngineOptions::default(), 7).unwrap();
    /// engine.tick(Cadence::Multiplier);
    /// assert_eq!(engine.multiplier(), 1.0);
    ///
    /// engine.tick(Cadence::Countdown);
    /// assert_eq!(engine.state().countdown, 9.99);
    /// assert_eq!(engine.phase(), RoundPhase::Waiting);
    /// ```
    pub fn tick(&self, cadence: Cadence) -> Vec<RoundEvent> {
        self.state.lock().tick(&self.options, cadence)
    }
}
