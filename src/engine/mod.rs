//! Round engine and state management.

use core::time::Duration;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::ConfigError;
use crate::history::{History, HistorySnapshot, Stats};
use crate::lane::Lane;
use crate::options::{AutoCashoutPolicy, EngineOptions};
use crate::panel::{PANEL_COUNT, Panel};
use crate::sync::Mutex;

mod cashout;
mod round;
mod stake;
pub mod state;
mod tick;

pub(crate) use round::is_whole_cents;
use round::Round;
pub use state::{Cadence, LaneSnapshot, RoundEvent, RoundPhase, RoundSnapshot};

/// Mutable engine state. Everything lives behind one lock so a tick and a
/// user operation can never interleave.
struct EngineState {
    round: Round,
    lanes: [Lane; PANEL_COUNT],
    /// Stake re-placed for each lane at the start of every round.
    autoplay: [Option<f64>; PANEL_COUNT],
    auto_cashout: AutoCashoutPolicy,
    history: History,
    /// Simulated time, advanced by the period of every applied tick.
    clock: Duration,
    next_entry_id: u64,
    rng: ChaCha8Rng,
}

impl EngineState {
    const fn lane(&self, panel: Panel) -> &Lane {
        &self.lanes[panel.index()]
    }

    const fn lane_mut(&mut self, panel: Panel) -> &mut Lane {
        &mut self.lanes[panel.index()]
    }

    const fn take_entry_id(&mut self) -> u64 {
        let id = self.next_entry_id;
        self.next_entry_id += 1;
        id
    }

    fn lane_snapshot(&self, panel: Panel) -> LaneSnapshot {
        let lane = self.lane(panel);
        LaneSnapshot {
            panel,
            stake: lane.stake(),
            active: lane.is_active(),
            auto_cashout_armed: lane.is_auto_cashout_armed(),
            autoplay: self.autoplay[panel.index()],
            potential_winnings: lane.potential_winnings(self.round.multiplier),
        }
    }
}

/// A crash round engine with two betting lanes.
///
/// The engine owns the live round, both lanes, the auto cash-out policy and
/// the bet history. Time only moves through [`Engine::tick`], usually called
/// by a [`Scheduler`](crate::Scheduler). All methods take `&self`, so one
/// engine can be shared between a ticking thread and callers placing stakes.
pub struct Engine {
    options: EngineOptions,
    state: Mutex<EngineState>,
}

impl Engine {
    /// Creates a new engine with the given seed and draws the first crash
    /// point.
    ///
    /// # Errors
    ///
    /// Returns an error if the options fail [`EngineOptions::validate`].
    ///
    /// # Example
    ///
    /// ```
    /// use crashrs::{Engine, EngineOptions, RoundPhase};
    ///
    /// let engine = Engine::new(EngineOptions::default(), 42).unwrap();
    /// assert_eq!(engine.phase(), RoundPhase::Waiting);
    /// ```
    pub fn new(options: EngineOptions, seed: u64) -> Result<Self, ConfigError> {
        options.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let round = Round::new(&options, &mut rng);
        let auto_cashout = AutoCashoutPolicy::new(
            options.auto_cashout.enabled,
            options.auto_cashout.target_multiplier,
        );

        let state = EngineState {
            round,
            lanes: [Lane::new(); PANEL_COUNT],
            autoplay: [None; PANEL_COUNT],
            auto_cashout,
            history: History::new(options.history_capacity),
            clock: Duration::ZERO,
            next_entry_id: 1,
            rng,
        };

        Ok(Self {
            options,
            state: Mutex::new(state),
        })
    }

    /// Returns the engine options.
    pub const fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Returns the current phase.
    pub fn phase(&self) -> RoundPhase {
        self.state.lock().round.phase
    }

    /// Returns the current multiplier.
    pub fn multiplier(&self) -> f64 {
        self.state.lock().round.multiplier
    }

    /// Returns the number of completed rounds.
    pub fn round_index(&self) -> u64 {
        self.state.lock().round.round_index
    }

    /// Returns the engine clock: the summed periods of all applied ticks.
    pub fn clock(&self) -> Duration {
        self.state.lock().clock
    }

    /// Returns a snapshot of the live round. Cheap enough to poll every frame.
    pub fn state(&self) -> RoundSnapshot {
        let state = self.state.lock();
        let round = &state.round;
        RoundSnapshot {
            phase: round.phase,
            multiplier: round.multiplier,
            countdown: round.countdown,
            crash_history: round.crash_history.iter().copied().collect(),
            round_index: round.round_index,
            last_crash_point: round.crash_history.front().copied(),
        }
    }

    /// Returns a snapshot of the given lane.
    pub fn lane(&self, panel: Panel) -> LaneSnapshot {
        self.state.lock().lane_snapshot(panel)
    }

    /// Returns `stake * multiplier` for an active lane, otherwise 0.
    pub fn potential_winnings(&self, panel: Panel) -> f64 {
        let state = self.state.lock();
        state.lane(panel).potential_winnings(state.round.multiplier)
    }

    /// Returns the auto cash-out policy.
    pub fn auto_cashout_policy(&self) -> AutoCashoutPolicy {
        self.state.lock().auto_cashout
    }

    /// Replaces the auto cash-out policy for both lanes.
    ///
    /// Targets below [`MIN_AUTO_CASHOUT_TARGET`](crate::MIN_AUTO_CASHOUT_TARGET)
    /// are raised to it. Returns the policy now in effect.
    pub fn set_auto_cashout_policy(&self, enabled: bool, target_multiplier: f64) -> AutoCashoutPolicy {
        let policy = AutoCashoutPolicy::new(enabled, target_multiplier);
        self.state.lock().auto_cashout = policy;
        log::info!(
            "auto cash-out {} at {:.2}x",
            if policy.enabled { "enabled" } else { "disabled" },
            policy.target_multiplier
        );
        policy
    }

    /// Returns the bet history and running statistics.
    pub fn history(&self) -> HistorySnapshot {
        self.state.lock().history.snapshot()
    }

    /// Returns the running statistics.
    pub fn stats(&self) -> Stats {
        *self.state.lock().history.stats()
    }
}
