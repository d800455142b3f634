//! Round phase, tick cadence, events, and read-only snapshots.

use alloc::vec::Vec;
use core::time::Duration;

use crate::history::BetHistoryEntry;
use crate::options::EngineOptions;
use crate::panel::Panel;

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RoundPhase {
    /// Counting down to the next launch; stakes can be placed and cancelled.
    Waiting,
    /// The multiplier is rising; active lanes can cash out.
    Playing,
    /// The multiplier reached the crash point. Resolved within the tick that
    /// detects it, so callers only observe it through [`RoundEvent::Crashed`].
    Crashed,
}

impl RoundPhase {
    /// Returns the tick cadence that drives this phase, if any.
    #[must_use]
    pub const fn cadence(self) -> Option<Cadence> {
        match self {
            Self::Waiting => Some(Cadence::Countdown),
            Self::Playing => Some(Cadence::Multiplier),
            Self::Crashed => None,
        }
    }

    /// Returns the lowercase name of this phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Playing => "playing",
            Self::Crashed => "crashed",
        }
    }
}

/// One of the two tick sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cadence {
    /// Decrements the countdown while waiting.
    Countdown,
    /// Grows the multiplier while playing.
    Multiplier,
}

impl Cadence {
    /// Returns the configured period of this cadence.
    #[must_use]
    pub const fn period(self, options: &EngineOptions) -> Duration {
        match self {
            Self::Countdown => options.countdown_period,
            Self::Multiplier => options.multiplier_period,
        }
    }
}

/// Something that happened during a tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundEvent {
    /// The countdown ran out and the multiplier started at 1.00x.
    Launched {
        /// Index of the round that started.
        round_index: u64,
    },
    /// A lane was cashed out by the auto cash-out policy.
    AutoCashedOut {
        /// The lane that was cashed out.
        panel: Panel,
        /// Multiplier at cash-out.
        multiplier: f64,
        /// Amount paid out (`stake * multiplier`).
        winnings: f64,
    },
    /// The round crashed and every still-active lane was settled as a loss.
    Crashed {
        /// Index of the round that ended.
        round_index: u64,
        /// The crash point of that round.
        crash_point: f64,
        /// Loss entries recorded for lanes that did not cash out.
        losses: Vec<BetHistoryEntry>,
    },
    /// Autoplay placed a stake for the upcoming round.
    AutoplayStaked {
        /// The lane the stake was placed on.
        panel: Panel,
        /// The stake amount.
        amount: f64,
    },
}

/// Read-only view of the live round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundSnapshot {
    /// Current phase.
    pub phase: RoundPhase,
    /// Current multiplier (1.00 while waiting).
    pub multiplier: f64,
    /// Seconds left before launch (only meaningful while waiting).
    pub countdown: f64,
    /// Past crash points, most recent first.
    pub crash_history: Vec<f64>,
    /// Number of completed rounds.
    pub round_index: u64,
    /// Crash point of the previous round.
    pub last_crash_point: Option<f64>,
}

/// Read-only view of a single lane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaneSnapshot {
    /// The lane.
    pub panel: Panel,
    /// Stake amount.
    pub stake: f64,
    /// Whether a confirmed stake exists.
    pub active: bool,
    /// Whether the auto cash-out already fired this round.
    pub auto_cashout_armed: bool,
    /// Stake re-placed at the start of every round, if autoplay is on.
    pub autoplay: Option<f64>,
    /// `stake * multiplier` if active, otherwise 0.
    pub potential_winnings: f64,
}
