//! Settled bet log and running statistics.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::time::Duration;

use crate::panel::Panel;

/// Outcome of a settled bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum BetOutcome {
    /// The lane cashed out before the crash.
    Win,
    /// The lane was still active when the round crashed.
    Loss,
}

/// Record of a single settled bet. Never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetHistoryEntry {
    /// Unique, monotonically increasing entry ID.
    pub id: u64,
    /// The panel the stake was placed on.
    pub panel: Panel,
    /// The stake amount.
    pub stake: f64,
    /// Win or loss.
    pub outcome: BetOutcome,
    /// Multiplier at cash-out, or the crash point for a loss.
    pub multiplier: f64,
    /// Signed profit (`winnings - stake` for a win, `-stake` for a loss).
    pub profit: f64,
    /// Engine clock time at settlement.
    pub timestamp: Duration,
    /// Whether the cash-out was triggered by the auto cash-out policy.
    pub auto_cashout: bool,
}

/// Running totals across all settled bets.
///
/// Counters are never evicted, even when the entry log is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stats {
    /// Number of winning bets.
    pub total_wins: u64,
    /// Number of losing bets.
    pub total_losses: u64,
    /// Signed sum of all profits.
    pub total_profit: f64,
    /// Largest single win profit.
    pub biggest_win: f64,
    /// Largest single loss, as a positive amount.
    pub biggest_loss: f64,
}

impl Stats {
    /// Returns the number of settled bets.
    #[must_use]
    pub const fn total_bets(&self) -> u64 {
        self.total_wins + self.total_losses
    }

    /// Returns the fraction of settled bets that were wins, or 0 if none.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let total = self.total_bets();
        if total == 0 {
            return 0.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for bet counts"
        )]
        let rate = self.total_wins as f64 / total as f64;
        rate
    }

    fn apply(&mut self, entry: &BetHistoryEntry) {
        match entry.outcome {
            BetOutcome::Win => {
                self.total_wins += 1;
                if entry.profit > self.biggest_win {
                    self.biggest_win = entry.profit;
                }
            }
            BetOutcome::Loss => {
                self.total_losses += 1;
                let loss = -entry.profit;
                if loss > self.biggest_loss {
                    self.biggest_loss = loss;
                }
            }
        }
        self.total_profit += entry.profit;
    }
}

/// Bounded, most-recent-first log of settled bets plus [`Stats`].
///
/// Owned by the engine; callers read it through [`HistorySnapshot`].
#[derive(Debug, Clone)]
pub(crate) struct History {
    entries: VecDeque<BetHistoryEntry>,
    capacity: usize,
    stats: Stats,
}

impl History {
    /// Creates an empty history retaining at most `capacity` entries.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            stats: Stats::default(),
        }
    }

    /// Records a settled bet.
    ///
    /// The entry is prepended and the oldest entries beyond capacity are
    /// dropped. Stats are updated regardless of eviction.
    pub(crate) fn record(&mut self, entry: BetHistoryEntry) {
        self.stats.apply(&entry);
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }

    /// Returns the running statistics.
    pub(crate) const fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Returns an owned copy of the entries and stats.
    pub(crate) fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.entries.iter().copied().collect(),
            stats: self.stats,
        }
    }
}

/// Owned view of the bet history and statistics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HistorySnapshot {
    /// Settled bets, most recent first.
    pub entries: Vec<BetHistoryEntry>,
    /// Running totals.
    pub stats: Stats,
}
