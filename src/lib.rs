//! A crash-style round engine with optional `no_std` support.
//!
//! The crate provides an [`Engine`] that runs the round loop: a countdown,
//! a multiplier rising from 1.00x until a pre-drawn crash point, and two
//! independent betting lanes that can cash out before the crash. A
//! [`Scheduler`] turns elapsed wall-clock time into engine ticks.
//!
//! # Example
//!
//! ```no_run
//! use core::time::Duration;
//!
//! use crashrs::{Engine, EngineOptions, Panel, Scheduler};
//!
//! let engine = Engine::new(EngineOptions::default(), 42).unwrap();
//! engine.place_stake(Panel::Left, 10.0).unwrap();
//!
//! let mut scheduler = Scheduler::new();
//! let events = scheduler.advance(&engine, Duration::from_secs(12));
//! let _ = events;
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod engine;
pub mod error;
pub mod history;
mod lane;
pub mod options;
pub mod panel;
pub mod scheduler;
mod sync;

// Re-export main types
pub use engine::{Cadence, Engine, LaneSnapshot, RoundEvent, RoundPhase, RoundSnapshot};
pub use error::{CancelError, CashOutError, ConfigError, ErrorKind, StakeError};
pub use history::{BetHistoryEntry, BetOutcome, HistorySnapshot, Stats};
pub use options::{AutoCashoutPolicy, EngineOptions, MIN_AUTO_CASHOUT_TARGET};
pub use panel::Panel;
pub use scheduler::Scheduler;
