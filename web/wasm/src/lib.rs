use core::time::Duration;

use crashrs::{Engine, EngineOptions, HistorySnapshot, LaneSnapshot, Panel, RoundEvent, RoundSnapshot, Scheduler};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WasmEngine {
    engine: Engine,
    scheduler: Scheduler,
}

#[wasm_bindgen]
impl WasmEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Result<WasmEngine, JsValue> {
        let engine = Engine::new(EngineOptions::default(), seed as u64).map_err(js_err)?;
        Ok(Self {
            engine,
            scheduler: Scheduler::new(),
        })
    }

    pub fn reset(&mut self, seed: u32) -> Result<(), JsValue> {
        self.engine = Engine::new(EngineOptions::default(), seed as u64).map_err(js_err)?;
        self.scheduler = Scheduler::new();
        Ok(())
    }

    /// Advances the engine by `elapsed_ms` of wall-clock time, usually the
    /// delta between two animation frames. Returns the events produced.
    pub fn advance(&mut self, elapsed_ms: f64) -> Result<JsValue, JsValue> {
        let elapsed_ms = if elapsed_ms.is_finite() { elapsed_ms.max(0.0) } else { 0.0 };
        let elapsed = Duration::try_from_secs_f64(elapsed_ms / 1000.0).unwrap_or(Duration::MAX);
        let events: Vec<JsEvent> = self
            .scheduler
            .advance(&self.engine, elapsed)
            .into_iter()
            .map(JsEvent::from)
            .collect();
        to_js_value(&events)
    }

    pub fn place_stake(&self, amount: f64, panel: &str) -> Result<bool, JsValue> {
        let panel = parse_panel(panel)?;
        Ok(self.engine.place_stake(panel, amount).is_ok())
    }

    pub fn cancel_stake(&self, panel: &str) -> Result<bool, JsValue> {
        let panel = parse_panel(panel)?;
        Ok(self.engine.cancel_stake(panel).is_ok())
    }

    pub fn cash_out(&self, is_auto: bool, panel: &str) -> Result<f64, JsValue> {
        let panel = parse_panel(panel)?;
        Ok(self.engine.cash_out(panel, is_auto).unwrap_or(0.0))
    }

    pub fn potential_winnings(&self, panel: &str) -> Result<f64, JsValue> {
        let panel = parse_panel(panel)?;
        Ok(self.engine.potential_winnings(panel))
    }

    pub fn set_auto_cashout_policy(&self, enabled: bool, target_multiplier: f64) -> f64 {
        self.engine
            .set_auto_cashout_policy(enabled, target_multiplier)
            .target_multiplier
    }

    pub fn set_autoplay(&self, panel: &str, amount: Option<f64>) -> Result<bool, JsValue> {
        let panel = parse_panel(panel)?;
        Ok(self.engine.set_autoplay(panel, amount).is_ok())
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        let state: RoundSnapshot = self.engine.state();
        to_js_value(&state)
    }

    pub fn lane(&self, panel: &str) -> Result<JsValue, JsValue> {
        let panel = parse_panel(panel)?;
        let lane: LaneSnapshot = self.engine.lane(panel);
        to_js_value(&lane)
    }

    pub fn history(&self) -> Result<JsValue, JsValue> {
        let history: HistorySnapshot = self.engine.history();
        to_js_value(&JsHistory::from(history))
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
enum JsEvent {
    Launched {
        round_index: u64,
    },
    AutoCashedOut {
        panel: Panel,
        multiplier: f64,
        winnings: f64,
    },
    Crashed {
        round_index: u64,
        crash_point: f64,
        losses: u32,
    },
    AutoplayStaked {
        panel: Panel,
        amount: f64,
    },
}

impl From<RoundEvent> for JsEvent {
    fn from(event: RoundEvent) -> Self {
        match event {
            RoundEvent::Launched { round_index } => Self::Launched { round_index },
            RoundEvent::AutoCashedOut {
                panel,
                multiplier,
                winnings,
            } => Self::AutoCashedOut {
                panel,
                multiplier,
                winnings,
            },
            RoundEvent::Crashed {
                round_index,
                crash_point,
                losses,
            } => Self::Crashed {
                round_index,
                crash_point,
                losses: losses.len() as u32,
            },
            RoundEvent::AutoplayStaked { panel, amount } => Self::AutoplayStaked { panel, amount },
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsHistory {
    entries: Vec<JsEntry>,
    total_wins: u32,
    total_losses: u32,
    total_profit: f64,
    biggest_win: f64,
    biggest_loss: f64,
    win_rate: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsEntry {
    id: u32,
    panel: Panel,
    amount: f64,
    outcome: &'static str,
    multiplier: f64,
    profit: f64,
    timestamp_ms: f64,
    auto_cashout: bool,
}

impl From<HistorySnapshot> for JsHistory {
    fn from(history: HistorySnapshot) -> Self {
        let stats = history.stats;
        Self {
            entries: history
                .entries
                .into_iter()
                .map(|entry| JsEntry {
                    id: entry.id as u32,
                    panel: entry.panel,
                    amount: entry.stake,
                    outcome: match entry.outcome {
                        crashrs::BetOutcome::Win => "win",
                        crashrs::BetOutcome::Loss => "loss",
                    },
                    multiplier: entry.multiplier,
                    profit: entry.profit,
                    timestamp_ms: entry.timestamp.as_secs_f64() * 1000.0,
                    auto_cashout: entry.auto_cashout,
                })
                .collect(),
            total_wins: stats.total_wins as u32,
            total_losses: stats.total_losses as u32,
            total_profit: stats.total_profit,
            biggest_win: stats.biggest_win,
            biggest_loss: stats.biggest_loss,
            win_rate: stats.win_rate(),
        }
    }
}

fn parse_panel(panel: &str) -> Result<Panel, JsValue> {
    match panel {
        "left" => Ok(Panel::Left),
        "right" => Ok(Panel::Right),
        _ => Err(JsValue::from_str("panel must be \"left\" or \"right\"")),
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
