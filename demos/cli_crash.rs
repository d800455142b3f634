//! CLI crash example.
//!
//! The engine runs in real time on a background thread while commands are
//! read from stdin. Set `RUST_LOG=debug` to see engine logs.

#![allow(clippy::missing_docs_in_private_items)]

use core::sync::atomic::{AtomicBool, Ordering};
use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crashrs::{Engine, EngineOptions, Panel, RoundEvent, Scheduler};

fn main() {
    env_logger::init();

    println!("Crash CLI example");
    println!("Commands: <l|r> <amount> (stake), c <l|r> (cash out), x <l|r> (cancel),");
    println!("          a <target|off> (auto cash-out), p <l|r> <amount|off> (autoplay),");
    println!("          s (status), h (history), q (quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let engine = match Engine::new(EngineOptions::default(), seed) {
        Ok(engine) => engine,
        Err(err) => {
            println!("Config error: {err}");
            return;
        }
    };
    let stop = AtomicBool::new(false);
    let mut scheduler = Scheduler::new();

    std::thread::scope(|scope| {
        scope.spawn(|| scheduler.run_until(&engine, &stop, print_events));

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if !handle_command(&engine, line.trim()) {
                break;
            }
            let _ = io::stdout().flush();
        }

        stop.store(true, Ordering::Release);
    });

    println!("Goodbye.");
}

fn handle_command(engine: &Engine, line: &str) -> bool {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        ["q" | "quit"] => return false,
        ["s"] => print_status(engine),
        ["h"] => print_history(engine),
        [side, amount] if parse_panel(side).is_some() => {
            let Some(panel) = parse_panel(side) else {
                return true;
            };
            match amount.parse::<f64>() {
                Ok(amount) => match engine.place_stake(panel, amount) {
                    Ok(()) => println!("Staked {amount:.2} on {panel}."),
                    Err(err) => println!("Stake error: {err}"),
                },
                Err(_) => println!("Please enter a number."),
            }
        }
        ["c", side] => {
            if let Some(panel) = parse_panel(side) {
                let winnings = engine.cash_out(panel, false).unwrap_or(0.0);
                if winnings > 0.0 {
                    println!("Cashed out {panel}: {winnings:.2}");
                } else {
                    println!("Nothing to cash out on {panel}.");
                }
            }
        }
        ["x", side] => {
            if let Some(panel) = parse_panel(side) {
                match engine.cancel_stake(panel) {
                    Ok(refund) => println!("Cancelled {panel}, refunded {refund:.2}."),
                    Err(err) => println!("Cancel error: {err}"),
                }
            }
        }
        ["a", "off"] => {
            let target = engine.auto_cashout_policy().target_multiplier;
            engine.set_auto_cashout_policy(false, target);
            println!("Auto cash-out off.");
        }
        ["a", target] => match target.parse::<f64>() {
            Ok(target) => {
                let policy = engine.set_auto_cashout_policy(true, target);
                println!("Auto cash-out at {:.2}x.", policy.target_multiplier);
            }
            Err(_) => println!("Please enter a multiplier."),
        },
        ["p", side, amount] => {
            if let Some(panel) = parse_panel(side) {
                let amount = if *amount == "off" {
                    None
                } else {
                    amount.parse::<f64>().ok()
                };
                match engine.set_autoplay(panel, amount) {
                    Ok(()) => println!("Autoplay on {panel}: {amount:?}"),
                    Err(err) => println!("Autoplay error: {err}"),
                }
            }
        }
        [] => {}
        _ => println!("Unknown command."),
    }
    true
}

fn parse_panel(input: &str) -> Option<Panel> {
    match input {
        "l" | "left" => Some(Panel::Left),
        "r" | "right" => Some(Panel::Right),
        _ => None,
    }
}

fn print_events(events: Vec<RoundEvent>) {
    for event in events {
        match event {
            RoundEvent::Launched { round_index } => println!("Round {round_index} started."),
            RoundEvent::AutoCashedOut {
                panel,
                multiplier,
                winnings,
            } => println!("Auto cash-out on {panel} at {multiplier:.2}x: {winnings:.2}"),
            RoundEvent::Crashed {
                round_index,
                crash_point,
                losses,
            } => {
                println!("Round {round_index} crashed at {crash_point:.2}x.");
                for loss in losses {
                    println!("  {} lost {:.2}", loss.panel, loss.stake);
                }
            }
            RoundEvent::AutoplayStaked { panel, amount } => {
                println!("Autoplay staked {amount:.2} on {panel}.");
            }
        }
    }
}

fn print_status(engine: &Engine) {
    let state = engine.state();
    println!(
        "\n{} | multiplier {:.2}x | countdown {:.2}s | round {}",
        state.phase.as_str(),
        state.multiplier,
        state.countdown,
        state.round_index
    );
    let crashes: Vec<String> = state
        .crash_history
        .iter()
        .map(|point| format!("{point:.2}x"))
        .collect();
    println!("Recent crashes: {}", crashes.join(" "));

    for panel in Panel::ALL {
        let lane = engine.lane(panel);
        println!(
            "{:>5}: stake {:.2} | active {} | potential {:.2}",
            panel, lane.stake, lane.active, lane.potential_winnings
        );
    }
    println!();
}

fn print_history(engine: &Engine) {
    let history = engine.history();
    println!();
    for entry in &history.entries {
        let sign = if entry.profit >= 0.0 { "+" } else { "-" };
        println!(
            "#{} {:>5} {:.2} {:?} at {:.2}x {sign}{:.2}{}",
            entry.id,
            entry.panel,
            entry.stake,
            entry.outcome,
            entry.multiplier,
            entry.profit.abs(),
            if entry.auto_cashout { " (auto)" } else { "" }
        );
    }

    let stats = history.stats;
    println!(
        "Wins {} | Losses {} | Win rate {:.0}% | Profit {:.2} | Biggest win {:.2} | Biggest loss {:.2}\n",
        stats.total_wins,
        stats.total_losses,
        stats.win_rate() * 100.0,
        stats.total_profit,
        stats.biggest_win,
        stats.biggest_loss
    );
}
