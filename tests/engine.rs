//! Engine integration tests.

#![allow(clippy::float_cmp)]

use crashrs::{
    BetOutcome, Cadence, CancelError, CashOutError, ConfigError, Engine, EngineOptions, ErrorKind,
    Panel, RoundEvent, RoundPhase, StakeError,
};

const TICK_LIMIT: usize = 100_000;

fn engine_with_crash(crash_point: f64) -> Engine {
    let options = EngineOptions::default().with_crash_point_range(crash_point, crash_point);
    Engine::new(options, 1).unwrap()
}

fn finish_countdown(engine: &Engine) -> Vec<RoundEvent> {
    let mut events = Vec::new();
    for _ in 0..TICK_LIMIT {
        if engine.phase() != RoundPhase::Waiting {
            return events;
        }
        events.extend(engine.tick(Cadence::Countdown));
    }
    panic!("countdown did not finish");
}

fn tick_until_multiplier(engine: &Engine, target: f64) -> Vec<RoundEvent> {
    let mut events = Vec::new();
    for _ in 0..TICK_LIMIT {
        if engine.phase() != RoundPhase::Playing || engine.multiplier() >= target {
            return events;
        }
        events.extend(engine.tick(Cadence::Multiplier));
    }
    panic!("multiplier did not reach {target}");
}

fn run_to_crash(engine: &Engine) -> Vec<RoundEvent> {
    let start = engine.round_index();
    let mut events = Vec::new();
    for _ in 0..TICK_LIMIT {
        if engine.round_index() != start {
            return events;
        }
        events.extend(engine.tick(Cadence::Multiplier));
    }
    panic!("round did not crash");
}

fn play_round(engine: &Engine) -> Vec<RoundEvent> {
    let mut events = finish_countdown(engine);
    events.extend(run_to_crash(engine));
    events
}

fn crash_losses(events: &[RoundEvent]) -> Vec<crashrs::BetHistoryEntry> {
    events
        .iter()
        .find_map(|event| match event {
            RoundEvent::Crashed { losses, .. } => Some(losses.clone()),
            _ => None,
        })
        .expect("round crashed")
}

#[test]
fn new_engine_starts_waiting() {
    let engine = Engine::new(EngineOptions::default(), 42).unwrap();
    let state = engine.state();

    assert_eq!(state.phase, RoundPhase::Waiting);
    assert_eq!(state.multiplier, 1.0);
    assert_eq!(state.countdown, 10.0);
    assert_eq!(state.round_index, 0);
    assert!(state.crash_history.is_empty());
    assert_eq!(state.last_crash_point, None);
    assert!(engine.history().entries.is_empty());
    assert!(!engine.lane(Panel::Left).active);
    assert!(!engine.lane(Panel::Right).active);
}

#[test]
fn invalid_options_are_rejected() {
    let bad_range = EngineOptions::default().with_crash_point_range(5.0, 2.0);
    assert_eq!(
        Engine::new(bad_range, 1).err(),
        Some(ConfigError::InvalidCrashRange)
    );

    let below_one = EngineOptions::default().with_crash_point_range(0.5, 2.0);
    assert_eq!(
        EngineOptions::validate(&below_one),
        Err(ConfigError::InvalidCrashRange)
    );

    let no_countdown = EngineOptions::default().with_countdown_seconds(0.0);
    assert_eq!(
        no_countdown.validate(),
        Err(ConfigError::InvalidCountdown)
    );

    let tiny_step = EngineOptions::default().with_countdown_step(0.001);
    assert_eq!(tiny_step.validate(), Err(ConfigError::InvalidCountdown));

    let zero_period =
        EngineOptions::default().with_multiplier_period(core::time::Duration::ZERO);
    assert_eq!(zero_period.validate(), Err(ConfigError::ZeroTickPeriod));

    let no_history = EngineOptions::default().with_history_capacity(0);
    assert_eq!(no_history.validate(), Err(ConfigError::ZeroCapacity));
}

#[test]
fn countdown_must_be_whole_cents() {
    let half_cent_step = EngineOptions::default().with_countdown_step(0.015);
    assert_eq!(
        Engine::new(half_cent_step, 1).err(),
        Some(ConfigError::InvalidCountdown)
    );

    let half_cent_length = EngineOptions::default().with_countdown_seconds(2.005);
    assert_eq!(
        half_cent_length.validate(),
        Err(ConfigError::InvalidCountdown)
    );
}

#[test]
fn countdown_step_sets_countdown_length() {
    let options = EngineOptions::default()
        .with_crash_point_range(3.0, 3.0)
        .with_countdown_seconds(1.0)
        .with_countdown_step(0.05);
    let engine = Engine::new(options, 1).unwrap();

    for _ in 0..19 {
        assert!(engine.tick(Cadence::Countdown).is_empty());
    }
    assert_eq!(engine.state().countdown, 0.05);

    let events = engine.tick(Cadence::Countdown);
    assert_eq!(events, vec![RoundEvent::Launched { round_index: 0 }]);
}

#[test]
fn crash_range_must_be_whole_cents() {
    let options = EngineOptions::default().with_crash_point_range(1.101, 1.109);
    assert_eq!(options.validate(), Err(ConfigError::InvalidCrashRange));

    let options = EngineOptions::default().with_crash_point_range(1.10, 1.109);
    assert_eq!(
        Engine::new(options, 1).err(),
        Some(ConfigError::InvalidCrashRange)
    );
}

#[test]
fn unbounded_capacities_do_not_preallocate() {
    let options = EngineOptions::default()
        .with_crash_point_range(2.0, 2.0)
        .with_history_capacity(usize::MAX)
        .with_crash_history_capacity(usize::MAX);
    let engine = Engine::new(options, 1).unwrap();

    engine.place_stake(Panel::Left, 5.0).unwrap();
    play_round(&engine);

    assert_eq!(engine.history().entries.len(), 1);
    assert_eq!(engine.state().crash_history, vec![2.0]);
}

#[test]
fn countdown_launches_after_ten_seconds_of_ticks() {
    let engine = engine_with_crash(3.0);

    for _ in 0..999 {
        assert!(engine.tick(Cadence::Countdown).is_empty());
    }
    let state = engine.state();
    assert_eq!(state.phase, RoundPhase::Waiting);
    assert_eq!(state.countdown, 0.01);
    assert_eq!(state.multiplier, 1.0);

    let events = engine.tick(Cadence::Countdown);
    assert_eq!(events, vec![RoundEvent::Launched { round_index: 0 }]);
    assert_eq!(engine.phase(), RoundPhase::Playing);
    assert_eq!(engine.multiplier(), 1.0);
    assert_eq!(engine.clock(), core::time::Duration::from_secs(10));
}

#[test]
fn ticks_of_the_wrong_cadence_are_ignored() {
    let engine = engine_with_crash(3.0);

    assert!(engine.tick(Cadence::Multiplier).is_empty());
    assert_eq!(engine.multiplier(), 1.0);
    assert_eq!(engine.state().countdown, 10.0);

    finish_countdown(&engine);
    engine.tick(Cadence::Multiplier);
    let multiplier = engine.multiplier();

    assert!(engine.tick(Cadence::Countdown).is_empty());
    assert_eq!(engine.multiplier(), multiplier);
    assert_eq!(engine.phase(), RoundPhase::Playing);
}

#[test]
fn multiplier_rises_and_accelerates() {
    let engine = engine_with_crash(10.0);
    finish_countdown(&engine);

    let mut values = vec![engine.multiplier()];
    while engine.phase() == RoundPhase::Playing {
        engine.tick(Cadence::Multiplier);
        if engine.phase() == RoundPhase::Playing {
            values.push(engine.multiplier());
        }
    }

    assert!(values.windows(2).all(|pair| pair[1] >= pair[0]));
    assert_eq!(values[1], 1.01);

    let first_step = values[1] - values[0];
    let last_step = values[values.len() - 1] - values[values.len() - 2];
    assert!(last_step > first_step);
}

#[test]
fn crash_settles_active_lane_as_loss() {
    let engine = engine_with_crash(3.0);
    engine.place_stake(Panel::Left, 10.0).unwrap();

    finish_countdown(&engine);
    let events = run_to_crash(&engine);

    let crash = events
        .iter()
        .find(|event| matches!(event, RoundEvent::Crashed { .. }))
        .unwrap();
    let RoundEvent::Crashed {
        round_index,
        crash_point,
        losses,
    } = crash
    else {
        unreachable!();
    };
    assert_eq!(*round_index, 0);
    assert_eq!(*crash_point, 3.0);
    assert_eq!(losses.len(), 1);
    assert_eq!(losses[0].panel, Panel::Left);
    assert_eq!(losses[0].outcome, BetOutcome::Loss);
    assert_eq!(losses[0].multiplier, 3.0);
    assert_eq!(losses[0].profit, -10.0);
    assert!(!losses[0].auto_cashout);

    let stats = engine.stats();
    assert_eq!(stats.total_losses, 1);
    assert_eq!(stats.total_wins, 0);
    assert_eq!(stats.total_profit, -10.0);
    assert!(stats.biggest_loss >= 10.0);

    assert!(!engine.lane(Panel::Left).active);
    assert_eq!(engine.history().entries.len(), 1);
}

#[test]
fn crash_resets_into_next_countdown() {
    let engine = engine_with_crash(3.0);
    play_round(&engine);

    let state = engine.state();
    assert_eq!(state.phase, RoundPhase::Waiting);
    assert_eq!(state.multiplier, 1.0);
    assert_eq!(state.countdown, 10.0);
    assert_eq!(state.round_index, 1);
    assert_eq!(state.crash_history, vec![3.0]);
    assert_eq!(state.last_crash_point, Some(3.0));
}

#[test]
fn manual_cash_out_pays_stake_times_multiplier() {
    let engine = engine_with_crash(3.0);
    engine.place_stake(Panel::Left, 10.0).unwrap();

    finish_countdown(&engine);
    tick_until_multiplier(&engine, 2.5);
    assert_eq!(engine.multiplier(), 2.5);
    assert_eq!(engine.potential_winnings(Panel::Left), 25.0);

    let winnings = engine.cash_out(Panel::Left, false).unwrap();
    assert_eq!(winnings, 25.0);
    assert_eq!(engine.potential_winnings(Panel::Left), 0.0);

    let history = engine.history();
    let entry = history.entries[0];
    assert_eq!(entry.outcome, BetOutcome::Win);
    assert_eq!(entry.stake, 10.0);
    assert_eq!(entry.multiplier, 2.5);
    assert_eq!(entry.profit, 15.0);
    assert!(!entry.auto_cashout);
    assert_eq!(history.stats.total_wins, 1);
    assert_eq!(history.stats.biggest_win, 15.0);

    let losses = crash_losses(&run_to_crash(&engine));
    assert!(losses.is_empty());
    assert_eq!(engine.stats().total_losses, 0);
}

#[test]
fn second_cash_out_in_same_round_is_rejected() {
    let engine = engine_with_crash(3.0);
    engine.place_stake(Panel::Right, 4.0).unwrap();

    finish_countdown(&engine);
    tick_until_multiplier(&engine, 1.5);
    engine.cash_out(Panel::Right, false).unwrap();
    let stats = engine.stats();

    let err = engine.cash_out(Panel::Right, false).unwrap_err();
    assert_eq!(err, CashOutError::NotActive);
    assert_eq!(err.kind(), ErrorKind::IllegalTransition);
    assert_eq!(engine.cash_out(Panel::Right, false).unwrap_or(0.0), 0.0);
    assert_eq!(engine.stats(), stats);
    assert_eq!(engine.history().entries.len(), 1);
}

#[test]
fn cash_out_outside_playing_is_rejected() {
    let engine = engine_with_crash(3.0);
    engine.place_stake(Panel::Left, 10.0).unwrap();

    assert_eq!(
        engine.cash_out(Panel::Left, false).unwrap_err(),
        CashOutError::InvalidState
    );
    assert!(engine.lane(Panel::Left).active);

    finish_countdown(&engine);
    assert_eq!(
        engine.cash_out(Panel::Right, false).unwrap_err(),
        CashOutError::NotActive
    );
}

#[test]
fn zero_stake_is_rejected() {
    let engine = engine_with_crash(3.0);

    let err = engine.place_stake(Panel::Left, 0.0).unwrap_err();
    assert_eq!(err, StakeError::InvalidStake);
    assert_eq!(err.kind(), ErrorKind::InvalidStake);
    assert_eq!(
        engine.place_stake(Panel::Left, -5.0).unwrap_err(),
        StakeError::InvalidStake
    );
    assert_eq!(
        engine.place_stake(Panel::Left, f64::NAN).unwrap_err(),
        StakeError::InvalidStake
    );

    let lane = engine.lane(Panel::Left);
    assert!(!lane.active);
    assert_eq!(lane.stake, 0.0);
}

#[test]
fn active_stake_cannot_be_changed() {
    let engine = engine_with_crash(3.0);
    engine.place_stake(Panel::Left, 10.0).unwrap();

    let err = engine.place_stake(Panel::Left, 50.0).unwrap_err();
    assert_eq!(err, StakeError::IllegalTransition);
    assert_eq!(err.kind(), ErrorKind::IllegalTransition);
    assert_eq!(engine.lane(Panel::Left).stake, 10.0);
}

#[test]
fn cancel_only_while_waiting() {
    let engine = engine_with_crash(3.0);

    assert_eq!(
        engine.cancel_stake(Panel::Left).unwrap_err(),
        CancelError::NotActive
    );

    engine.place_stake(Panel::Left, 10.0).unwrap();
    finish_countdown(&engine);

    let err = engine.cancel_stake(Panel::Left).unwrap_err();
    assert_eq!(err, CancelError::InvalidState);
    assert_eq!(err.kind(), ErrorKind::IllegalTransition);
    let lane = engine.lane(Panel::Left);
    assert!(lane.active);
    assert_eq!(lane.stake, 10.0);
}

#[test]
fn cancel_while_waiting_refunds_and_clears_lane() {
    let engine = engine_with_crash(3.0);
    engine.place_stake(Panel::Right, 7.5).unwrap();
    engine.tick(Cadence::Countdown);

    assert_eq!(engine.cancel_stake(Panel::Right), Ok(7.5));
    let lane = engine.lane(Panel::Right);
    assert!(!lane.active);
    assert_eq!(lane.stake, 0.0);

    let losses = crash_losses(&play_round(&engine));
    assert!(losses.is_empty());
    assert!(engine.history().entries.is_empty());
}

#[test]
fn stake_placed_mid_round_is_live() {
    let engine = engine_with_crash(3.0);
    finish_countdown(&engine);
    tick_until_multiplier(&engine, 1.2);

    engine.place_stake(Panel::Left, 10.0).unwrap();
    assert!(engine.lane(Panel::Left).active);

    tick_until_multiplier(&engine, 2.0);
    assert_eq!(engine.cash_out(Panel::Left, false), Ok(20.0));
}

#[test]
fn auto_cash_out_fires_once_per_lane() {
    let engine = engine_with_crash(5.0);
    engine.set_auto_cashout_policy(true, 2.0);
    engine.place_stake(Panel::Left, 10.0).unwrap();
    engine.place_stake(Panel::Right, 4.0).unwrap();

    let events = play_round(&engine);
    let auto: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            RoundEvent::AutoCashedOut {
                panel,
                multiplier,
                winnings,
            } => Some((*panel, *multiplier, *winnings)),
            _ => None,
        })
        .collect();

    assert_eq!(
        auto,
        vec![(Panel::Left, 2.0, 20.0), (Panel::Right, 2.0, 8.0)]
    );
    assert!(crash_losses(&events).is_empty());

    let history = engine.history();
    assert_eq!(history.entries.len(), 2);
    assert!(history.entries.iter().all(|entry| entry.auto_cashout));
    assert!(history
        .entries
        .iter()
        .all(|entry| entry.outcome == BetOutcome::Win));
    assert_eq!(history.stats.total_wins, 2);
    assert_eq!(history.stats.total_losses, 0);
}

#[test]
fn auto_cash_out_does_not_refire_after_restake() {
    let engine = engine_with_crash(5.0);
    engine.set_auto_cashout_policy(true, 2.0);
    engine.place_stake(Panel::Left, 10.0).unwrap();

    finish_countdown(&engine);
    tick_until_multiplier(&engine, 2.5);
    assert!(engine.lane(Panel::Left).auto_cashout_armed);
    assert!(!engine.lane(Panel::Left).active);

    engine.place_stake(Panel::Left, 10.0).unwrap();
    let events = run_to_crash(&engine);

    assert!(
        !events
            .iter()
            .any(|event| matches!(event, RoundEvent::AutoCashedOut { .. }))
    );
    let losses = crash_losses(&events);
    assert_eq!(losses.len(), 1);
    assert_eq!(losses[0].multiplier, 5.0);

    assert!(!engine.lane(Panel::Left).auto_cashout_armed);
}

#[test]
fn auto_cash_out_disabled_leaves_lane_to_crash() {
    let engine = engine_with_crash(2.5);
    engine.set_auto_cashout_policy(false, 2.0);
    engine.place_stake(Panel::Left, 10.0).unwrap();

    let events = play_round(&engine);
    assert_eq!(crash_losses(&events).len(), 1);
    assert!(!engine.lane(Panel::Left).auto_cashout_armed);
}

#[test]
fn auto_cash_out_target_is_clamped() {
    let engine = engine_with_crash(3.0);

    let policy = engine.set_auto_cashout_policy(true, 0.5);
    assert!(policy.enabled);
    assert_eq!(policy.target_multiplier, 1.01);
    assert_eq!(engine.auto_cashout_policy(), policy);

    let policy = engine.set_auto_cashout_policy(true, f64::NAN);
    assert_eq!(policy.target_multiplier, 1.01);
}

#[test]
fn autoplay_restakes_every_round() {
    let engine = engine_with_crash(1.5);
    engine.set_autoplay(Panel::Right, Some(5.0)).unwrap();

    // Autoplay starts with the next countdown.
    assert!(!engine.lane(Panel::Right).active);

    let events = play_round(&engine);
    assert!(events.contains(&RoundEvent::AutoplayStaked {
        panel: Panel::Right,
        amount: 5.0,
    }));
    let lane = engine.lane(Panel::Right);
    assert!(lane.active);
    assert_eq!(lane.stake, 5.0);
    assert_eq!(lane.autoplay, Some(5.0));

    let losses = crash_losses(&play_round(&engine));
    assert_eq!(losses.len(), 1);
    assert!(engine.lane(Panel::Right).active);
}

#[test]
fn cancelling_disables_autoplay() {
    let engine = engine_with_crash(1.5);
    engine.set_autoplay(Panel::Left, Some(2.0)).unwrap();
    play_round(&engine);
    assert!(engine.lane(Panel::Left).active);

    engine.cancel_stake(Panel::Left).unwrap();
    assert_eq!(engine.autoplay(Panel::Left), None);

    play_round(&engine);
    assert!(!engine.lane(Panel::Left).active);
}

#[test]
fn autoplay_rejects_invalid_amount() {
    let engine = engine_with_crash(1.5);
    assert_eq!(
        engine.set_autoplay(Panel::Left, Some(0.0)),
        Err(StakeError::InvalidStake)
    );
    assert_eq!(engine.autoplay(Panel::Left), None);
}

#[test]
fn history_is_bounded_but_stats_are_not() {
    let engine = engine_with_crash(1.1);
    engine.place_stake(Panel::Left, 1.0).unwrap();
    engine.set_autoplay(Panel::Left, Some(1.0)).unwrap();

    for round in 1..=25_u64 {
        play_round(&engine);
        let history = engine.history();
        if round <= 20 {
            assert_eq!(
                history.stats.total_bets(),
                history.entries.len() as u64
            );
        }
    }

    let history = engine.history();
    assert_eq!(history.entries.len(), 20);
    assert_eq!(history.stats.total_losses, 25);
    assert_eq!(history.stats.total_profit, -25.0);
    assert_eq!(history.stats.biggest_loss, 1.0);
    assert_eq!(history.stats.win_rate(), 0.0);
}

#[test]
fn history_entries_are_most_recent_first() {
    let engine = engine_with_crash(3.0);
    engine.place_stake(Panel::Left, 10.0).unwrap();
    engine.place_stake(Panel::Right, 20.0).unwrap();

    finish_countdown(&engine);
    tick_until_multiplier(&engine, 2.0);
    engine.cash_out(Panel::Right, false).unwrap();
    run_to_crash(&engine);

    let history = engine.history();
    assert_eq!(history.entries.len(), 2);
    assert_eq!(history.entries[0].panel, Panel::Left);
    assert_eq!(history.entries[0].outcome, BetOutcome::Loss);
    assert_eq!(history.entries[1].panel, Panel::Right);
    assert_eq!(history.entries[1].outcome, BetOutcome::Win);
    assert!(history.entries[0].id > history.entries[1].id);
    assert!(history.entries[0].timestamp > history.entries[1].timestamp);

    let stats = history.stats;
    assert_eq!(stats.total_profit, 10.0);
    assert_eq!(stats.biggest_win, 20.0);
    assert_eq!(stats.biggest_loss, 10.0);
    assert_eq!(stats.win_rate(), 0.5);
}

#[test]
fn crash_history_keeps_last_ten_most_recent_first() {
    let engine = Engine::new(EngineOptions::default(), 9).unwrap();

    let mut crash_points = Vec::new();
    for _ in 0..12 {
        for event in play_round(&engine) {
            if let RoundEvent::Crashed { crash_point, .. } = event {
                crash_points.push(crash_point);
            }
        }
    }

    let state = engine.state();
    assert_eq!(state.round_index, 12);
    assert_eq!(crash_points.len(), 12);

    let expected: Vec<f64> = crash_points.iter().rev().take(10).copied().collect();
    assert_eq!(state.crash_history, expected);
    assert_eq!(state.last_crash_point, crash_points.last().copied());
}

#[test]
fn crash_points_stay_in_range() {
    let engine = Engine::new(EngineOptions::default(), 2024).unwrap();

    for _ in 0..40 {
        for event in play_round(&engine) {
            if let RoundEvent::Crashed { crash_point, .. } = event {
                assert!((1.10..=10.0).contains(&crash_point));
                let cents = crash_point * 100.0;
                assert!((cents - cents.round()).abs() < 1e-6);
            }
        }
    }
}

#[test]
fn same_seed_same_rounds() {
    let first = Engine::new(EngineOptions::default(), 77).unwrap();
    let second = Engine::new(EngineOptions::default(), 77).unwrap();

    for _ in 0..5 {
        play_round(&first);
        play_round(&second);
    }

    assert_eq!(first.state().crash_history, second.state().crash_history);
}

#[test]
fn independent_engines_do_not_share_state() {
    let first = engine_with_crash(3.0);
    let second = engine_with_crash(3.0);

    first.place_stake(Panel::Left, 10.0).unwrap();
    play_round(&first);

    assert_eq!(first.round_index(), 1);
    assert_eq!(second.round_index(), 0);
    assert!(second.history().entries.is_empty());
}
