use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use shellpoker_engine::actor::{Actor, ActorError, ScriptedActor, TimedActor};
use shellpoker_engine::betting::{betting_round, PhaseRules};
use shellpoker_engine::cards::Card;
use shellpoker_engine::player::{Action, Player, PlayerState};
use shellpoker_engine::round::{PublicState, Round};

fn scripted(name: &str, chips: u32, script: impl IntoIterator<Item = Action>) -> Player {
    Player::with_actor(name, chips, Box::new(ScriptedActor::new(script)))
}

fn fresh_round(players: &mut [Player]) -> Round {
    let mut round = Round::new(Some(11));
    round.reset(players);
    round.deal_hole_cards(players).expect("deal");
    round
}

fn has_line(round: &Round, needle: &str) -> bool {
    round.history().iter().any(|l| l.contains(needle))
}

#[tokio::test]
async fn bet_then_call_moves_chips_into_pot() {
    let mut players = vec![
        scripted("p1", 100, [Action::Bet(10)]),
        scripted("p2", 100, [Action::Call]),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;

    assert_eq!(round.pot(), 20);
    assert_eq!(players[0].chips, 90);
    assert_eq!(players[1].chips, 90);
    assert!(has_line(&round, "bet $10"));
    assert!(has_line(&round, "called $10"));
    assert_eq!(round.round_bets(), &[10, 10]);
}

#[tokio::test]
async fn broke_player_rebuys_once_then_is_eliminated() {
    let mut players = vec![
        scripted("zed", 0, [Action::Bet(50)]).max_rebuys(Some(1)),
        scripted("amy", 100, [Action::Call]),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;

    assert_eq!(players[0].rebuys, 1);
    assert_eq!(players[0].state, PlayerState::AllIn);
    assert!(has_line(&round, "zed received $50 rebuy (was broke, 1/1)"));
    assert!(has_line(&round, "zed bet $50"));
    // amy is the only active seat left, so the phase ends uncalled
    assert!(!has_line(&round, "amy called"));
    assert_eq!(round.pot(), 50);

    // busted again: no rebuys left
    players[0].chips = 0;
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(players[0].state, PlayerState::Eliminated);
    assert_eq!(players[0].chips, 0);
    assert_eq!(round.history()[0], "zed eliminated (no rebuys left)");
    assert_eq!(round.pot(), 0);
}

#[tokio::test]
async fn unlimited_rebuys_show_infinity() {
    let mut players = vec![
        scripted("zed", 0, [Action::Check]),
        scripted("amy", 100, [Action::Check]),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert!(has_line(&round, "zed received $50 rebuy (was broke, 1/∞)"));
    assert_eq!(players[0].chips, 50);
}

#[tokio::test]
async fn missing_actor_calls_when_owing() {
    let mut players = vec![
        scripted("a", 100, [Action::Bet(10)]),
        Player::new("b", 100),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(round.history(), &["a bet $10", "b called $10"]);
}

#[tokio::test]
async fn missing_actor_checks_when_square() {
    let mut players = vec![Player::new("a", 100), Player::new("b", 100)];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(round.history(), &["a checked", "b checked"]);
}

#[tokio::test]
async fn actor_failures_fold_the_seat() {
    let mut players = vec![
        scripted("a", 100, [Action::Bet(10)]),
        Player::with_actor(
            "b",
            100,
            Box::new(ScriptedActor::default().then_fail(ActorError::Disconnected)),
        ),
        Player::with_actor("c", 100, Box::new(ScriptedActor::default())),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(players[1].state, PlayerState::Folded);
    assert_eq!(players[2].state, PlayerState::Folded);
    assert_eq!(
        round.history(),
        &[
            "a bet $10",
            "b folded (connection error)",
            "c folded (connection error)",
        ]
    );
    assert_eq!(players[1].chips, 100);
}

struct Stall;

#[async_trait]
impl Actor for Stall {
    async fn take_action(&mut self, _state: &PublicState) -> Result<Action, ActorError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Action::Call)
    }
}

#[tokio::test(start_paused = true)]
async fn slow_actor_times_out_to_fold() {
    let mut players = vec![
        scripted("a", 100, [Action::Bet(5)]),
        Player::with_actor(
            "slow",
            100,
            Box::new(TimedActor::new(Stall, Duration::from_secs(30))),
        ),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(players[1].state, PlayerState::Folded);
    assert_eq!(round.history().last().map(String::as_str), Some("slow folded"));
}

#[tokio::test]
async fn raise_reopens_and_call_closes() {
    let mut players = vec![
        scripted("a", 100, [Action::Bet(10), Action::Call]),
        scripted("b", 100, [Action::Raise(30)]),
        scripted("c", 100, [Action::Call, Action::Call]),
    ];
    let mut round = fresh_round(&mut players);
    let summary = betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(
        round.history(),
        &[
            "a bet $10",
            "b raised to $30",
            "c called $30",
            "a called $20",
        ]
    );
    assert_eq!(round.pot(), 90);
    assert_eq!(summary.reopens, 2);
    assert_eq!(summary.resolved, 4);
}

#[tokio::test]
async fn insufficient_raise_is_a_call() {
    let mut players = vec![
        scripted("a", 100, [Action::Bet(20)]),
        scripted("b", 100, [Action::Raise(15)]),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(
        round.history()[1],
        "b called $20 (amount $15 insufficient for raise)"
    );
    assert_eq!(round.pot(), 40);
}

#[tokio::test]
async fn zero_amount_bet_degrades() {
    let mut players = vec![
        scripted("a", 100, [Action::Bet(0), Action::Raise(0)]),
        scripted("b", 100, [Action::Bet(4)]),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(
        round.history(),
        &[
            "a checked (invalid bet)",
            "b bet $4",
            "a called $4 (invalid bet)",
        ]
    );
}

#[tokio::test]
async fn short_call_goes_all_in() {
    let mut players = vec![
        scripted("big", 200, [Action::Bet(80)]),
        scripted("small", 30, [Action::Call]),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(round.history()[1], "small called $30 (all-in)");
    assert_eq!(players[1].state, PlayerState::AllIn);
    assert_eq!(players[1].chips, 0);
    assert_eq!(round.pot(), 110);
}

#[tokio::test]
async fn checks_disallowed_without_minimum_fold() {
    let mut players = vec![
        scripted("a", 100, [Action::Check]),
        scripted("b", 100, [Action::Check]),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::preflop(0), 50).await;
    assert_eq!(players[0].state, PlayerState::Folded);
    assert_eq!(round.history(), &["a folded (checks not allowed this round)"]);
}

#[tokio::test]
async fn postflop_bet_below_minimum_is_a_check() {
    let mut players = vec![
        scripted("a", 100, [Action::Bet(2)]),
        scripted("b", 100, [Action::Check]),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(5), 50).await;
    assert_eq!(round.history(), &["a checked (bet $2 < min $5)", "b checked"]);
    assert_eq!(round.pot(), 0);
}

#[tokio::test]
async fn single_active_player_has_no_phase() {
    let mut players = vec![scripted("a", 100, [Action::Bet(5)]), scripted("b", 100, Vec::new())];
    let mut round = fresh_round(&mut players);
    players[1].state = PlayerState::Folded;
    let summary = betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(summary.resolved, 0);
    assert!(round.history().is_empty());
}

#[tokio::test]
async fn snapshot_carries_only_own_hole_cards() {
    let seen: Arc<Mutex<Vec<(Option<String>, Vec<Card>)>>> = Arc::new(Mutex::new(Vec::new()));
    let spy = |seen: Arc<Mutex<Vec<(Option<String>, Vec<Card>)>>>| {
        ScriptedActor::default().then_respond(move |s: &PublicState| {
            if let Ok(mut v) = seen.lock() {
                v.push((s.current_player.clone(), s.hole_cards.clone()));
            }
            Action::Check
        })
    };
    let mut players = vec![
        Player::with_actor("a", 100, Box::new(spy(seen.clone()))),
        Player::with_actor("b", 100, Box::new(spy(seen.clone()))),
    ];
    let mut round = fresh_round(&mut players);
    betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;

    let seen = seen.lock().expect("lock");
    assert_eq!(seen.len(), 2);
    assert_eq!(seen[0], (Some("a".to_string()), players[0].hand.clone()));
    assert_eq!(seen[1], (Some("b".to_string()), players[1].hand.clone()));
}

/// Checks ledger invariants on every snapshot it is shown, then plays the
/// next scripted action.
struct Auditor {
    script: ScriptedActor,
    starts: Vec<(String, u32)>,
    violations: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Actor for Auditor {
    async fn take_action(&mut self, s: &PublicState) -> Result<Action, ActorError> {
        let sum: u32 = s.bets.values().sum();
        let mut bad = Vec::new();
        if s.pot != sum {
            bad.push(format!("pot {} != sum of bets {}", s.pot, sum));
        }
        for (name, start) in &self.starts {
            let chips = s.chips_of(name).unwrap_or(0);
            let committed = s.bets.get(name).copied().unwrap_or(0);
            // No rebuys in this table, so stacks only move into the pot.
            if chips + committed != *start {
                bad.push(format!("{}: {} + {} != {}", name, chips, committed, start));
            }
        }
        if let Ok(mut v) = self.violations.lock() {
            v.extend(bad);
        }
        self.script.take_action(s).await
    }
}

#[tokio::test]
async fn pot_matches_bets_after_every_action() {
    let violations = Arc::new(Mutex::new(Vec::new()));
    let starts = vec![
        ("a".to_string(), 100),
        ("b".to_string(), 45),
        ("c".to_string(), 300),
        ("d".to_string(), 80),
    ];
    let scripts = [
        vec![Action::Bet(10), Action::Raise(60), Action::Call],
        vec![Action::Call, Action::Raise(45)],
        vec![Action::Raise(25), Action::Raise(120), Action::Call],
        vec![Action::Call, Action::Fold],
    ];
    let mut players: Vec<Player> = starts
        .iter()
        .zip(scripts)
        .map(|((name, chips), script)| {
            Player::with_actor(
                name.clone(),
                *chips,
                Box::new(Auditor {
                    script: ScriptedActor::new(script),
                    starts: starts.clone(),
                    violations: violations.clone(),
                }),
            )
        })
        .collect();
    for p in players.iter_mut() {
        p.max_rebuys = Some(0);
    }

    let mut round = fresh_round(&mut players);
    let summary = betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;

    let violations = violations.lock().expect("lock");
    assert!(violations.is_empty(), "{:?}", *violations);
    assert_eq!(round.pot(), round.bets().iter().sum::<u32>());
    let total: u32 = players.iter().map(|p| p.chips).sum::<u32>() + round.pot();
    assert_eq!(total, 525);
    // bounded by seats * (reopens + 1)
    assert!(summary.resolved <= 4 * (summary.reopens + 1));
}

#[tokio::test]
async fn raise_war_terminates_within_bound() {
    let raises = 6u32;
    let mut a_script: Vec<Action> = (0..raises).map(|i| Action::Raise(10 * (2 * i + 1))).collect();
    a_script.push(Action::Call);
    let mut b_script: Vec<Action> = (0..raises).map(|i| Action::Raise(10 * (2 * i + 2))).collect();
    b_script.push(Action::Call);
    let mut players = vec![
        scripted("a", 10_000, a_script),
        scripted("b", 10_000, b_script),
        scripted("c", 10_000, std::iter::repeat(Action::Call).take(20)),
    ];
    let mut round = fresh_round(&mut players);
    let summary = betting_round(&mut round, &mut players, PhaseRules::postflop(0), 50).await;
    assert_eq!(summary.reopens as u32, raises * 2);
    assert!(summary.resolved <= 3 * (summary.reopens + 1));
    let last = round.round_bets()[0];
    assert!(round.round_bets().iter().all(|&b| b == last));
}
