//! One betting phase.
//!
//! Seats act strictly in seat order. A per-phase `to_act` vector marks who
//! still owes a decision; it is rebuilt from scratch whenever a bet or raise
//! reopens the action, so nothing is mutated while it is being walked.
//! Invalid or out-of-turn amounts are tolerated and degrade to the nearest
//! legal action, with the conversion spelled out in the action history.

use serde::{Deserialize, Serialize};

use crate::actor::ActorError;
use crate::player::{Action, Player, PlayerState};
use crate::round::Round;

/// Per-phase parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseRules {
    /// `false` forces a wager when nobody has bet yet (pre-flop)
    pub allow_checks: bool,
    /// Smallest opening bet; 0 means any positive amount
    pub min_bet: u32,
}

impl PhaseRules {
    pub fn preflop(min_bet: u32) -> Self {
        Self {
            allow_checks: false,
            min_bet,
        }
    }

    pub fn postflop(min_bet: u32) -> Self {
        Self {
            allow_checks: true,
            min_bet,
        }
    }
}

impl Default for PhaseRules {
    fn default() -> Self {
        Self::postflop(0)
    }
}

/// Counters from one phase, mostly for tests and logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BettingSummary {
    /// Decisions resolved, including forced folds and eliminations
    pub resolved: usize,
    /// Times a bet or raise reopened the action
    pub reopens: usize,
}

pub fn active_count(players: &[Player]) -> usize {
    players
        .iter()
        .filter(|p| p.state == PlayerState::Active)
        .count()
}

pub fn contender_count(players: &[Player]) -> usize {
    players.iter().filter(|p| p.state.is_contender()).count()
}

fn max_label(max: Option<u32>) -> String {
    match max {
        Some(m) => m.to_string(),
        None => "∞".to_string(),
    }
}

/// Runs a betting phase to completion. Broke seats are rebought (`rebuy_amount`)
/// or eliminated before they act. Actor failures never escape: they fold the
/// seat, except [`ActorError::NotImplemented`] which calls or checks.
pub async fn betting_round(
    round: &mut Round,
    players: &mut [Player],
    phase: PhaseRules,
    rebuy_amount: u32,
) -> BettingSummary {
    let mut summary = BettingSummary::default();
    round.reset_round_bets();
    round.set_phase(phase);

    let mut to_act: Vec<bool> = players
        .iter()
        .map(|p| p.state == PlayerState::Active)
        .collect();

    while to_act.iter().any(|&t| t) {
        // Each pass needs someone to play against.
        if active_count(players) <= 1 {
            break;
        }
        for seat in 0..players.len() {
            if !to_act[seat] || players[seat].state != PlayerState::Active {
                to_act[seat] = false;
                continue;
            }

            let current_bet = round.round_bets().iter().copied().max().unwrap_or(0);
            let player_bet = round.round_bets()[seat];
            let owed = current_bet.saturating_sub(player_bet);

            if players[seat].chips == 0 {
                let p = &mut players[seat];
                if p.can_rebuy() {
                    p.chips += rebuy_amount;
                    p.rebuys += 1;
                    let line = format!(
                        "{} received ${} rebuy (was broke, {}/{})",
                        p.name,
                        rebuy_amount,
                        p.rebuys,
                        max_label(p.max_rebuys)
                    );
                    tracing::info!(player = %p.name, rebuys = p.rebuys, "rebuy");
                    round.log(line);
                } else {
                    p.state = PlayerState::Eliminated;
                    let line = format!("{} eliminated (no rebuys left)", p.name);
                    tracing::info!(player = %p.name, "eliminated");
                    round.log(line);
                    to_act[seat] = false;
                    summary.resolved += 1;
                    continue;
                }
            }

            let state = round.public_state(players, Some(seat));
            let action = match players[seat].take_action(&state).await {
                Ok(a) => a,
                Err(ActorError::NotImplemented) => {
                    if owed > 0 {
                        Action::Call
                    } else {
                        Action::Check
                    }
                }
                Err(err) => {
                    let p = &mut players[seat];
                    tracing::warn!(player = %p.name, error = %err, "actor failed, folding");
                    p.state = PlayerState::Folded;
                    let line = format!("{} folded (connection error)", p.name);
                    round.log(line);
                    to_act[seat] = false;
                    summary.resolved += 1;
                    continue;
                }
            };
            tracing::debug!(seat, player = %players[seat].name, ?action, current_bet, player_bet, "action");

            to_act[seat] = false;
            summary.resolved += 1;

            let reopens = apply_action(round, players, seat, action, current_bet, phase);
            if reopens {
                summary.reopens += 1;
                for (i, p) in players.iter().enumerate() {
                    to_act[i] = i != seat && p.state == PlayerState::Active;
                }
            }
        }
    }
    summary
}

/// Applies one decision. Returns true when it reopens the action.
fn apply_action(
    round: &mut Round,
    players: &mut [Player],
    seat: usize,
    action: Action,
    current_bet: u32,
    phase: PhaseRules,
) -> bool {
    let name = players[seat].name.clone();
    let player_bet = round.round_bets()[seat];
    let owed = current_bet.saturating_sub(player_bet);

    match action {
        Action::Fold => {
            players[seat].state = PlayerState::Folded;
            round.log(format!("{} folded", name));
            false
        }
        Action::Call => {
            if owed == 0 {
                round.log(format!("{} checked", name));
            } else {
                let paid = round.commit(players, seat, owed);
                if paid < owed {
                    round.log(format!("{} called ${} (all-in)", name, paid));
                } else {
                    round.log(format!("{} called ${}", name, owed));
                }
            }
            false
        }
        Action::Check => {
            if owed > 0 {
                let paid = round.commit(players, seat, owed);
                round.log(format!(
                    "{} called ${} (check converted to call)",
                    name, paid
                ));
                false
            } else if current_bet == 0 && !phase.allow_checks && phase.min_bet > 0 {
                let paid = round.commit(players, seat, phase.min_bet);
                if paid < phase.min_bet {
                    round.log(format!(
                        "{} bet ${} (all-in, check converted to min bet)",
                        name, paid
                    ));
                } else {
                    round.log(format!(
                        "{} bet ${} (check converted to min bet)",
                        name, paid
                    ));
                }
                true
            } else if current_bet == 0 && !phase.allow_checks {
                players[seat].state = PlayerState::Folded;
                round.log(format!("{} folded (checks not allowed this round)", name));
                false
            } else {
                round.log(format!("{} checked", name));
                false
            }
        }
        Action::Bet(amt) | Action::Raise(amt) => {
            if amt == 0 {
                call_or_check(round, players, seat, owed, "invalid bet".to_string());
                false
            } else if current_bet == 0 {
                if phase.min_bet > 0 && amt < phase.min_bet {
                    if phase.allow_checks {
                        round.log(format!(
                            "{} checked (bet ${} < min ${})",
                            name, amt, phase.min_bet
                        ));
                    } else {
                        players[seat].state = PlayerState::Folded;
                        round.log(format!(
                            "{} folded (bet ${} < min ${})",
                            name, amt, phase.min_bet
                        ));
                    }
                    return false;
                }
                let wanted = amt - player_bet;
                let paid = round.commit(players, seat, wanted);
                if paid < wanted {
                    round.log(format!("{} bet ${} (all-in)", name, player_bet + paid));
                } else {
                    round.log(format!("{} bet ${}", name, amt));
                }
                true
            } else if amt == player_bet {
                call_or_check(round, players, seat, owed, format!("already at ${}", amt));
                false
            } else if amt <= current_bet {
                call_or_check(
                    round,
                    players,
                    seat,
                    owed,
                    format!("amount ${} insufficient for raise", amt),
                );
                false
            } else {
                let wanted = amt - player_bet;
                let paid = round.commit(players, seat, wanted);
                let total = player_bet + paid;
                if paid == wanted {
                    round.log(format!("{} raised to ${}", name, amt));
                    true
                } else if total > current_bet {
                    round.log(format!("{} raised to ${} (all-in)", name, total));
                    true
                } else {
                    round.log(format!("{} called ${} (all-in)", name, paid));
                    false
                }
            }
        }
    }
}

fn call_or_check(round: &mut Round, players: &mut [Player], seat: usize, owed: u32, note: String) {
    let name = players[seat].name.clone();
    if owed > 0 {
        let paid = round.commit(players, seat, owed);
        round.log(format!("{} called ${} ({})", name, paid, note));
    } else {
        round.log(format!("{} checked ({})", name, note));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::ScriptedActor;

    fn seat(name: &str, chips: u32, script: Vec<Action>) -> Player {
        Player::with_actor(name, chips, Box::new(ScriptedActor::new(script)))
    }

    async fn run(players: &mut [Player], phase: PhaseRules) -> (Round, BettingSummary) {
        let mut round = Round::new(Some(5));
        round.reset(players);
        let summary = betting_round(&mut round, players, phase, 50).await;
        (round, summary)
    }

    #[tokio::test]
    async fn check_around_postflop() {
        let mut players = vec![
            seat("a", 100, vec![Action::Check]),
            seat("b", 100, vec![Action::Check]),
        ];
        let (round, summary) = run(&mut players, PhaseRules::postflop(0)).await;
        assert_eq!(round.pot(), 0);
        assert_eq!(round.history(), &["a checked", "b checked"]);
        assert_eq!(summary.reopens, 0);
    }

    #[tokio::test]
    async fn preflop_check_becomes_min_bet_and_reopens() {
        let mut players = vec![
            seat("a", 100, vec![Action::Check, Action::Check]),
            seat("b", 100, vec![Action::Check]),
        ];
        let (round, summary) = run(&mut players, PhaseRules::preflop(1)).await;
        assert_eq!(
            round.history(),
            &[
                "a bet $1 (check converted to min bet)",
                "b called $1 (check converted to call)",
            ]
        );
        assert_eq!(round.pot(), 2);
        assert_eq!(summary.reopens, 1);
    }

    #[tokio::test]
    async fn forced_min_bet_logs_what_a_short_stack_paid() {
        let mut players = vec![
            seat("a", 3, vec![Action::Check]),
            seat("b", 100, vec![Action::Check]),
        ];
        let (round, _) = run(&mut players, PhaseRules::preflop(5)).await;
        assert_eq!(players[0].state, PlayerState::AllIn);
        assert_eq!(
            round.history(),
            &[
                "a bet $3 (all-in, check converted to min bet)",
                "b called $3 (check converted to call)",
            ]
        );
        assert_eq!(round.pot(), 6);
    }

    #[tokio::test]
    async fn bet_below_minimum_preflop_folds() {
        let mut players = vec![
            seat("a", 100, vec![Action::Bet(3)]),
            seat("b", 100, vec![Action::Check]),
        ];
        let (round, _) = run(&mut players, PhaseRules::preflop(5)).await;
        assert_eq!(players[0].state, PlayerState::Folded);
        assert_eq!(round.history(), &["a folded (bet $3 < min $5)"]);
    }

    #[tokio::test]
    async fn restating_own_bet_after_raise_calls() {
        let mut players = vec![
            seat("a", 100, vec![Action::Bet(10), Action::Bet(10)]),
            seat("b", 100, vec![Action::Raise(30)]),
        ];
        let (round, _) = run(&mut players, PhaseRules::postflop(0)).await;
        assert_eq!(
            round.history().last().map(String::as_str),
            Some("a called $20 (already at $10)")
        );
        assert_eq!(round.pot(), 60);
    }

    #[tokio::test]
    async fn all_in_bet_ends_phase_when_one_active_seat_remains() {
        let mut players = vec![
            seat("a", 100, vec![Action::Check, Action::Call]),
            seat("b", 40, vec![Action::Bet(40)]),
        ];
        let (round, summary) = run(&mut players, PhaseRules::postflop(0)).await;
        assert_eq!(players[1].state, PlayerState::AllIn);
        assert_eq!(players[0].state, PlayerState::Active);
        assert_eq!(players[0].chips, 100);
        assert_eq!(round.history(), &["a checked", "b bet $40"]);
        assert_eq!(round.pot(), 40);
        assert_eq!(summary.resolved, 2);
    }
}
