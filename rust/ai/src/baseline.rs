//! Rule-based opponent.
//!
//! Rates its holding on a 0-10 scale (a preflop table before the flop, the
//! engine evaluator after it), then bets strong hands, calls when the price
//! is right and otherwise checks or folds. Decisions are deterministic; only
//! the optional thinking delay draws from a seeded RNG.

use std::time::Duration;

use async_trait::async_trait;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use shellpoker_engine::actor::{Actor, ActorError};
use shellpoker_engine::cards::Card;
use shellpoker_engine::hand::{best_hand, Category};
use shellpoker_engine::player::Action;
use shellpoker_engine::round::PublicState;
use tracing::debug;

/// Heuristic opponent used for bot seats and simulations.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use shellpoker_ai::BaselineAI;
///
/// let ai = BaselineAI::new().with_think_time(Duration::from_millis(250), 7);
/// assert_eq!(ai.name(), "BaselineAI");
/// ```
#[derive(Debug, Clone)]
pub struct BaselineAI {
    think: Option<Duration>,
    rng: ChaCha20Rng,
}

/// What the bot knows when deciding, pulled out of the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Spot {
    strength: u8,
    to_call: u32,
    current_bet: u32,
    committed: u32,
    stack: u32,
    pot: u32,
    min_bet: u32,
    allow_checks: bool,
}

impl BaselineAI {
    pub fn new() -> Self {
        Self {
            think: None,
            rng: ChaCha20Rng::seed_from_u64(0),
        }
    }

    /// Pauses roughly `base` (between half and one and a half times it)
    /// before every decision.
    pub fn with_think_time(mut self, base: Duration, seed: u64) -> Self {
        self.think = if base.is_zero() { None } else { Some(base) };
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self
    }

    pub fn name(&self) -> &str {
        "BaselineAI"
    }

    /// Preflop rating for two hole cards.
    ///
    /// - 9-10: big pairs, AK suited
    /// - 7-8: TT-99, AK, AQ, KQ suited
    /// - 5-6: 88-77, AJ, AT, KQ, good suited connectors
    /// - 3-4: small pairs, weak aces, broadway junk
    /// - 0-2: everything else
    pub(crate) fn preflop_strength(a: Card, b: Card) -> u8 {
        let (hi, lo) = if a.rank >= b.rank {
            (a.rank.value(), b.rank.value())
        } else {
            (b.rank.value(), a.rank.value())
        };
        let suited = a.suit == b.suit;

        if hi == lo {
            return match hi {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        let offsuit = match (hi, lo) {
            (14, 13) => 8,
            (14, 12) => 7,
            (14, 11) | (13, 12) => 6,
            (14, 10) | (13, 11) | (12, 11) => 5,
            (14, _) | (13, 10) | (12, 10) => 4,
            _ if lo >= 9 && hi >= 11 => 4,
            _ => 2,
        };
        if !suited {
            return offsuit;
        }
        if (hi, lo) == (14, 13) {
            return 10;
        }
        if offsuit == 2 && hi - lo <= 2 {
            return if hi >= 9 { 5 } else { 4 };
        }
        (offsuit + 1).min(9)
    }

    /// Postflop rating from the best five of hole cards plus board.
    ///
    /// Returns `None` before the flop. A hand that is no better than the
    /// board on its own is capped at 2.
    pub(crate) fn postflop_strength(hole: &[Card], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let mut cards = hole.to_vec();
        cards.extend_from_slice(board);
        let value = best_hand(&cards)?;

        let base = match value.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let kicker = match value.tiebreakers.first() {
            Some(&top) if top >= 12 && base < 10 => 1,
            _ => 0,
        };
        let strength = base + kicker;

        if board.len() == 5 && best_hand(board).as_ref() == Some(&value) {
            return Some(strength.min(2));
        }
        Some(strength)
    }

    /// Fraction of the final pot a call would represent.
    pub(crate) fn price(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 0.0;
        }
        to_call as f32 / (pot + to_call) as f32
    }

    fn decide(spot: Spot) -> Action {
        let floor = spot.min_bet.max(1);

        if spot.to_call == 0 {
            let size = match spot.strength {
                9..=10 => (spot.pot * 2 / 3).max(floor),
                7..=8 => (spot.pot / 2).max(floor),
                _ if !spot.allow_checks => floor,
                _ => return Action::Check,
            };
            return Action::Bet(size.min(spot.committed + spot.stack));
        }

        // Calling is all we can afford.
        if spot.to_call >= spot.stack {
            return if spot.strength >= 7 {
                Action::Call
            } else {
                Action::Fold
            };
        }

        if spot.strength >= 9 {
            let target = spot.current_bet + (spot.pot / 2).max(floor);
            if target < spot.committed + spot.stack {
                return Action::Raise(target);
            }
            return Action::Call;
        }
        if spot.strength >= 7 {
            return Action::Call;
        }

        // Rough equity for the weaker buckets.
        let equity = spot.strength as f32 / 12.0;
        if Self::price(spot.pot, spot.to_call) <= equity {
            Action::Call
        } else {
            Action::Fold
        }
    }

    fn read(state: &PublicState) -> Option<Spot> {
        let me = state.current_player.as_deref()?;
        let strength = match state.hole_cards.as_slice() {
            [a, b] => Self::postflop_strength(&state.hole_cards, &state.community)
                .unwrap_or_else(|| Self::preflop_strength(*a, *b)),
            _ => 0,
        };
        Some(Spot {
            strength,
            to_call: state.to_call(me),
            current_bet: state.current_bet(),
            committed: state.round_bet_of(me),
            stack: state.chips_of(me).unwrap_or(0),
            pot: state.pot,
            min_bet: state.min_bet,
            allow_checks: state.allow_checks,
        })
    }
}

impl Default for BaselineAI {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Actor for BaselineAI {
    async fn take_action(&mut self, state: &PublicState) -> Result<Action, ActorError> {
        if let Some(base) = self.think {
            let factor: f64 = self.rng.random_range(0.5..1.5);
            tokio::time::sleep(base.mul_f64(factor)).await;
        }
        let spot = Self::read(state).ok_or(ActorError::Malformed(
            "snapshot names no current player".to_string(),
        ))?;
        let action = Self::decide(spot);
        debug!(
            player = state.current_player.as_deref().unwrap_or(""),
            strength = spot.strength,
            to_call = spot.to_call,
            ?action,
            "baseline decision"
        );
        Ok(action)
    }
}
