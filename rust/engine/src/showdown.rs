use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::{best_hand, HandValue};
use crate::player::Player;

/// One layer of the pot, by seat index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidePot {
    pub amount: u32,
    /// Seats that put chips into this layer
    pub contributors: Vec<usize>,
    /// Contributors still able to win it
    pub eligible: Vec<usize>,
}

/// How one layer was settled, by player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub eligible: Vec<String>,
    /// Who was paid from this layer. When nobody was eligible this lists the
    /// contributors who got their chips back.
    pub winners: Vec<String>,
    #[serde(default)]
    pub refunded: bool,
}

/// Outcome of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResult {
    /// Contenders holding the best hand overall. Side pots may have paid
    /// others; see `payouts`.
    pub winners: Vec<String>,
    pub pot: u32,
    /// Contenders' best hands, present once three board cards are out
    pub hands: BTreeMap<String, HandValue>,
    pub all_hands: BTreeMap<String, Vec<Card>>,
    pub community: Vec<Card>,
    pub action_history: Vec<String>,
    pub side_pots: Vec<PotAward>,
    /// Chips each player received at settlement
    pub payouts: BTreeMap<String, u32>,
}

/// Splits per-seat hand contributions into layered pots.
///
/// Each pass takes the smallest remaining nonzero contribution, forms a pot
/// of that amount from every seat still contributing, and subtracts it.
///
/// # Examples
///
/// ```
/// use shellpoker_engine::showdown::build_side_pots;
///
/// let pots = build_side_pots(&[20, 60, 100], &[true, true, true]);
/// let amounts: Vec<u32> = pots.iter().map(|p| p.amount).collect();
/// assert_eq!(amounts, vec![60, 80, 40]);
/// assert_eq!(pots[2].eligible, vec![2]);
/// ```
pub fn build_side_pots(contributions: &[u32], contenders: &[bool]) -> Vec<SidePot> {
    let mut remaining = contributions.to_vec();
    let mut pots = Vec::new();
    while let Some(layer) = remaining.iter().copied().filter(|&c| c > 0).min() {
        let contributors: Vec<usize> = remaining
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(i, _)| i)
            .collect();
        for &i in &contributors {
            remaining[i] -= layer;
        }
        let eligible = contributors
            .iter()
            .copied()
            .filter(|&i| contenders.get(i).copied().unwrap_or(false))
            .collect();
        pots.push(SidePot {
            amount: layer * contributors.len() as u32,
            contributors,
            eligible,
        });
    }
    pots
}

/// Evaluates contenders, settles every pot layer and credits the winners.
///
/// `bets` holds each seat's contribution for the whole hand; the pot is their
/// sum. A layer with no eligible contender goes back to its contributors.
/// Split pots divide evenly and the odd chips go one at a time to the tied
/// winners in seat order.
pub fn showdown(
    players: &mut [Player],
    community: &[Card],
    bets: &[u32],
    action_history: &[String],
) -> HandResult {
    let contenders: Vec<bool> = players.iter().map(|p| p.state.is_contender()).collect();

    // Without a flop nobody can be ranked and every contender ties.
    let values: Vec<Option<HandValue>> = players
        .iter()
        .map(|p| {
            if p.hand.len() >= 2 && community.len() >= 3 {
                let mut cards = p.hand.clone();
                cards.extend_from_slice(community);
                best_hand(&cards)
            } else {
                None
            }
        })
        .collect();

    let mut payouts = vec![0u32; players.len()];
    let mut side_pots = Vec::new();

    for pot in build_side_pots(bets, &contenders) {
        if pot.amount == 0 {
            continue;
        }
        let names = |seats: &[usize]| -> Vec<String> {
            seats.iter().map(|&i| players[i].name.clone()).collect()
        };
        if pot.eligible.is_empty() {
            // Every contributor folded: nobody contested these chips.
            let each = pot.amount / pot.contributors.len() as u32;
            for &i in &pot.contributors {
                payouts[i] += each;
            }
            tracing::debug!(amount = pot.amount, "uncalled layer returned");
            side_pots.push(PotAward {
                amount: pot.amount,
                eligible: Vec::new(),
                winners: names(&pot.contributors),
                refunded: true,
            });
            continue;
        }

        let best = pot
            .eligible
            .iter()
            .map(|&i| &values[i])
            .max()
            .cloned()
            .flatten();
        let winners: Vec<usize> = pot
            .eligible
            .iter()
            .copied()
            .filter(|&i| values[i] == best)
            .collect();
        let n = winners.len() as u32;
        let share = pot.amount / n;
        let rem = (pot.amount % n) as usize;
        for (k, &i) in winners.iter().enumerate() {
            payouts[i] += share + u32::from(k < rem);
        }
        side_pots.push(PotAward {
            amount: pot.amount,
            eligible: names(&pot.eligible),
            winners: names(&winners),
            refunded: false,
        });
    }

    for (p, &won) in players.iter_mut().zip(&payouts) {
        p.chips += won;
    }

    let best_overall = players
        .iter()
        .zip(&values)
        .filter(|(p, _)| p.state.is_contender())
        .map(|(_, v)| v)
        .max()
        .cloned()
        .flatten();
    let winners: Vec<String> = players
        .iter()
        .zip(&values)
        .filter(|(p, v)| p.state.is_contender() && **v == best_overall)
        .map(|(p, _)| p.name.clone())
        .collect();

    let hands = players
        .iter()
        .zip(&values)
        .filter(|(p, _)| p.state.is_contender())
        .filter_map(|(p, v)| v.clone().map(|v| (p.name.clone(), v)))
        .collect();
    let all_hands = players
        .iter()
        .map(|p| (p.name.clone(), p.hand.clone()))
        .collect();
    let payouts_by_name = players
        .iter()
        .zip(&payouts)
        .filter(|&(_, &won)| won > 0)
        .map(|(p, &won)| (p.name.clone(), won))
        .collect();

    let pot: u32 = bets.iter().sum();
    debug_assert_eq!(pot, payouts.iter().sum::<u32>());
    tracing::info!(pot, winners = ?winners, "hand settled");

    HandResult {
        winners,
        pot,
        hands,
        all_hands,
        community: community.to_vec(),
        action_history: action_history.to_vec(),
        side_pots,
        payouts: payouts_by_name,
    }
}
