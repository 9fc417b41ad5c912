use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::betting::{active_count, betting_round, contender_count, PhaseRules};
use crate::errors::GameError;
use crate::player::Player;
use crate::round::{PlayerView, Round};
use crate::showdown::{showdown, HandResult};

/// Table-wide economics and phase minimums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableRules {
    pub starting_chips: u32,
    /// Chips given to a broke player who still has rebuys
    pub rebuy_amount: u32,
    /// `None` for unlimited
    pub max_rebuys: Option<u32>,
    pub preflop_min_bet: u32,
    pub postflop_min_bet: u32,
}

impl Default for TableRules {
    fn default() -> Self {
        Self {
            starting_chips: 200,
            rebuy_amount: 50,
            max_rebuys: None,
            preflop_min_bet: 1,
            postflop_min_bet: 0,
        }
    }
}

impl TableRules {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.starting_chips == 0 {
            return Err(GameError::InvalidRules(
                "starting_chips must be positive".to_string(),
            ));
        }
        if self.rebuy_amount == 0 {
            return Err(GameError::InvalidRules(
                "rebuy_amount must be positive".to_string(),
            ));
        }
        if self.preflop_min_bet > self.starting_chips {
            return Err(GameError::InvalidRules(format!(
                "preflop_min_bet {} exceeds starting_chips {}",
                self.preflop_min_bet, self.starting_chips
            )));
        }
        Ok(())
    }

    pub fn preflop(&self) -> PhaseRules {
        PhaseRules::preflop(self.preflop_min_bet)
    }

    pub fn postflop(&self) -> PhaseRules {
        PhaseRules::postflop(self.postflop_min_bet)
    }
}

fn check_seating(players: &[Player]) -> Result<(), GameError> {
    if players.len() < 2 {
        return Err(GameError::NotEnoughPlayers {
            found: players.len(),
        });
    }
    let mut seen = HashSet::new();
    for p in players {
        if !seen.insert(p.name.as_str()) {
            return Err(GameError::DuplicatePlayer(p.name.clone()));
        }
    }
    Ok(())
}

/// Plays one complete hand on `round`: deal, pre-flop betting, flop, turn
/// and river each followed by betting, then showdown.
///
/// The hand goes straight to showdown once a single contender is left. When
/// several contenders remain but fewer than two can still bet (the rest are
/// all-in), the board is run out without further betting. Deck underflow is
/// the only error that can surface once dealing starts.
pub async fn play_hand(
    round: &mut Round,
    players: &mut [Player],
    rules: &TableRules,
) -> Result<HandResult, GameError> {
    check_seating(players)?;

    round.reset(players);
    round.deal_hole_cards(players)?;
    betting_round(round, players, rules.preflop(), rules.rebuy_amount).await;

    let streets: [(&str, fn(&mut Round) -> Result<(), GameError>); 3] = [
        ("flop", Round::deal_flop),
        ("turn", Round::deal_turn),
        ("river", Round::deal_river),
    ];
    for (street, deal) in streets {
        if contender_count(players) <= 1 {
            break;
        }
        deal(round)?;
        if active_count(players) >= 2 {
            tracing::debug!(street, pot = round.pot(), "betting");
            betting_round(round, players, rules.postflop(), rules.rebuy_amount).await;
        }
    }

    Ok(showdown(
        players,
        round.community(),
        round.bets(),
        round.history(),
    ))
}

struct Seats {
    players: Vec<Player>,
    round: Round,
    hands_played: u64,
}

/// A room: seated players plus the gate that lets one hand run at a time.
pub struct Table {
    rules: TableRules,
    seats: Mutex<Seats>,
}

impl Table {
    pub fn new(
        players: Vec<Player>,
        rules: TableRules,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        rules.validate()?;
        let mut seen = HashSet::new();
        for p in &players {
            if !seen.insert(p.name.clone()) {
                return Err(GameError::DuplicatePlayer(p.name.clone()));
            }
        }
        Ok(Self {
            rules,
            seats: Mutex::new(Seats {
                players,
                round: Round::new(seed),
                hands_played: 0,
            }),
        })
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    /// Runs the next hand. Fails with [`GameError::HandInProgress`] instead of
    /// waiting if another hand holds the table.
    pub async fn play_hand(&self) -> Result<HandResult, GameError> {
        let mut seats = self
            .seats
            .try_lock()
            .map_err(|_| GameError::HandInProgress)?;
        let Seats {
            players,
            round,
            hands_played,
        } = &mut *seats;
        let result = play_hand(round, players, &self.rules).await?;
        *hands_played += 1;
        tracing::info!(hand = *hands_played, pot = result.pot, "hand complete");
        Ok(result)
    }

    /// Adds a player between hands.
    pub async fn seat(&self, player: Player) -> Result<(), GameError> {
        let mut seats = self.seats.lock().await;
        if seats.players.iter().any(|p| p.name == player.name) {
            return Err(GameError::DuplicatePlayer(player.name));
        }
        seats.players.push(player);
        Ok(())
    }

    /// Chips and state of every seat as of the last finished hand.
    pub async fn standings(&self) -> Vec<PlayerView> {
        let seats = self.seats.lock().await;
        seats.round.public_state(&seats.players, None).players
    }

    pub async fn hands_played(&self) -> u64 {
        self.seats.lock().await.hands_played
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_valid() {
        assert!(TableRules::default().validate().is_ok());
        let bad = TableRules {
            rebuy_amount: 0,
            ..TableRules::default()
        };
        assert!(matches!(bad.validate(), Err(GameError::InvalidRules(_))));
    }

    #[test]
    fn seating_rejects_duplicates_and_singletons() {
        let one = vec![Player::new("a", 10)];
        assert_eq!(
            check_seating(&one),
            Err(GameError::NotEnoughPlayers { found: 1 })
        );
        let dup = vec![Player::new("a", 10), Player::new("a", 10)];
        assert_eq!(
            check_seating(&dup),
            Err(GameError::DuplicatePlayer("a".to_string()))
        );
    }
}
