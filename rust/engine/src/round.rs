use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::betting::PhaseRules;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::{Player, PlayerState};

/// One row of the public player list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: String,
    pub chips: u32,
    pub state: PlayerState,
    pub is_ai: bool,
}

/// What an actor is shown when asked to act.
///
/// Everything here is public table information except `hole_cards`, which
/// holds only the asked player's own two cards. Deck order never appears.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicState {
    pub community: Vec<Card>,
    /// Chips committed across the whole hand, by player name
    pub bets: BTreeMap<String, u32>,
    /// Chips committed in the current betting phase, by player name
    pub round_bets: BTreeMap<String, u32>,
    pub pot: u32,
    pub players: Vec<PlayerView>,
    pub action_history: Vec<String>,
    pub current_player: Option<String>,
    #[serde(default)]
    pub hole_cards: Vec<Card>,
    #[serde(default)]
    pub allow_checks: bool,
    #[serde(default)]
    pub min_bet: u32,
    /// Counts hands dealt by this round, starting at 1
    #[serde(default)]
    pub hand_number: u64,
}

impl PublicState {
    /// Highest phase commitment at the table.
    pub fn current_bet(&self) -> u32 {
        self.round_bets.values().copied().max().unwrap_or(0)
    }

    pub fn round_bet_of(&self, name: &str) -> u32 {
        self.round_bets.get(name).copied().unwrap_or(0)
    }

    /// Chips `name` must add to match the current bet.
    pub fn to_call(&self, name: &str) -> u32 {
        self.current_bet().saturating_sub(self.round_bet_of(name))
    }

    pub fn chips_of(&self, name: &str) -> Option<u32> {
        self.players.iter().find(|p| p.name == name).map(|p| p.chips)
    }
}

/// State owned by a single hand: deck, board, pot, contribution ledgers and
/// the action log. Ledgers are indexed by seat.
#[derive(Debug)]
pub struct Round {
    deck: Deck,
    community: Vec<Card>,
    pot: u32,
    bets: Vec<u32>,
    round_bets: Vec<u32>,
    history: Vec<String>,
    phase: PhaseRules,
    hand_number: u64,
}

impl Round {
    /// `seed` makes every shuffle of this round reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        let deck = match seed {
            Some(s) => Deck::new_with_seed(s),
            None => Deck::new_random(),
        };
        Self {
            deck,
            community: Vec::new(),
            pot: 0,
            bets: Vec::new(),
            round_bets: Vec::new(),
            history: Vec::new(),
            phase: PhaseRules::default(),
            hand_number: 0,
        }
    }

    /// Starts a fresh hand: reshuffles, clears the ledgers and sets every
    /// seat back to active with an empty hand.
    pub fn reset(&mut self, players: &mut [Player]) {
        self.deck.shuffle();
        self.community.clear();
        self.pot = 0;
        self.bets = vec![0; players.len()];
        self.round_bets = vec![0; players.len()];
        self.history.clear();
        self.phase = PhaseRules::default();
        self.hand_number += 1;
        for p in players.iter_mut() {
            p.hand.clear();
            p.state = PlayerState::Active;
        }
    }

    /// Two passes around the table, one card per seat per pass.
    pub fn deal_hole_cards(&mut self, players: &mut [Player]) -> Result<(), GameError> {
        let needed = players.len() * 2;
        if needed > self.deck.remaining() {
            return Err(GameError::InsufficientCards {
                requested: needed,
                remaining: self.deck.remaining(),
            });
        }
        for _ in 0..2 {
            for p in players.iter_mut() {
                p.hand.push(self.deck.draw_one()?);
            }
        }
        Ok(())
    }

    pub fn deal_flop(&mut self) -> Result<(), GameError> {
        self.burn_and_reveal(3)
    }

    pub fn deal_turn(&mut self) -> Result<(), GameError> {
        self.burn_and_reveal(1)
    }

    pub fn deal_river(&mut self) -> Result<(), GameError> {
        self.burn_and_reveal(1)
    }

    fn burn_and_reveal(&mut self, n: usize) -> Result<(), GameError> {
        self.deck.burn()?;
        let cards = self.deck.draw(n)?;
        self.community.extend(cards);
        tracing::debug!(board = %crate::cards::format_cards(&self.community), "board dealt");
        Ok(())
    }

    pub fn reset_round_bets(&mut self) {
        self.round_bets.iter_mut().for_each(|b| *b = 0);
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn pot(&self) -> u32 {
        self.pot
    }

    pub fn bets(&self) -> &[u32] {
        &self.bets
    }

    pub fn round_bets(&self) -> &[u32] {
        &self.round_bets
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Snapshot for `current` (a seat index), or a spectator view for `None`.
    pub fn public_state(&self, players: &[Player], current: Option<usize>) -> PublicState {
        let by_name = |ledger: &[u32]| -> BTreeMap<String, u32> {
            players
                .iter()
                .enumerate()
                .map(|(i, p)| (p.name.clone(), ledger.get(i).copied().unwrap_or(0)))
                .collect()
        };
        let asked = current.and_then(|i| players.get(i));
        PublicState {
            community: self.community.clone(),
            bets: by_name(&self.bets),
            round_bets: by_name(&self.round_bets),
            pot: self.pot,
            players: players
                .iter()
                .map(|p| PlayerView {
                    name: p.name.clone(),
                    chips: p.chips,
                    state: p.state,
                    is_ai: p.is_ai,
                })
                .collect(),
            action_history: self.history.clone(),
            current_player: asked.map(|p| p.name.clone()),
            hole_cards: asked.map(|p| p.hand.clone()).unwrap_or_default(),
            allow_checks: self.phase.allow_checks,
            min_bet: self.phase.min_bet,
            hand_number: self.hand_number,
        }
    }

    pub(crate) fn set_phase(&mut self, phase: PhaseRules) {
        self.phase = phase;
    }

    pub(crate) fn log(&mut self, line: String) {
        tracing::debug!(action = %line, "recorded");
        self.history.push(line);
    }

    /// Moves up to `pay` chips from `seat`'s stack into the pot and returns
    /// what was actually moved. A payment that empties the stack puts the
    /// seat all-in.
    pub(crate) fn commit(&mut self, players: &mut [Player], seat: usize, pay: u32) -> u32 {
        let player = &mut players[seat];
        let pay = pay.min(player.chips);
        player.chips -= pay;
        self.bets[seat] += pay;
        self.round_bets[seat] += pay;
        self.pot += pay;
        if pay > 0 && player.chips == 0 {
            player.state = PlayerState::AllIn;
        }
        debug_assert_eq!(self.pot, self.bets.iter().sum::<u32>());
        pay
    }
}
