use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorError};
use crate::cards::Card;
use crate::round::PublicState;

/// Where a player stands within the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    /// Still acting this hand
    Active,
    /// Out of this hand; cannot win any pot
    Folded,
    /// Whole stack committed; contests pots but no longer acts
    AllIn,
    /// Broke with no rebuys left
    Eliminated,
    /// Transport dropped; treated like an all-in contender until the hand ends
    Disconnected,
}

impl PlayerState {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerState::Active => "active",
            PlayerState::Folded => "folded",
            PlayerState::AllIn => "all-in",
            PlayerState::Eliminated => "eliminated",
            PlayerState::Disconnected => "disconnected",
        }
    }

    /// Still eligible to win chips at showdown.
    pub fn is_contender(self) -> bool {
        !matches!(self, PlayerState::Folded | PlayerState::Eliminated)
    }
}

/// A decision returned by an actor. Amounts on `Bet`/`Raise` are the total
/// the player wants committed in the current betting phase.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", content = "amount", rename_all = "snake_case")]
pub enum Action {
    /// Fold and forfeit the hand
    Fold,
    /// Pass without wagering
    Check,
    /// Match the current bet
    Call,
    /// Open the betting at the given total
    Bet(u32),
    /// Raise the current bet to the given total
    Raise(u32),
}

/// A seat at the table. Chips and rebuy counters persist across hands;
/// `hand` and `state` are reset by [`crate::round::Round::reset`].
pub struct Player {
    pub name: String,
    pub chips: u32,
    pub hand: Vec<Card>,
    pub state: PlayerState,
    pub rebuys: u32,
    /// `None` means unlimited rebuys
    pub max_rebuys: Option<u32>,
    pub is_ai: bool,
    actor: Option<Box<dyn Actor>>,
}

impl Player {
    /// A player with no actor wired up. Such a player always calls when
    /// owing and checks otherwise.
    pub fn new(name: impl Into<String>, chips: u32) -> Self {
        Self {
            name: name.into(),
            chips,
            hand: Vec::new(),
            state: PlayerState::Active,
            rebuys: 0,
            max_rebuys: None,
            is_ai: false,
            actor: None,
        }
    }

    pub fn with_actor(name: impl Into<String>, chips: u32, actor: Box<dyn Actor>) -> Self {
        let mut p = Self::new(name, chips);
        p.actor = Some(actor);
        p
    }

    pub fn max_rebuys(mut self, limit: Option<u32>) -> Self {
        self.max_rebuys = limit;
        self
    }

    pub fn ai(mut self, is_ai: bool) -> Self {
        self.is_ai = is_ai;
        self
    }

    /// True while another rebuy is permitted.
    pub fn can_rebuy(&self) -> bool {
        match self.max_rebuys {
            Some(max) => self.rebuys < max,
            None => true,
        }
    }

    /// Asks the wired actor for a decision.
    pub async fn take_action(&mut self, state: &PublicState) -> Result<Action, ActorError> {
        match self.actor.as_mut() {
            Some(actor) => actor.take_action(state).await,
            None => Err(ActorError::NotImplemented),
        }
    }
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("chips", &self.chips)
            .field("hand", &self.hand)
            .field("state", &self.state)
            .field("rebuys", &self.rebuys)
            .field("max_rebuys", &self.max_rebuys)
            .field("is_ai", &self.is_ai)
            .field("actor", &self.actor.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuy_limit() {
        let mut p = Player::new("a", 0).max_rebuys(Some(1));
        assert!(p.can_rebuy());
        p.rebuys = 1;
        assert!(!p.can_rebuy());
        let unlimited = Player::new("b", 0);
        assert!(unlimited.can_rebuy());
    }

    #[test]
    fn action_json_shape() {
        let s = serde_json::to_string(&Action::Bet(10)).unwrap();
        assert_eq!(s, r#"{"action":"bet","amount":10}"#);
        let f = serde_json::to_string(&Action::Fold).unwrap();
        assert_eq!(f, r#"{"action":"fold"}"#);
    }
}
