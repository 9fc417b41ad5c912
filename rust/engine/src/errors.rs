use thiserror::Error;

/// Engine-level failures. Anything here means the table was misconfigured
/// or a caller broke a precondition; actor misbehaviour never surfaces as a
/// `GameError` (see [`crate::actor::ActorError`]).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Cannot draw {requested} cards from a deck of {remaining}")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("Invalid card: {0:?}")]
    InvalidCard(String),
    #[error("A hand is already in progress at this table")]
    HandInProgress,
    #[error("Need at least 2 players to deal a hand (found {found})")]
    NotEnoughPlayers { found: usize },
    #[error("Player name {0:?} is already seated")]
    DuplicatePlayer(String),
    #[error("Invalid action: {reason}")]
    InvalidAction { reason: String },
    #[error("Invalid table rules: {0}")]
    InvalidRules(String),
}
