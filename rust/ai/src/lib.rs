//! # shellpoker-ai: automated seats
//!
//! Heuristic opponents that plug into the engine through its
//! [`Actor`](shellpoker_engine::actor::Actor) capability. They see exactly
//! what a human at the table would see: the public snapshot plus their own
//! hole cards.
//!
//! ## Quick Start
//!
//! ```rust
//! use shellpoker_ai::create_ai;
//! use shellpoker_engine::player::Player;
//!
//! let bot = create_ai("baseline").expect("known kind");
//! let seat = Player::with_actor("bot1", 200, bot).ai(true);
//! assert!(seat.is_ai);
//! ```

use shellpoker_engine::actor::Actor;
use thiserror::Error;

pub mod baseline;

pub use baseline::BaselineAI;

/// Names accepted by [`create_ai`].
pub const AI_KINDS: &[&str] = &["baseline"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown AI type: {0} (expected one of: baseline)")]
pub struct UnknownAi(pub String);

/// Builds an automated actor by kind name.
///
/// ```rust
/// use shellpoker_ai::create_ai;
///
/// assert!(create_ai("baseline").is_ok());
/// assert!(create_ai("oracle").is_err());
/// ```
pub fn create_ai(kind: &str) -> Result<Box<dyn Actor>, UnknownAi> {
    match kind {
        "baseline" => Ok(Box::new(BaselineAI::new())),
        other => Err(UnknownAi(other.to_string())),
    }
}
