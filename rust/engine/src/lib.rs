//! # shellpoker-engine: multiplayer Texas Hold'em round engine
//!
//! Runs one hand of no-limit-style Hold'em at a time for any number of seats,
//! asking each seat's [`actor::Actor`] for decisions asynchronously. The
//! engine does no networking, persistence or rendering; front ends read the
//! [`round::PublicState`] snapshot and the [`showdown::HandResult`].
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card), text form and parsing
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Five-card evaluation, best-of-seven and hand descriptions
//! - [`player`] - Seats, per-hand state and the `Action` sum type
//! - [`actor`] - The async decision capability plus scripted and timed actors
//! - [`round`] - Per-hand state: deck, board, pot, ledgers, snapshot
//! - [`betting`] - The betting-phase state machine
//! - [`showdown`] - Side-pot construction and payout
//! - [`game`] - Full hand pipeline, table rules and the per-table gate
//! - [`rules`] - Input validation for interactive front ends
//! - [`logger`] - JSONL hand history
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use shellpoker_engine::cards::Card;
//! use shellpoker_engine::hand::{best_hand, Category};
//!
//! let cards: Vec<Card> = ["Ah", "Kh", "Qh", "Jh", "10h", "2c", "3d"]
//!     .iter()
//!     .map(|s| s.parse().unwrap())
//!     .collect();
//!
//! let value = best_hand(&cards).unwrap();
//! assert_eq!(value.category, Category::StraightFlush);
//! assert_eq!(value.describe(), "Royal Flush");
//! ```
//!
//! ## Playing a hand
//!
//! ```rust
//! use shellpoker_engine::actor::ScriptedActor;
//! use shellpoker_engine::game::{Table, TableRules};
//! use shellpoker_engine::player::{Action, Player};
//!
//! # tokio_test_block_on(async {
//! let alice = Player::with_actor("alice", 100, Box::new(ScriptedActor::new([Action::Bet(10)])));
//! let bob = Player::with_actor("bob", 100, Box::new(ScriptedActor::new([Action::Fold])));
//! let table = Table::new(vec![alice, bob], TableRules::default(), Some(42)).unwrap();
//!
//! let result = table.play_hand().await.unwrap();
//! assert_eq!(result.winners, vec!["alice".to_string()]);
//! assert_eq!(result.pot, 10);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod actor;
pub mod betting;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod round;
pub mod rules;
pub mod showdown;
