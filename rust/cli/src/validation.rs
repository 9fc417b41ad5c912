//! Parsing of the interactive line protocol.
//!
//! One command per line, case-insensitive:
//! `fold`/`f`, `check`/`k`, `call`/`c`, `bet N`/`b N`, `raise N`/`r N`,
//! `help`/`?`, `quit`/`q`. Amounts are round-level totals: `raise 40` means
//! "make my bet this round 40".

use shellpoker_engine::player::Action;

/// Result of parsing one input line.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(Action),
    Help,
    Quit,
    Invalid(String),
}

/// Parse a line typed by the player.
///
/// # Example
///
/// ```rust
/// # use shellpoker_cli::validation::{parse_player_action, ParseResult};
/// use shellpoker_engine::player::Action;
///
/// assert_eq!(parse_player_action("fold"), ParseResult::Action(Action::Fold));
/// assert_eq!(parse_player_action("BET 25"), ParseResult::Action(Action::Bet(25)));
/// assert_eq!(parse_player_action("q"), ParseResult::Quit);
///
/// match parse_player_action("dance") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    let Some(&verb) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };

    match verb {
        "q" | "quit" | "exit" => ParseResult::Quit,
        "?" | "h" | "help" => ParseResult::Help,
        "fold" | "f" => ParseResult::Action(Action::Fold),
        "check" | "k" => ParseResult::Action(Action::Check),
        "call" | "c" => ParseResult::Action(Action::Call),
        "bet" | "b" => parse_amount(&parts, "Bet").map_or_else(ParseResult::Invalid, |a| {
            ParseResult::Action(Action::Bet(a))
        }),
        "raise" | "r" => parse_amount(&parts, "Raise").map_or_else(ParseResult::Invalid, |a| {
            ParseResult::Action(Action::Raise(a))
        }),
        _ => ParseResult::Invalid(format!(
            "Unrecognized action '{}'. Valid actions: fold, check, call, bet <amount>, raise <amount>, quit",
            verb
        )),
    }
}

fn parse_amount(parts: &[&str], what: &str) -> Result<u32, String> {
    let raw = parts.get(1).ok_or_else(|| {
        format!(
            "{} requires an amount (e.g., '{} 20')",
            what,
            what.to_lowercase()
        )
    })?;
    match raw.trim_start_matches('$').parse::<u32>() {
        Ok(0) => Err(format!("{} amount must be positive", what)),
        Ok(amount) => Ok(amount),
        Err(_) => Err(format!("Invalid {} amount", what.to_lowercase())),
    }
}

/// Text shown for `help`.
pub const HELP: &str = "\
Commands:
  fold, f            give up the hand
  check, k           pass when nothing is owed
  call, c            match the current bet
  bet N, b N         open the betting at N
  raise N, r N       raise your total bet this round to N
  quit, q            fold and leave after this hand";
