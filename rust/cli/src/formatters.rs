//! Terminal rendering of cards, table state and hand results.
//!
//! Cards use suit symbols (`A♠`) where the terminal can show them and the
//! engine's plain notation (`As`) otherwise. Everything returns `String`s or
//! lines; callers decide where they go.

use shellpoker_engine::cards::{Card, Suit};
use shellpoker_engine::round::{PlayerView, PublicState};
use shellpoker_engine::showdown::HandResult;

/// Whether suit symbols are safe to print.
///
/// `SHELLPOKER_ASCII` forces plain letters. On Windows only known modern
/// terminals get symbols.
pub fn supports_unicode() -> bool {
    if std::env::var_os("SHELLPOKER_ASCII").is_some() {
        return false;
    }
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

fn suit_symbol(suit: Suit) -> char {
    match suit {
        Suit::Hearts => '♥',
        Suit::Diamonds => '♦',
        Suit::Clubs => '♣',
        Suit::Spades => '♠',
    }
}

pub fn format_card_with(card: &Card, unicode: bool) -> String {
    if unicode {
        format!("{}{}", card.rank.label(), suit_symbol(card.suit))
    } else {
        card.to_string()
    }
}

/// Bracketed card list, `[]` when empty.
///
/// ```rust
/// # use shellpoker_cli::formatters::format_board_with;
/// use shellpoker_engine::cards::Card;
///
/// let flop: Vec<Card> = ["As", "Kh", "10d"].iter().map(|s| s.parse().unwrap()).collect();
/// assert_eq!(format_board_with(&flop, false), "[As Kh 10d]");
/// assert_eq!(format_board_with(&flop, true), "[A♠ K♥ 10♦]");
/// assert_eq!(format_board_with(&[], true), "[]");
/// ```
pub fn format_board_with(cards: &[Card], unicode: bool) -> String {
    let shown: Vec<String> = cards.iter().map(|c| format_card_with(c, unicode)).collect();
    format!("[{}]", shown.join(" "))
}

/// One line per seat: `  alice   $190  active`.
pub fn format_stacks(players: &[PlayerView]) -> Vec<String> {
    let width = players.iter().map(|p| p.name.len()).max().unwrap_or(0);
    players
        .iter()
        .map(|p| {
            format!(
                "  {:<width$}  ${:<5} {}{}",
                p.name,
                p.chips,
                p.state.as_str(),
                if p.is_ai { " (bot)" } else { "" },
                width = width
            )
        })
        .collect()
}

/// What an interactive player sees when asked to act.
pub fn format_prompt_state(state: &PublicState, unicode: bool) -> Vec<String> {
    let me = state.current_player.as_deref().unwrap_or("");
    let mut lines = vec![
        format!("Board: {}", format_board_with(&state.community, unicode)),
        format!("Pot: ${}", state.pot),
        format!("Your cards: {}", format_board_with(&state.hole_cards, unicode)),
    ];
    lines.extend(format_stacks(&state.players));

    let to_call = state.to_call(me);
    let mine = state.round_bet_of(me);
    if to_call > 0 {
        lines.push(format!(
            "Current bet: ${} (you have ${} in, ${} to call)",
            state.current_bet(),
            mine,
            to_call
        ));
    } else if !state.allow_checks && state.current_bet() == 0 {
        lines.push(format!(
            "No checking this round: bet at least ${} or fold",
            state.min_bet.max(1)
        ));
    } else {
        lines.push("Nothing to call".to_string());
    }
    lines
}

/// End-of-hand report.
pub fn format_hand_summary(result: &HandResult, unicode: bool) -> Vec<String> {
    let mut lines = vec![format!(
        "Board: {}",
        format_board_with(&result.community, unicode)
    )];
    for (name, value) in &result.hands {
        let cards = result
            .all_hands
            .get(name)
            .map(|c| format_board_with(c, unicode))
            .unwrap_or_default();
        lines.push(format!("  {} {} {}", name, cards, value.describe()));
    }
    for (i, pot) in result.side_pots.iter().enumerate() {
        let label = if i == 0 { "Main pot".to_string() } else { format!("Side pot {}", i) };
        if pot.refunded {
            lines.push(format!("{} ${} returned to {}", label, pot.amount, pot.winners.join(", ")));
        } else {
            lines.push(format!("{} ${} won by {}", label, pot.amount, pot.winners.join(", ")));
        }
    }
    lines.push(format!(
        "Winner{}: {} (pot ${})",
        if result.winners.len() == 1 { "" } else { "s" },
        result.winners.join(", "),
        result.pot
    ));
    lines
}
