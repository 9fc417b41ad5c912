//! `deal`: shuffle, deal every seat two cards and run out the board.

use std::io::Write;

use shellpoker_engine::cards::format_cards;
use shellpoker_engine::player::Player;
use shellpoker_engine::round::Round;

use crate::error::CliError;

/// Prints the seed, one `Hole P<n>:` line per seat and the board, using
/// the same burn-and-deal order as a real hand.
pub fn handle_deal_command(
    seed: Option<u64>,
    players: usize,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if players < 2 {
        return Err(CliError::InvalidInput("players must be >= 2".to_string()));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let mut round = Round::new(Some(seed));
    let mut seats: Vec<Player> = (1..=players)
        .map(|i| Player::new(format!("P{}", i), 0))
        .collect();

    round.reset(&mut seats);
    round.deal_hole_cards(&mut seats)?;
    round.deal_flop()?;
    round.deal_turn()?;
    round.deal_river()?;

    writeln!(out, "Seed: {}", seed)?;
    for p in &seats {
        writeln!(out, "Hole {}: {}", p.name, format_cards(&p.hand))?;
    }
    writeln!(out, "Board: {}", format_cards(round.community()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_cards() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        handle_deal_command(Some(12345), 3, &mut a).unwrap();
        handle_deal_command(Some(12345), 3, &mut b).unwrap();
        assert_eq!(a, b);

        let text = String::from_utf8(a).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "Seed: 12345");
        assert!(lines[3].starts_with("Hole P3: "));
        assert_eq!(lines[4].trim_start_matches("Board: ").split(' ').count(), 5);
    }

    #[test]
    fn one_player_is_rejected() {
        let mut out = Vec::new();
        assert!(matches!(
            handle_deal_command(Some(1), 1, &mut out),
            Err(CliError::InvalidInput(_))
        ));
    }

    #[test]
    fn deck_runs_dry_with_too_many_seats() {
        let mut out = Vec::new();
        assert!(matches!(
            handle_deal_command(Some(1), 23, &mut out),
            Err(CliError::Engine(_))
        ));
        assert!(out.is_empty());
    }
}
