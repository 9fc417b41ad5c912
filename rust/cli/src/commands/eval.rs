//! `eval`: best five-card hand among the given cards.

use std::collections::HashSet;
use std::io::Write;

use shellpoker_engine::cards::{format_cards, Card};
use shellpoker_engine::hand::best_hand;

use crate::error::CliError;

pub fn handle_eval_command(
    cards: &[String],
    json: bool,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let parsed = cards
        .iter()
        .map(|s| s.parse::<Card>())
        .collect::<Result<Vec<_>, _>>()?;

    if !(5..=7).contains(&parsed.len()) {
        return Err(CliError::InvalidInput(format!(
            "need 5 to 7 cards, got {}",
            parsed.len()
        )));
    }
    let mut seen = HashSet::new();
    if let Some(dup) = parsed.iter().find(|c| !seen.insert(**c)) {
        return Err(CliError::InvalidInput(format!("duplicate card {}", dup)));
    }

    let value = best_hand(&parsed)
        .ok_or_else(|| CliError::InvalidInput("need at least 5 cards".to_string()))?;

    if json {
        let doc = serde_json::json!({
            "cards": parsed.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            "category": value.category.name(),
            "rank": value.category.value(),
            "tiebreakers": value.tiebreakers,
            "description": value.describe(),
        });
        writeln!(out, "{}", serde_json::to_string(&doc)?)?;
        return Ok(());
    }

    let tiebreakers: Vec<String> = value.tiebreakers.iter().map(|t| t.to_string()).collect();
    writeln!(out, "Cards: {}", format_cards(&parsed))?;
    writeln!(out, "Hand: {}", value.describe())?;
    writeln!(
        out,
        "Category: {} ({})",
        value.category.name(),
        value.category.value()
    )?;
    writeln!(out, "Tiebreakers: {}", tiebreakers.join(" "))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn wheel_text() {
        let mut out = Vec::new();
        handle_eval_command(&args(&["Ac", "2d", "3h", "4s", "5c"]), false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Hand: Straight, 5 high (Wheel)"));
        assert!(text.contains("Category: Straight (4)"));
        assert!(text.contains("Tiebreakers: 5\n"));
    }

    #[test]
    fn duplicates_and_garbage_are_rejected() {
        let mut out = Vec::new();
        assert!(matches!(
            handle_eval_command(&args(&["Ac", "Ac", "3h", "4s", "5c"]), false, &mut out),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            handle_eval_command(&args(&["Ac", "Zz", "3h", "4s", "5c"]), false, &mut out),
            Err(CliError::InvalidInput(_))
        ));
        assert!(matches!(
            handle_eval_command(&args(&["Ac", "3h", "4s", "5c"]), false, &mut out),
            Err(CliError::InvalidInput(_))
        ));
    }
}
