use crate::errors::GameError;
use crate::player::Action;
use crate::round::PublicState;

/// Chips the asked player needs to add to stay in.
pub fn to_call(state: &PublicState) -> u32 {
    match state.current_player.as_deref() {
        Some(name) => state.to_call(name),
        None => 0,
    }
}

/// Validates an action typed by an interactive player before it is handed
/// to the engine.
///
/// The betting round tolerates anything and degrades bad input to the
/// nearest legal action; front ends call this first so the player sees a
/// reason and can try again. A valid `Bet` facing a wager is returned as
/// `Raise`, a valid `Raise` into an unopened pot as `Bet`, and a `Call`
/// with nothing owed is judged (and returned) as a `Check`.
///
/// # Examples
///
/// ```
/// use shellpoker_engine::player::Action;
/// use shellpoker_engine::round::PublicState;
/// use shellpoker_engine::rules::validate_action;
///
/// let mut state = PublicState::default();
/// state.current_player = Some("alice".to_string());
/// state.round_bets.insert("alice".to_string(), 0);
/// state.round_bets.insert("bob".to_string(), 10);
///
/// assert!(validate_action(&state, 100, Action::Check).is_err());
/// assert_eq!(validate_action(&state, 100, Action::Bet(30)).unwrap(), Action::Raise(30));
/// assert!(validate_action(&state, 100, Action::Raise(10)).is_err());
/// ```
pub fn validate_action(state: &PublicState, chips: u32, action: Action) -> Result<Action, GameError> {
    let invalid = |reason: String| GameError::InvalidAction { reason };
    let name = state
        .current_player
        .as_deref()
        .ok_or_else(|| invalid("it is not your turn".to_string()))?;
    let current = state.current_bet();
    let mine = state.round_bet_of(name);
    let owed = current.saturating_sub(mine);

    match action {
        Action::Fold => Ok(action),
        Action::Call if owed > 0 => Ok(action),
        Action::Call | Action::Check => {
            if owed > 0 {
                Err(invalid(format!("cannot check facing ${}; call or fold", owed)))
            } else if current == 0 && !state.allow_checks {
                Err(invalid(format!(
                    "checks are not allowed this round; bet at least ${}",
                    state.min_bet.max(1)
                )))
            } else {
                Ok(Action::Check)
            }
        }
        Action::Bet(amount) | Action::Raise(amount) => {
            if amount == 0 {
                return Err(invalid("amount must be positive".to_string()));
            }
            if amount > mine.saturating_add(chips) {
                return Err(invalid(format!(
                    "you only have ${} (already in ${})",
                    chips, mine
                )));
            }
            if current == 0 {
                if amount < state.min_bet {
                    return Err(invalid(format!("minimum bet is ${}", state.min_bet)));
                }
                Ok(Action::Bet(amount))
            } else if amount <= current {
                Err(invalid(format!(
                    "raise must exceed the current bet of ${}",
                    current
                )))
            } else {
                Ok(Action::Raise(amount))
            }
        }
    }
}
