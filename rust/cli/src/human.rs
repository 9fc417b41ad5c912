//! Interactive seat driven by a line-oriented reader.
//!
//! Each turn the actor prints the table, then reads commands until one is
//! legal. Illegal or unparsable lines are answered with an error and a new
//! prompt; they never reach the engine. End of input disconnects the seat,
//! `quit` folds it, and both raise the shared quit flag so the session stops
//! after the current hand.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use shellpoker_engine::actor::{Actor, ActorError};
use shellpoker_engine::player::Action;
use shellpoker_engine::round::PublicState;
use shellpoker_engine::rules::validate_action;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::formatters::format_prompt_state;
use crate::validation::{parse_player_action, ParseResult, HELP};

pub type Input = Box<dyn AsyncBufRead + Unpin + Send>;
pub type Console = Box<dyn Write + Send>;

pub struct HumanActor {
    input: Input,
    console: Console,
    quit: Arc<AtomicBool>,
    unicode: bool,
    /// Hand the `seen` cursor belongs to.
    hand: u64,
    /// History lines already shown this hand.
    seen: usize,
}

impl HumanActor {
    pub fn new(input: Input, console: Console, quit: Arc<AtomicBool>) -> Self {
        Self {
            input,
            console,
            quit,
            unicode: crate::formatters::supports_unicode(),
            hand: 0,
            seen: 0,
        }
    }

    pub fn unicode(mut self, on: bool) -> Self {
        self.unicode = on;
        self
    }

    fn say(&mut self, line: &str) -> Result<(), ActorError> {
        writeln!(self.console, "{}", line).map_err(|_| ActorError::Disconnected)
    }

    fn show_table(&mut self, state: &PublicState) -> Result<(), ActorError> {
        if state.hand_number != self.hand || state.action_history.len() < self.seen {
            self.hand = state.hand_number;
            self.seen = 0;
        }
        let fresh: Vec<String> = state.action_history[self.seen..].to_vec();
        self.seen = state.action_history.len();
        for line in fresh {
            self.say(&format!("* {}", line))?;
        }
        for line in format_prompt_state(state, self.unicode) {
            self.say(&line)?;
        }
        Ok(())
    }

    async fn read_line(&mut self) -> Result<Option<String>, ActorError> {
        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .await
            .map_err(|_| ActorError::Disconnected)?;
        Ok(if n == 0 { None } else { Some(line) })
    }
}

#[async_trait]
impl Actor for HumanActor {
    async fn take_action(&mut self, state: &PublicState) -> Result<Action, ActorError> {
        if self.quit.load(Ordering::SeqCst) {
            return Ok(Action::Fold);
        }
        let me = state.current_player.clone().unwrap_or_default();
        let chips = state.chips_of(&me).unwrap_or(0);
        self.show_table(state)?;

        loop {
            write!(self.console, "{}> ", me).map_err(|_| ActorError::Disconnected)?;
            self.console.flush().map_err(|_| ActorError::Disconnected)?;

            let Some(line) = self.read_line().await? else {
                self.quit.store(true, Ordering::SeqCst);
                return Err(ActorError::Disconnected);
            };
            match parse_player_action(&line) {
                ParseResult::Quit => {
                    self.quit.store(true, Ordering::SeqCst);
                    return Ok(Action::Fold);
                }
                ParseResult::Help => self.say(HELP)?,
                ParseResult::Invalid(msg) => self.say(&format!("Error: {}", msg))?,
                ParseResult::Action(action) => match validate_action(state, chips, action) {
                    Ok(action) => return Ok(action),
                    Err(e) => self.say(&format!("Error: {}", e))?,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shellpoker_engine::player::PlayerState;
    use shellpoker_engine::round::PlayerView;
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Console that tests can read back.
    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Shared {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn actor(script: &str) -> (HumanActor, Shared, Arc<AtomicBool>) {
        let console = Shared::default();
        let quit = Arc::new(AtomicBool::new(false));
        let a = HumanActor::new(
            Box::new(Cursor::new(script.as_bytes().to_vec())),
            Box::new(console.clone()),
            quit.clone(),
        )
        .unicode(false);
        (a, console, quit)
    }

    fn facing_ten() -> PublicState {
        let mut s = PublicState::default();
        s.current_player = Some("me".to_string());
        s.round_bets.insert("me".to_string(), 0);
        s.round_bets.insert("bot1".to_string(), 10);
        s.allow_checks = true;
        s.action_history = vec!["bot1 bet $10".to_string()];
        s.hand_number = 1;
        s.players = vec![PlayerView {
            name: "me".to_string(),
            chips: 100,
            state: PlayerState::Active,
            is_ai: false,
        }];
        s
    }

    #[tokio::test]
    async fn reprompts_until_legal() {
        let (mut a, console, _) = actor("dance\ncheck\nraise 5\nraise 30\n");
        let action = a.take_action(&facing_ten()).await.unwrap();
        assert_eq!(action, Action::Raise(30));

        let text = console.text();
        assert!(text.contains("* bot1 bet $10"));
        assert!(text.contains("Error: Unrecognized action 'dance'"));
        assert!(text.contains("cannot check facing $10"));
        assert_eq!(text.matches("me> ").count(), 4);
    }

    #[tokio::test]
    async fn quit_folds_and_raises_flag() {
        let (mut a, _, quit) = actor("q\n");
        assert_eq!(a.take_action(&facing_ten()).await, Ok(Action::Fold));
        assert!(quit.load(Ordering::SeqCst));
        assert_eq!(a.take_action(&facing_ten()).await, Ok(Action::Fold));
    }

    #[tokio::test]
    async fn end_of_input_disconnects() {
        let (mut a, _, quit) = actor("");
        assert_eq!(
            a.take_action(&facing_ten()).await,
            Err(ActorError::Disconnected)
        );
        assert!(quit.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn history_is_not_repeated() {
        let (mut a, console, _) = actor("call\ncall\n");
        let mut s = facing_ten();
        a.take_action(&s).await.unwrap();
        s.action_history.push("me called $10".to_string());
        s.action_history.push("bot1 raised to $20".to_string());
        a.take_action(&s).await.unwrap();
        let text = console.text();
        assert_eq!(text.matches("* bot1 bet $10").count(), 1);
        assert_eq!(text.matches("* bot1 raised to $20").count(), 1);
    }

    #[tokio::test]
    async fn next_hand_shows_its_whole_history() {
        let (mut a, console, _) = actor("call\ncall\n");
        let mut first = facing_ten();
        first.action_history = vec![
            "bot1 bet $10".to_string(),
            "bot2 called $10".to_string(),
            "bot3 called $10".to_string(),
        ];
        a.take_action(&first).await.unwrap();

        let mut second = facing_ten();
        second.hand_number = 2;
        second.round_bets.insert("bot1".to_string(), 40);
        second.action_history = vec![
            "bot1 bet $10".to_string(),
            "bot2 raised to $40".to_string(),
            "bot3 called $40".to_string(),
        ];
        a.take_action(&second).await.unwrap();

        let text = console.text();
        assert_eq!(text.matches("* bot1 bet $10").count(), 2);
        assert!(text.contains("* bot2 raised to $40"));
        assert!(text.contains("* bot3 called $40"));
    }
}
