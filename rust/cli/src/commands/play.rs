//! `play`: one human against baseline bots.
//!
//! The human seat reads the line protocol from stdin (see
//! [`crate::validation`]) and is folded automatically when it takes longer
//! than the configured action timeout. Table prompts go to the console
//! stream; per-hand results go to `out`.

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use shellpoker_ai::BaselineAI;
use shellpoker_engine::actor::TimedActor;
use shellpoker_engine::game::{Table, TableRules};
use shellpoker_engine::player::Player;
use tokio::io::BufReader;

use crate::config;
use crate::error::CliError;
use crate::formatters::{format_hand_summary, format_stacks, supports_unicode};
use crate::human::{Console, HumanActor, Input};

#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub name: String,
    pub bots: usize,
    pub hands: u32,
    pub seed: u64,
    pub rules: TableRules,
    pub action_timeout: Duration,
    pub think: Duration,
}

pub fn handle_play_command(
    bots: Option<usize>,
    hands: u32,
    seed: Option<u64>,
    name: String,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let opts = PlayOptions {
        name,
        bots: bots.unwrap_or(cfg.bots),
        hands,
        seed: seed.or(cfg.seed).unwrap_or_else(rand::random),
        rules: cfg.table_rules(),
        action_timeout: cfg.action_timeout(),
        think: cfg.think_time(),
    };

    let rt = super::runtime()?;
    let result = rt.block_on(async {
        let input: Input = Box::new(BufReader::new(tokio::io::stdin()));
        let console: Console = Box::new(std::io::stdout());
        run_session(&opts, input, console, out).await
    });
    // A pending stdin read would otherwise keep the runtime alive.
    rt.shutdown_background();
    result.map(|_| ())
}

/// Plays up to `opts.hands` hands, stopping early once the human quits or
/// their input ends. Returns the number of hands played.
pub async fn run_session(
    opts: &PlayOptions,
    input: Input,
    console: Console,
    out: &mut dyn Write,
) -> Result<u32, CliError> {
    if opts.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    if opts.name.trim().is_empty() {
        return Err(CliError::InvalidInput("name must not be empty".to_string()));
    }

    let quit = Arc::new(AtomicBool::new(false));
    let human = HumanActor::new(input, console, quit.clone());
    let mut players = vec![Player::with_actor(
        opts.name.clone(),
        opts.rules.starting_chips,
        Box::new(TimedActor::new(human, opts.action_timeout)),
    )
    .max_rebuys(opts.rules.max_rebuys)];
    for i in 1..=opts.bots {
        let bot = BaselineAI::new().with_think_time(opts.think, opts.seed.wrapping_add(i as u64));
        players.push(
            Player::with_actor(format!("bot{}", i), opts.rules.starting_chips, Box::new(bot))
                .max_rebuys(opts.rules.max_rebuys)
                .ai(true),
        );
    }
    // Duplicate names (a human called "bot1") are rejected here.
    let table = Table::new(players, opts.rules.clone(), Some(opts.seed))?;

    let unicode = supports_unicode();
    writeln!(
        out,
        "play: name={} bots={} hands={} seed={}",
        opts.name, opts.bots, opts.hands, opts.seed
    )?;

    let mut played = 0;
    for i in 1..=opts.hands {
        writeln!(out, "Hand {}", i)?;
        let result = table.play_hand().await?;
        played += 1;
        for line in &result.action_history {
            writeln!(out, "  {}", line)?;
        }
        for line in format_hand_summary(&result, unicode) {
            writeln!(out, "{}", line)?;
        }
        if quit.load(Ordering::SeqCst) {
            writeln!(out, "Leaving the table.")?;
            break;
        }
    }

    writeln!(out, "Stacks after {} hand(s):", played)?;
    for line in format_stacks(&table.standings().await) {
        writeln!(out, "{}", line)?;
    }
    Ok(played)
}
