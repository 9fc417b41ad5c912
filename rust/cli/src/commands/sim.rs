//! `sim`: bots-only session.
//!
//! Seats `bots` baseline players, plays `hands` hands and prints one line
//! per hand plus final stacks. With `--output` every hand is also appended
//! to a JSONL history.

use std::io::Write;
use std::path::PathBuf;

use shellpoker_ai::BaselineAI;
use shellpoker_engine::game::{Table, TableRules};
use shellpoker_engine::logger::{HandLogger, HandRecord};
use shellpoker_engine::player::Player;
use shellpoker_engine::showdown::HandResult;

use crate::config;
use crate::error::CliError;
use crate::formatters::format_stacks;

#[derive(Debug, Clone)]
pub struct SimOptions {
    pub hands: u32,
    pub bots: usize,
    pub seed: u64,
    pub rules: TableRules,
    pub output: Option<PathBuf>,
}

pub fn handle_sim_command(
    hands: u32,
    bots: Option<usize>,
    seed: Option<u64>,
    output: Option<PathBuf>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let cfg = config::load()?;
    let opts = SimOptions {
        hands,
        bots: bots.unwrap_or(cfg.bots),
        seed: seed.or(cfg.seed).unwrap_or_else(rand::random),
        rules: cfg.table_rules(),
        output,
    };
    super::runtime()?.block_on(run_sim(&opts, out))
}

pub async fn run_sim(opts: &SimOptions, out: &mut dyn Write) -> Result<(), CliError> {
    if opts.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    if opts.bots < 2 {
        return Err(CliError::InvalidInput("sim needs at least 2 bots".to_string()));
    }

    let players: Vec<Player> = (1..=opts.bots)
        .map(|i| {
            Player::with_actor(
                format!("bot{}", i),
                opts.rules.starting_chips,
                Box::new(BaselineAI::new()),
            )
            .max_rebuys(opts.rules.max_rebuys)
            .ai(true)
        })
        .collect();
    let table = Table::new(players, opts.rules.clone(), Some(opts.seed))?;

    let mut logger = match &opts.output {
        Some(path) => Some(HandLogger::create(path)?),
        None => None,
    };

    writeln!(
        out,
        "sim: bots={} hands={} seed={}",
        opts.bots, opts.hands, opts.seed
    )?;
    for i in 1..=opts.hands {
        let result = table.play_hand().await?;
        writeln!(out, "Hand {}: {}", i, summary_line(&result))?;
        if let Some(logger) = logger.as_mut() {
            let id = logger.next_id();
            logger.write(&HandRecord::from_result(id, Some(opts.seed), &result))?;
        }
    }

    writeln!(out, "Final stacks:")?;
    for line in format_stacks(&table.standings().await) {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

fn summary_line(result: &HandResult) -> String {
    let shown = result
        .winners
        .first()
        .and_then(|w| result.hands.get(w))
        .map(|v| format!(" with {}", v.describe()))
        .unwrap_or_default();
    format!("{} won ${}{}", result.winners.join(", "), result.pot, shown)
}
