//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "shellpoker",
    version,
    about = "Texas Hold'em at the terminal: play against bots, simulate, inspect hands"
)]
pub struct ShellpokerCli {
    /// Debug logs from the engine on stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deal one hand's hole cards and the full board
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 2)]
        players: usize,
    },
    /// Evaluate the best five-card hand among 5 to 7 cards
    Eval {
        /// Cards such as As Kd 10h 9c 2s
        #[arg(required = true, num_args = 5..=7)]
        cards: Vec<String>,
        /// Print the hand value as JSON
        #[arg(long)]
        json: bool,
    },
    /// Let bots play hands against each other
    Sim {
        #[arg(long, default_value_t = 10)]
        hands: u32,
        /// Defaults to the configured bot count (at least 2 are needed)
        #[arg(long)]
        bots: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Append one JSON line per hand to this file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Play against bots, reading actions from stdin
    Play {
        #[arg(long)]
        bots: Option<usize>,
        #[arg(long, default_value_t = 1)]
        hands: u32,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value = "you")]
        name: String,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

impl Commands {
    pub const NAMES: &'static [&'static str] = &["deal", "eval", "sim", "play", "cfg"];
}
