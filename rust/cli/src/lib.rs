//! # Shellpoker CLI Library
//!
//! Terminal front end for the shellpoker engine: deal and evaluate hands,
//! run bot simulations and play against bots over stdin.
//!
//! The entry point is [`run`], which parses arguments and writes to the
//! streams it is given, so tests can drive it without a process.
//!
//! ```
//! use std::io;
//! let args = vec!["shellpoker", "eval", "As", "Ks", "Qs", "Js", "10s"];
//! let code = shellpoker_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `deal`: deal one hand's hole cards and board
//! - `eval`: best five-card hand among 5-7 cards
//! - `sim`: bots-only session, optional JSONL history
//! - `play`: one human on stdin against bots
//! - `cfg`: resolved configuration and value sources

use std::io::Write;

use clap::Parser;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod human;
pub mod logging;
mod macros;
pub mod ui;
pub mod validation;

use cli::{Commands, ShellpokerCli};
use commands::{
    handle_cfg_command, handle_deal_command, handle_eval_command, handle_play_command,
    handle_sim_command,
};

pub use error::CliError;

/// Parse `args` and run the chosen subcommand.
///
/// Returns `0` on success and `2` on any error; errors are written to `err`
/// prefixed with `Error:`.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match ShellpokerCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                if write!(out, "{}", e).is_err() {
                    return exit_code::ERROR;
                }
                return exit_code::SUCCESS;
            }
            write_or_exit!(err, "{}", e);
            write_or_exit!(err, "Usage: shellpoker <command> [options]\n");
            write_or_exit!(err, "Commands:");
            for c in Commands::NAMES {
                write_or_exit!(err, "  {}", c);
            }
            write_or_exit!(err, "\nFor full help, run: shellpoker --help");
            return exit_code::ERROR;
        }
    };

    logging::init_logging(cli.verbose);

    let outcome = match cli.cmd {
        Commands::Deal { seed, players } => handle_deal_command(seed, players, out),
        Commands::Eval { cards, json } => handle_eval_command(&cards, json, out),
        Commands::Sim {
            hands,
            bots,
            seed,
            output,
        } => handle_sim_command(hands, bots, seed, output, out),
        Commands::Play {
            bots,
            hands,
            seed,
            name,
        } => handle_play_command(bots, hands, seed, name, out),
        // cfg reports its own failure before returning it
        Commands::Cfg => match handle_cfg_command(out, err) {
            Err(CliError::Config(_)) => return exit_code::ERROR,
            other => other,
        },
    };

    match outcome {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
