//! Command handlers, one module per subcommand.
//!
//! Each handler takes its arguments plus `out`/`err` streams and returns
//! `Result<(), CliError>`. Commands that drive the async engine build their
//! own single-threaded runtime.

pub mod cfg;
pub mod deal;
pub mod eval;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use crate::error::CliError;

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?)
}
