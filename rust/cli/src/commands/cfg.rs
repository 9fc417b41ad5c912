//! `cfg`: print the resolved configuration as JSON.
//!
//! ```json
//! {
//!   "bots": { "value": 3, "source": "default" },
//!   "seed": { "value": 42, "source": "env" },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::ui;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(e.into());
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": { "value": config.seed, "source": sources.seed },
        "bots": { "value": config.bots, "source": sources.bots },
        "starting_chips": { "value": config.starting_chips, "source": sources.starting_chips },
        "rebuy_amount": { "value": config.rebuy_amount, "source": sources.rebuy_amount },
        "max_rebuys": { "value": config.max_rebuys, "source": sources.max_rebuys },
        "action_timeout_secs": {
            "value": config.action_timeout_secs,
            "source": sources.action_timeout_secs,
        },
        "think_ms": { "value": config.think_ms, "source": sources.think_ms },
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&display)?)?;
    Ok(())
}
