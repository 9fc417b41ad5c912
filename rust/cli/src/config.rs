//! Layered CLI configuration.
//!
//! Values start at their defaults, are overridden by the TOML file named in
//! `SHELLPOKER_CONFIG`, then by individual `SHELLPOKER_*` variables. Every
//! field remembers which layer set it so `cfg` can show it.

use std::fmt;
use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shellpoker_engine::game::TableRules;

pub const ENV_CONFIG: &str = "SHELLPOKER_CONFIG";
pub const ENV_SEED: &str = "SHELLPOKER_SEED";
pub const ENV_BOTS: &str = "SHELLPOKER_BOTS";
pub const ENV_STARTING_CHIPS: &str = "SHELLPOKER_STARTING_CHIPS";
pub const ENV_MAX_REBUYS: &str = "SHELLPOKER_MAX_REBUYS";
pub const ENV_ACTION_TIMEOUT_SECS: &str = "SHELLPOKER_ACTION_TIMEOUT_SECS";
pub const ENV_THINK_MS: &str = "SHELLPOKER_THINK_MS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub bots: usize,
    pub starting_chips: u32,
    pub rebuy_amount: u32,
    /// `None` means unlimited.
    pub max_rebuys: Option<u32>,
    pub action_timeout_secs: u64,
    pub think_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let rules = TableRules::default();
        Self {
            seed: None,
            bots: 3,
            starting_chips: rules.starting_chips,
            rebuy_amount: rules.rebuy_amount,
            max_rebuys: rules.max_rebuys,
            action_timeout_secs: 30,
            think_ms: 0,
        }
    }
}

impl Config {
    /// Table rules for a session started from this configuration.
    pub fn table_rules(&self) -> TableRules {
        TableRules {
            starting_chips: self.starting_chips,
            rebuy_amount: self.rebuy_amount,
            max_rebuys: self.max_rebuys,
            ..TableRules::default()
        }
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_secs(self.action_timeout_secs)
    }

    pub fn think_time(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub bots: ValueSource,
    pub starting_chips: ValueSource,
    pub rebuy_amount: ValueSource,
    pub max_rebuys: ValueSource,
    pub action_timeout_secs: ValueSource,
    pub think_ms: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            bots: ValueSource::Default,
            starting_chips: ValueSource::Default,
            rebuy_amount: ValueSource::Default,
            max_rebuys: ValueSource::Default,
            action_timeout_secs: ValueSource::Default,
            think_ms: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env_value(ENV_CONFIG) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.bots {
            cfg.bots = v;
            sources.bots = ValueSource::File;
        }
        if let Some(v) = f.starting_chips {
            cfg.starting_chips = v;
            sources.starting_chips = ValueSource::File;
        }
        if let Some(v) = f.rebuy_amount {
            cfg.rebuy_amount = v;
            sources.rebuy_amount = ValueSource::File;
        }
        if let Some(v) = f.max_rebuys {
            cfg.max_rebuys = Some(v);
            sources.max_rebuys = ValueSource::File;
        }
        if let Some(v) = f.action_timeout_secs {
            cfg.action_timeout_secs = v;
            sources.action_timeout_secs = ValueSource::File;
        }
        if let Some(v) = f.think_ms {
            cfg.think_ms = v;
            sources.think_ms = ValueSource::File;
        }
    }

    if let Some(seed) = env_value(ENV_SEED) {
        cfg.seed = Some(parse_env(ENV_SEED, &seed)?);
        sources.seed = ValueSource::Env;
    }
    if let Some(bots) = env_value(ENV_BOTS) {
        cfg.bots = parse_env(ENV_BOTS, &bots)?;
        sources.bots = ValueSource::Env;
    }
    if let Some(chips) = env_value(ENV_STARTING_CHIPS) {
        cfg.starting_chips = parse_env(ENV_STARTING_CHIPS, &chips)?;
        sources.starting_chips = ValueSource::Env;
    }
    if let Some(limit) = env_value(ENV_MAX_REBUYS) {
        cfg.max_rebuys = match limit.to_ascii_lowercase().as_str() {
            "unlimited" | "none" => None,
            _ => Some(parse_env(ENV_MAX_REBUYS, &limit)?),
        };
        sources.max_rebuys = ValueSource::Env;
    }
    if let Some(secs) = env_value(ENV_ACTION_TIMEOUT_SECS) {
        cfg.action_timeout_secs = parse_env(ENV_ACTION_TIMEOUT_SECS, &secs)?;
        sources.action_timeout_secs = ValueSource::Env;
    }
    if let Some(ms) = env_value(ENV_THINK_MS) {
        cfg.think_ms = parse_env(ENV_THINK_MS, &ms)?;
        sources.think_ms = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    bots: Option<usize>,
    #[serde(default)]
    starting_chips: Option<u32>,
    #[serde(default)]
    rebuy_amount: Option<u32>,
    #[serde(default)]
    max_rebuys: Option<u32>,
    #[serde(default)]
    action_timeout_secs: Option<u64>,
    #[serde(default)]
    think_ms: Option<u64>,
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {:?}", key, raw)))
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.bots == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bots must be >= 1".into(),
        ));
    }
    if cfg.action_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: action_timeout_secs must be > 0".into(),
        ));
    }
    cfg.table_rules()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const ALL: &[&str] = &[
        ENV_CONFIG,
        ENV_SEED,
        ENV_BOTS,
        ENV_STARTING_CHIPS,
        ENV_MAX_REBUYS,
        ENV_ACTION_TIMEOUT_SECS,
        ENV_THINK_MS,
    ];

    fn clear_env() {
        for key in ALL {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn defaults_when_nothing_is_set() {
        clear_env();
        let r = load_with_sources().expect("load");
        assert_eq!(r.config, Config::default());
        assert_eq!(r.sources.bots, ValueSource::Default);
        assert_eq!(r.config.table_rules(), TableRules::default());
    }

    #[test]
    #[serial]
    fn file_then_env_layering() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().expect("tmp");
        writeln!(file, "bots = 5\nstarting_chips = 500\nmax_rebuys = 2").expect("write");
        std::env::set_var(ENV_CONFIG, file.path());
        std::env::set_var(ENV_BOTS, "4");

        let r = load_with_sources().expect("load");
        assert_eq!(r.config.bots, 4);
        assert_eq!(r.sources.bots, ValueSource::Env);
        assert_eq!(r.config.starting_chips, 500);
        assert_eq!(r.sources.starting_chips, ValueSource::File);
        assert_eq!(r.config.max_rebuys, Some(2));
        assert_eq!(r.sources.seed, ValueSource::Default);
        clear_env();
    }

    #[test]
    #[serial]
    fn unlimited_rebuys_from_env() {
        clear_env();
        std::env::set_var(ENV_MAX_REBUYS, "unlimited");
        let r = load_with_sources().expect("load");
        assert_eq!(r.config.max_rebuys, None);
        assert_eq!(r.sources.max_rebuys, ValueSource::Env);
        clear_env();
    }

    #[test]
    #[serial]
    fn bad_values_are_rejected() {
        clear_env();
        std::env::set_var(ENV_SEED, "forty-two");
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();

        std::env::set_var(ENV_STARTING_CHIPS, "0");
        assert!(matches!(load(), Err(ConfigError::Invalid(_))));
        clear_env();

        std::env::set_var(ENV_ACTION_TIMEOUT_SECS, "0");
        assert!(load().is_err());
        clear_env();
    }

    #[test]
    #[serial]
    fn unknown_file_keys_fail_to_parse() {
        clear_env();
        let mut file = tempfile::NamedTempFile::new().expect("tmp");
        writeln!(file, "level = 3").expect("write");
        std::env::set_var(ENV_CONFIG, file.path());
        assert!(matches!(load(), Err(ConfigError::Parse(_))));
        clear_env();
    }
}
