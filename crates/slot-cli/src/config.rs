//! CLI configuration.
//!
//! Layered with figment: built-in defaults, then a TOML file (`slots.toml` in
//! the working directory unless `--config` names another), then environment
//! variables prefixed `SLOTS_`. Nested keys use a double underscore, e.g.
//! `SLOTS_LOG__LEVEL=debug`.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "slots.toml";

/// What `slots best` computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BestMode {
    /// Most-attended single slot.
    Single,
    /// Two slots maximising distinct attendees.
    #[default]
    Pair,
    /// Greedy two times over both days, counting raw attendance.
    DualDay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON file holding the submitted records.
    pub store_path: PathBuf,
    /// Default mode for `slots best`.
    pub mode: BestMode,
    /// Ignore (and log) slot tokens that are not "HH:MM" half hours.
    pub strict_slots: bool,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON log lines instead of human-readable text.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("slots.json"),
            mode: BestMode::default(),
            strict_slots: false,
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from defaults, `path` (or `slots.toml`), and the environment.
    ///
    /// A missing TOML file is not an error.
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: Option<&Path>) -> Figment {
        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("SLOTS_").split("__"))
    }
}
