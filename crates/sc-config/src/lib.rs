//! # sc-config
//!
//! Layered configuration loading for signcount using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SIGNCOUNT_*` prefix, `__` as separator)
//! 2. Project-level `.signcount/config.toml`
//! 3. User-level `~/.config/signcount/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SIGNCOUNT_COUNTER__MINIMUM_OVERLAP` -> `counter.minimum_overlap`,
//! `SIGNCOUNT_CORPUS__ROOT` -> `corpus.root`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sc_config::SignConfig;
//!
//! let config = SignConfig::load_with_dotenv().expect("config");
//! println!("minimum overlap: {} ms", config.counter.minimum_overlap);
//! ```

mod corpus;
mod counter;
mod database;
mod error;

pub use corpus::CorpusConfig;
pub use counter::CounterConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SignConfig {
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

impl SignConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".signcount/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("SIGNCOUNT_").split("__"))
    }

    /// Reject values the pipeline cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.corpus.file_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "corpus.file_timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.corpus.extension.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "corpus.extension".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.counter.region_column.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "counter.region_column".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("signcount").join("config.toml"))
    }
}
