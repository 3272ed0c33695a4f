//! Environment configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::history::DEFAULT_HISTORY_CAPACITY;

const ENV_PREFIX: &str = "COTIZADOR_";

#[derive(Debug, Clone, Deserialize)]
pub struct CotizadorConfig {
    /// Rate table file (`;`-delimited)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: PathBuf,

    /// JSON file holding recent quotes
    #[serde(default = "default_history_path")]
    pub history_path: PathBuf,

    /// Number of recent quotes kept
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// tracing filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/servicios.csv")
}

fn default_history_path() -> PathBuf {
    PathBuf::from("data/historial.json")
}

fn default_history_capacity() -> usize {
    DEFAULT_HISTORY_CAPACITY
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl CotizadorConfig {
    /// Load from `COTIZADOR_*` variables, reading `.env` first if present
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }
}

impl Default for CotizadorConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path(),
            history_path: default_history_path(),
            history_capacity: default_history_capacity(),
            log_filter: default_log_filter(),
        }
    }
}
