//! Runtime configuration, read from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `STOCKROOM_STORE_PATH` | snapshot file for the record store | in-memory store |
//! | `STOCKROOM_CURRENCY` | ISO 4217 code used to display prices | `PHP` |

use std::env;
use std::io::ErrorKind;
use std::path::PathBuf;

use rusty_money::iso::{self, Currency};
use thiserror::Error;
use tracing::debug;

pub const STORE_PATH_VAR: &str = "STOCKROOM_STORE_PATH";
pub const CURRENCY_VAR: &str = "STOCKROOM_CURRENCY";
pub const DEFAULT_CURRENCY: &str = "PHP";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("failed to load .env file")]
    DotEnv(#[from] dotenvy::Error),
}

/// Where products are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreLocation {
    /// Nothing survives the process.
    #[default]
    InMemory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StockroomConfig {
    pub store: StoreLocation,
    pub currency: &'static Currency,
}

impl Default for StockroomConfig {
    fn default() -> Self {
        Self {
            store: StoreLocation::InMemory,
            currency: iso::PHP,
        }
    }
}

impl StockroomConfig {
    /// Load `.env` if present, then read the `STOCKROOM_*` variables.
    ///
    /// A missing `.env` is fine; one that exists but cannot be read or parsed is an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        check_dotenv(dotenvy::dotenv())?;
        Self::from_vars(env::var(STORE_PATH_VAR).ok(), env::var(CURRENCY_VAR).ok())
    }

    /// Build from raw variable values; empty values count as unset.
    pub fn from_vars(
        store_path: Option<String>,
        currency: Option<String>,
    ) -> Result<Self, ConfigError> {
        let store = match store_path.filter(|p| !p.trim().is_empty()) {
            Some(path) => StoreLocation::File(PathBuf::from(path)),
            None => StoreLocation::InMemory,
        };

        let code = currency
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        let currency = iso::find(&code).ok_or(ConfigError::UnknownCurrency(code))?;

        Ok(Self { store, currency })
    }

    pub fn with_store(mut self, store: StoreLocation) -> Self {
        self.store = store;
        self
    }
}

fn check_dotenv<T>(loaded: Result<T, dotenvy::Error>) -> Result<(), ConfigError> {
    match loaded {
        Ok(_) => {
            debug!("loaded .env file");
            Ok(())
        }
        Err(dotenvy::Error::Io(err)) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}
