//! Runtime configuration, read once at startup from the environment.
//!
//! | Variable                          | Default                           |
//! |-----------------------------------|-----------------------------------|
//! | `GLUCOSCOPE_MODEL_PATH`           | `models/diabetes_model.json`      |
//! | `GLUCOSCOPE_DATASET_PATH`         | `diabetes_prediction_dataset.csv` |
//! | `GLUCOSCOPE_SCHEMA`               | `ordinal`                         |
//! | `GLUCOSCOPE_REQUIRE_MODEL_DIGEST` | `false`                           |
//! | `GLUCOSCOPE_RESULT_DELAY_MS`      | `2000`                            |
//! | `GLUCOSCOPE_LOG_MODE`             | `auto`                            |
//! | `GLUCOSCOPE_LOG_FILE`             | `glucoscope.log`                  |
//!
//! Unset variables take their default; set but unparsable values are errors.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::SchemaVariant;

pub const MODEL_PATH_ENV: &str = "GLUCOSCOPE_MODEL_PATH";
pub const DATASET_PATH_ENV: &str = "GLUCOSCOPE_DATASET_PATH";
pub const SCHEMA_ENV: &str = "GLUCOSCOPE_SCHEMA";
pub const REQUIRE_MODEL_DIGEST_ENV: &str = "GLUCOSCOPE_REQUIRE_MODEL_DIGEST";
pub const RESULT_DELAY_ENV: &str = "GLUCOSCOPE_RESULT_DELAY_MS";
pub const LOG_MODE_ENV: &str = "GLUCOSCOPE_LOG_MODE";
pub const LOG_FILE_ENV: &str = "GLUCOSCOPE_LOG_FILE";

/// Upper limit for the cosmetic result delay.
const MAX_RESULT_DELAY_MS: u64 = 60_000;

/// Error type for configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    /// File when attached to a terminal, stdout otherwise.
    #[default]
    Auto,
    File,
    Stdout,
}

impl LogMode {
    /// Resolve `Auto` against whether stdout is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

impl FromStr for LogMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            _ => Err("expected auto, file or stdout".into()),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Tree ensemble export
    pub model_path: PathBuf,

    /// Reference dataset used for input bounds
    pub dataset_path: PathBuf,

    /// Feature schema the model was trained against
    pub schema: SchemaVariant,

    /// Refuse models without a `.sha256` pin
    pub require_model_digest: bool,

    /// Fake progress duration before the result is shown
    pub result_delay: Duration,

    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/diabetes_model.json"),
            dataset_path: PathBuf::from("diabetes_prediction_dataset.csv"),
            schema: SchemaVariant::Ordinal,
            require_model_digest: false,
            result_delay: Duration::from_millis(2000),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("glucoscope.log"),
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for any set but unparsable variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for any set but unparsable variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup(MODEL_PATH_ENV) {
            config.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup(DATASET_PATH_ENV) {
            config.dataset_path = PathBuf::from(path);
        }
        if let Some(value) = lookup(SCHEMA_ENV) {
            config.schema = value
                .parse()
                .map_err(|reason| invalid(SCHEMA_ENV, &value, reason))?;
        }
        if let Some(value) = lookup(REQUIRE_MODEL_DIGEST_ENV) {
            config.require_model_digest = parse_bool(&value)
                .ok_or_else(|| invalid(REQUIRE_MODEL_DIGEST_ENV, &value, "expected a boolean".into()))?;
        }
        if let Some(value) = lookup(RESULT_DELAY_ENV) {
            let ms: u64 = value.trim().parse().map_err(|_| {
                invalid(RESULT_DELAY_ENV, &value, "expected milliseconds".into())
            })?;
            if ms > MAX_RESULT_DELAY_MS {
                return Err(invalid(
                    RESULT_DELAY_ENV,
                    &value,
                    format!("must be at most {MAX_RESULT_DELAY_MS}"),
                ));
            }
            config.result_delay = Duration::from_millis(ms);
        }
        if let Some(value) = lookup(LOG_MODE_ENV) {
            config.log_mode = value
                .parse()
                .map_err(|reason| invalid(LOG_MODE_ENV, &value, reason))?;
        }
        if let Some(path) = lookup(LOG_FILE_ENV) {
            config.log_file = PathBuf::from(path);
        }

        Ok(config)
    }
}

fn invalid(var: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: value.to_string(),
        reason,
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "" | "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}
