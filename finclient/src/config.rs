//! Application configuration.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

// =============================================================================
// Configuration
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the JSON snapshot
    pub data_path: PathBuf,

    /// Log output format
    pub log_format: LogFormat,

    /// Default number of entries for the upcoming-deadline query
    pub upcoming_count: usize,

    /// Environment (test, development, production)
    pub environment: Environment,
}

/// Environment type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Test environment
    Test,
    /// Development environment
    Development,
    /// Production environment
    Production,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Pretty,
    /// One JSON object per line
    Json,
}

impl Config {
    /// Default snapshot location, relative to the working directory
    pub const DEFAULT_DATA_PATH: &'static str = "data/finclient.json";

    /// Default size of the upcoming-deadline list
    pub const DEFAULT_UPCOMING_COUNT: usize = 5;

    /// Load configuration from environment variables.
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Self::load_environment(&lookup)?;
        let log_format = Self::load_log_format(&lookup)?;
        let upcoming_count = Self::load_upcoming_count(&lookup)?;
        let data_path = lookup("FINCLIENT_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(Self::DEFAULT_DATA_PATH));

        Ok(Self {
            data_path,
            log_format,
            upcoming_count,
            environment,
        })
    }

    /// Create test configuration.
    pub fn test() -> Self {
        Self {
            data_path: env::temp_dir().join("finclient-test.json"),
            log_format: LogFormat::Pretty,
            upcoming_count: Self::DEFAULT_UPCOMING_COUNT,
            environment: Environment::Test,
        }
    }

    fn load_environment(lookup: &impl Fn(&str) -> Option<String>) -> AppResult<Environment> {
        let env_str = lookup("FINCLIENT_ENV").unwrap_or_else(|| "development".to_string());

        match env_str.to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(AppError::Config(format!(
                "Invalid FINCLIENT_ENV: {}. Expected: test, development, production",
                other
            ))),
        }
    }

    fn load_log_format(lookup: &impl Fn(&str) -> Option<String>) -> AppResult<LogFormat> {
        let format = lookup("FINCLIENT_LOG_FORMAT").unwrap_or_else(|| "pretty".to_string());

        match format.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "Invalid FINCLIENT_LOG_FORMAT: {}. Expected: pretty, json",
                other
            ))),
        }
    }

    fn load_upcoming_count(lookup: &impl Fn(&str) -> Option<String>) -> AppResult<usize> {
        match lookup("FINCLIENT_UPCOMING_COUNT") {
            Some(val) => val.trim().parse::<usize>().map_err(|_| {
                AppError::Config(format!("Invalid FINCLIENT_UPCOMING_COUNT value: {}", val))
            }),
            None => Ok(Self::DEFAULT_UPCOMING_COUNT),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(Self::DEFAULT_DATA_PATH),
            log_format: LogFormat::Pretty,
            upcoming_count: Self::DEFAULT_UPCOMING_COUNT,
            environment: Environment::Development,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
