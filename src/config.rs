//! Configuration management for polyrepo
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Provider credentials are never stored anywhere else; the token is read
//! from the environment and forwarded as-is on each request.
//!
//! # Environment Variables
//!
//! - `POLYREPO_SUPERPROJECT`: superproject repository URL - **required**
//! - `POLYREPO_BRANCH`: branch to analyze - default: "main"
//! - `POLYREPO_TOKEN`: GitHub bearer token - optional, falls back to `GITHUB_TOKEN`
//! - `POLYREPO_REQUEST_TIMEOUT`: timeout in seconds - default: "30"
//! - `POLYREPO_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use polyrepo::PolyrepoConfig;
//! use std::env;
//!
//! env::set_var("POLYREPO_SUPERPROJECT", "https://github.com/acme/widget");
//!
//! let config = PolyrepoConfig::from_env().expect("Invalid configuration");
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default values for configuration
const DEFAULT_BRANCH: &str = "main";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Environment variable names
const ENV_SUPERPROJECT: &str = "POLYREPO_SUPERPROJECT";
const ENV_BRANCH: &str = "POLYREPO_BRANCH";
const ENV_TOKEN: &str = "POLYREPO_TOKEN";
const ENV_TOKEN_FALLBACK: &str = "GITHUB_TOKEN";
const ENV_REQUEST_TIMEOUT: &str = "POLYREPO_REQUEST_TIMEOUT";
const ENV_LOG_LEVEL: &str = "POLYREPO_LOG_LEVEL";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Superproject URL not specified
    #[error("Superproject not specified. Set the POLYREPO_SUPERPROJECT environment variable")]
    MissingSuperproject,

    /// Failed to parse a configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for polyrepo
///
/// Holds everything the CLI needs to run one analysis: which repository and
/// branch to look at, the optional token, and runtime parameters.
#[derive(Debug, Clone)]
pub struct PolyrepoConfig {
    /// Superproject repository URL
    pub superproject_url: String,

    /// Branch to analyze
    pub branch: String,

    /// Bearer token forwarded on every GitHub request, when present
    pub token: Option<String>,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl PolyrepoConfig {
    /// Loads configuration from the environment
    ///
    /// Fails with [`ConfigError::MissingSuperproject`] when
    /// `POLYREPO_SUPERPROJECT` is unset or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let superproject_url = env::var(ENV_SUPERPROJECT)
            .ok()
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingSuperproject)?;

        Self::from_env_with_url(superproject_url)
    }

    /// Loads configuration from the environment around a known superproject URL
    ///
    /// Used when the URL arrives from somewhere other than the environment,
    /// such as a CLI argument.
    pub fn from_env_with_url(superproject_url: String) -> Result<Self, ConfigError> {
        let branch = env::var(ENV_BRANCH)
            .ok()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BRANCH.to_string());

        // An empty token variable counts as no token at all.
        let token = env::var(ENV_TOKEN)
            .ok()
            .or_else(|| env::var(ENV_TOKEN_FALLBACK).ok())
            .filter(|value| !value.is_empty());

        let request_timeout_secs = match env::var(ENV_REQUEST_TIMEOUT) {
            Ok(value) => value.parse::<u64>().map_err(|e| ConfigError::ParseError {
                field: ENV_REQUEST_TIMEOUT.to_string(),
                error: e.to_string(),
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let log_level = env::var(ENV_LOG_LEVEL)
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        Ok(Self {
            superproject_url,
            branch,
            token,
            request_timeout_secs,
            log_level,
        })
    }

    /// Checks the loaded values for consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.superproject_url.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "superproject URL is empty".to_string(),
            ));
        }
        if self.branch.is_empty() {
            return Err(ConfigError::ValidationFailed("branch is empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
