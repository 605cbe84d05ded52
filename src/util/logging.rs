//! Structured logging setup for polyrepo
//!
//! Initialization and configuration for structured logging on the `tracing`
//! ecosystem. Console output by default, optional JSON output for
//! production, configurable via `RUST_LOG` and `POLYREPO_LOG_LEVEL`. The
//! library itself only emits events; installing a subscriber is the
//! binary's job, so embedding callers keep full control of their logging.
//!
//! # Example
//!
//! ```no_run
//! use polyrepo::util::logging;
//!
//! logging::init_default();
//!
//! use tracing::info;
//! info!("starting analysis");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., polyrepo::github) in logs
    pub include_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
        }
    }
}

impl LoggingConfig {
    /// Creates a logging configuration with the specified level
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }
}

/// Parses a log level from a string, falling back to INFO
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Initializes logging with the given configuration
///
/// Safe to call more than once; only the first call installs a subscriber.
/// An explicit `RUST_LOG` always wins over the configured level.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();

        if env::var("RUST_LOG").is_err() {
            filter = filter
                .add_directive(format!("polyrepo={}", config.level).parse().unwrap())
                .add_directive("hyper=warn".parse().unwrap())
                .add_directive("reqwest=warn".parse().unwrap());
        }

        let registry = tracing_subscriber::registry().with(filter);

        if config.use_json {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            registry
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

/// Initializes logging with the default configuration
pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Initializes logging from the `POLYREPO_LOG_LEVEL` environment variable
pub fn init_from_env() {
    let level_str = env::var("POLYREPO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_logging(LoggingConfig::with_level(parse_level(&level_str)));
}
