//! Structured logging setup
//!
//! Diagnostics are written to stderr through `tracing`. Stdout is reserved for
//! the key=value output channel, so nothing in this module may write to it.
//!
//! # Example
//!
//! ```no_run
//! use pipeline_context::util::logging;
//! use tracing::{info, warn};
//!
//! logging::init_default();
//!
//! info!(image = "api", "Resolving artifact");
//! warn!("Non-fatal problem");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the default log level
pub const LOG_LEVEL_ENV: &str = "PIPELINE_CONTEXT_LOG_LEVEL";

/// Environment variable switching to JSON log lines
pub const LOG_JSON_ENV: &str = "PIPELINE_CONTEXT_LOG_JSON";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum log level to display
    pub level: Level,

    /// Emit JSON lines instead of human-readable text
    pub use_json: bool,

    /// Include the module target (e.g., pipeline_context::charts) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Level from [`LOG_LEVEL_ENV`] and JSON mode from [`LOG_JSON_ENV`].
    ///
    /// Unknown values fall back to the defaults.
    pub fn from_env() -> Self {
        let level = env::var(LOG_LEVEL_ENV)
            .ok()
            .and_then(|v| parse_level(&v))
            .unwrap_or(Level::INFO);

        let use_json = env::var(LOG_JSON_ENV)
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }
}

/// Parses a case-insensitive level name
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" | "warning" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Installs the global subscriber. Only the first call has any effect.
///
/// `RUST_LOG`, when set, takes precedence over `config.level`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(config.include_target)
            .with_file(config.include_location)
            .with_line_number(config.include_location);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json())
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.without_time())
                .init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

pub fn init_from_env() {
    init_logging(LoggingConfig::from_env());
}
