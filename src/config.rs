//! Run configuration
//!
//! Everything the run needs from its environment is gathered here once, at
//! the entrypoint. The assembler and everything below it receive plain values
//! and never read the process environment.
//!
//! # Environment Variables
//!
//! - `SKAFFOLD_FILE`: build configuration path - default: "skaffold.yaml"
//! - `GITHUB_OUTPUT`: key=value output file - default: stdout
//! - `PIPELINE_CONTEXT_LOG_LEVEL`: logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use pipeline_context::RunConfig;
//!
//! let config = RunConfig::from_env().with_default_builder("my/builder");
//! println!("{}", config.repo_root().display());
//! ```

use crate::pipeline::DEFAULT_BUILDER;
use crate::util::logging::{parse_level, LOG_LEVEL_ENV};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

pub const BUILD_CONFIG_ENV: &str = "SKAFFOLD_FILE";
pub const OUTPUT_ENV: &str = "GITHUB_OUTPUT";
pub const DEFAULT_BUILD_CONFIG: &str = "skaffold.yaml";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Valid options: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub build_config_path: PathBuf,
    /// `None` writes to stdout
    pub output_path: Option<PathBuf>,
    pub default_builder: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BUILD_CONFIG, None)
    }
}

impl RunConfig {
    pub fn new(build_config_path: impl Into<PathBuf>, output_path: Option<PathBuf>) -> Self {
        Self {
            build_config_path: build_config_path.into(),
            output_path,
            default_builder: DEFAULT_BUILDER.to_string(),
        }
    }

    /// Reads `SKAFFOLD_FILE` and `GITHUB_OUTPUT`. Empty values count as unset.
    pub fn from_env() -> Self {
        let build_config_path = non_empty_var(BUILD_CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_CONFIG));
        let output_path = non_empty_var(OUTPUT_ENV).map(PathBuf::from);

        Self::new(build_config_path, output_path)
    }

    pub fn with_build_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.build_config_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_default_builder(mut self, builder: impl Into<String>) -> Self {
        self.default_builder = builder.into();
        self
    }

    /// Directory holding the build configuration; contexts are relative to it
    pub fn repo_root(&self) -> PathBuf {
        match self.build_config_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.is_empty())
}

/// Picks the log level: explicit flag, then `-v`/`-q`, then
/// `PIPELINE_CONTEXT_LOG_LEVEL`, then info.
///
/// Only an invalid explicit flag is an error; an unparsable environment value
/// falls back to info.
pub fn resolve_log_level(
    explicit: Option<&str>,
    verbose: bool,
    quiet: bool,
) -> Result<Level, ConfigError> {
    if let Some(level) = explicit {
        return parse_level(level).ok_or_else(|| ConfigError::InvalidLogLevel(level.to_string()));
    }
    if verbose {
        return Ok(Level::DEBUG);
    }
    if quiet {
        return Ok(Level::ERROR);
    }

    Ok(env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|value| parse_level(&value))
        .unwrap_or(Level::INFO))
}
