//! Utility modules
//!
//! - Structured logging setup and configuration
//! - Lexical path normalization shared by the matrix builders

pub mod logging;
pub mod paths;

pub use logging::{init_default, init_from_env, init_logging, LoggingConfig};
pub use paths::{normalize_relative, resolve_context};
