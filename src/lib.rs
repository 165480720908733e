//! pipeline-context - build matrix detection for CI pipelines
//!
//! Reads the artifacts declared in a skaffold-style build configuration,
//! detects the language and toolchain version of each artifact's context,
//! discovers Helm charts, and produces the pipeline context that CI jobs fan
//! out over.
//!
//! # Example Usage
//!
//! ```no_run
//! use pipeline_context::fs::RealFileSystem;
//! use pipeline_context::output::{OutputTarget, OutputWriter};
//! use pipeline_context::pipeline::PipelineAssembler;
//! use pipeline_context::stack::LanguageRegistry;
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let fs = RealFileSystem::new();
//! let registry = LanguageRegistry::with_defaults();
//!
//! let ctx = PipelineAssembler::new(&fs, &registry)
//!     .assemble_from_file(Path::new("skaffold.yaml"), Path::new("."))?;
//!
//! OutputWriter::new(OutputTarget::Stdout).emit(&ctx)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`stack`]: language markers, version detectors, and directory resolution
//! - [`charts`]: Helm chart discovery
//! - [`build_config`]: the build configuration document
//! - [`pipeline`]: matrix, build plan, and context assembly
//! - [`output`]: the emitted schema and key=value writer
//! - [`consumers`]: readers for the emitted context used by downstream jobs

pub mod build_config;
pub mod charts;
pub mod cli;
pub mod config;
pub mod consumers;
pub mod fs;
pub mod output;
pub mod pipeline;
pub mod stack;
pub mod util;

pub use build_config::{ArtifactDeclaration, BuildConfig, BuildConfigError};
pub use config::{ConfigError, RunConfig};
pub use output::{IntegrationMatrixEntry, MatrixEntry, OutputWriter, PipelineContext};
pub use pipeline::PipelineAssembler;
pub use stack::{LanguageId, LanguageRegistry, ProjectInfo, ProjectResolver};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "pipeline-context");
    }
}
