//! Context assembly
//!
//! [`PipelineAssembler`] drives the passes in order: one detection run per
//! artifact, the artifact and chart matrix, the build plan, then the language
//! and version aggregates. Chart discovery runs before assembly.

pub mod assembler;
pub mod integration;
pub mod matrix;

pub use assembler::{collect_languages, representative_versions, PipelineAssembler};
pub use integration::{image_suffix, merge_env, IntegrationMatrixBuilder, DEFAULT_BUILDER};
pub use matrix::{chart_matrix_entry, MatrixBuilder, ResolvedArtifact};
