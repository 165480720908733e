//! Per-ecosystem language definitions
//!
//! A definition knows which marker files claim a directory for its ecosystem
//! and how to pull a toolchain version out of that ecosystem's manifests.
//! Version detection is best-effort: a manifest that fails to parse is logged
//! and skipped, and the next candidate source is tried.

mod go;
mod java;
mod node;
mod python;
mod rust;

pub use go::GoLanguage;
pub use java::{java_version_to_bp_jvm, JavaLanguage};
pub use node::NodeLanguage;
pub use python::PythonLanguage;
pub use rust::RustLanguage;

use crate::fs::ManifestReader;
use crate::stack::LanguageId;
use std::path::Path;

pub trait LanguageDefinition: Send + Sync {
    fn id(&self) -> LanguageId;

    /// Files whose presence in a directory claims it for this language
    fn marker_files(&self) -> &[&str];

    /// Toolchain version declared by the manifests in `dir`
    fn detect_version(&self, reader: &ManifestReader<'_>, dir: &Path) -> Option<String>;

    /// Buildpack environment derived from the project in `dir`
    fn buildpack_env(
        &self,
        _reader: &ManifestReader<'_>,
        _dir: &Path,
        _version: &str,
    ) -> Vec<(String, String)> {
        vec![]
    }

    fn matches(&self, file_names: &[String]) -> bool {
        self.marker_files()
            .iter()
            .any(|marker| file_names.iter().any(|name| name == marker))
    }
}
