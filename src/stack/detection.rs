//! Directory → language and toolchain version

use super::registry::LanguageRegistry;
use super::LanguageId;
use crate::fs::{FileSystem, ManifestReader};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Language and toolchain version detected for one directory.
///
/// `version` is empty when the language was recognised but no manifest
/// declared a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub language: LanguageId,
    pub version: String,
}

pub struct ProjectResolver<'a> {
    fs: &'a dyn FileSystem,
    registry: &'a LanguageRegistry,
}

impl<'a> ProjectResolver<'a> {
    pub fn new(fs: &'a dyn FileSystem, registry: &'a LanguageRegistry) -> Self {
        Self { fs, registry }
    }

    pub fn reader(&self) -> ManifestReader<'a> {
        ManifestReader::new(self.fs)
    }

    /// Classifies `dir` and detects its version.
    ///
    /// `None` when the directory is missing, unlistable, or carries no marker file.
    pub fn resolve(&self, dir: &Path) -> Option<ProjectInfo> {
        if !self.fs.exists(dir) {
            debug!(dir = %dir.display(), "Context directory does not exist");
            return None;
        }

        let names = match self.fs.list_names(dir) {
            Ok(names) => names,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "Context directory not listable");
                return None;
            }
        };

        let language = self.registry.classify(&names)?;
        let version = language
            .detect_version(&self.reader(), dir)
            .unwrap_or_default();

        Some(ProjectInfo {
            language: language.id(),
            version,
        })
    }

    /// Buildpack environment implied by an already resolved project
    pub fn buildpack_env(&self, dir: &Path, info: &ProjectInfo) -> Vec<(String, String)> {
        self.registry
            .get_language(&info.language)
            .map(|language| language.buildpack_env(&self.reader(), dir, &info.version))
            .unwrap_or_default()
    }
}
