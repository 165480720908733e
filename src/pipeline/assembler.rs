use super::integration::{IntegrationMatrixBuilder, DEFAULT_BUILDER};
use super::matrix::{chart_matrix_entry, MatrixBuilder};
use crate::build_config::{ArtifactDeclaration, BuildConfig, BuildConfigError};
use crate::charts::discover_charts;
use crate::config::RunConfig;
use crate::fs::FileSystem;
use crate::output::{MatrixEntry, PipelineContext};
use crate::stack::{LanguageId, LanguageRegistry, ProjectResolver};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Runs the detection passes over one repository and aggregates the result
pub struct PipelineAssembler<'a> {
    fs: &'a dyn FileSystem,
    registry: &'a LanguageRegistry,
    default_builder: String,
}

impl<'a> PipelineAssembler<'a> {
    pub fn new(fs: &'a dyn FileSystem, registry: &'a LanguageRegistry) -> Self {
        Self {
            fs,
            registry,
            default_builder: DEFAULT_BUILDER.to_string(),
        }
    }

    pub fn from_config(
        fs: &'a dyn FileSystem,
        registry: &'a LanguageRegistry,
        config: &RunConfig,
    ) -> Self {
        Self::new(fs, registry).with_default_builder(config.default_builder.clone())
    }

    pub fn with_default_builder(mut self, builder: impl Into<String>) -> Self {
        self.default_builder = builder.into();
        self
    }

    /// Loads the build configuration at `config_path`, discovers charts under
    /// `repo_root` on disk, and assembles. A missing file yields an empty context.
    pub fn assemble_from_file(
        &self,
        config_path: &Path,
        repo_root: &Path,
    ) -> Result<PipelineContext, BuildConfigError> {
        match BuildConfig::load(config_path)? {
            Some(config) => {
                let chart_paths = discover_charts(repo_root);
                Ok(self.assemble(config.artifacts(), chart_paths, repo_root))
            }
            None => {
                warn!("{} not found", config_path.display());
                Ok(PipelineContext::empty())
            }
        }
    }

    /// Builds the context from declared artifacts and already discovered
    /// chart paths. Every file access goes through the assembler's [`FileSystem`].
    pub fn assemble(
        &self,
        artifacts: &[ArtifactDeclaration],
        chart_paths: Vec<String>,
        repo_root: &Path,
    ) -> PipelineContext {
        let start = Instant::now();
        info!(
            "Assembling pipeline context for {} artifact(s) in {}",
            artifacts.len(),
            repo_root.display()
        );

        let resolver = ProjectResolver::new(self.fs, self.registry);

        let resolved = MatrixBuilder::new(&resolver).resolve(artifacts, repo_root);

        let mut matrix = MatrixBuilder::entries(&resolved);
        debug!(entries = matrix.len(), "Artifact matrix built");
        matrix.extend(chart_paths.iter().map(|path| chart_matrix_entry(path)));

        let integration_matrix = IntegrationMatrixBuilder::new(self.fs, &resolver)
            .with_default_builder(self.default_builder.clone())
            .build(&resolved, &chart_paths);
        debug!(
            entries = integration_matrix.len(),
            "Integration matrix built"
        );

        let languages = collect_languages(&matrix);
        let versions = representative_versions(&matrix);

        info!(
            "Pipeline context complete: {} matrix entries, {} chart(s), {} build step(s) in {:?}",
            matrix.len(),
            chart_paths.len(),
            integration_matrix.len(),
            start.elapsed()
        );

        PipelineContext {
            matrix,
            languages,
            versions,
            chart_paths,
            integration_matrix,
        }
    }
}

/// Distinct non-empty languages, sorted by name
pub fn collect_languages(matrix: &[MatrixEntry]) -> Vec<String> {
    matrix
        .iter()
        .map(|entry| entry.language.as_str().to_string())
        .filter(|language| !language.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Greatest version string per language.
///
/// Strings are compared lexicographically, so `1.9` sorts above `1.10`.
/// Languages without any declared version are left out; `helm` is always
/// present (and empty) when a chart entry exists.
pub fn representative_versions(matrix: &[MatrixEntry]) -> BTreeMap<String, String> {
    let mut versions: BTreeMap<String, String> = BTreeMap::new();

    for entry in matrix {
        let language = entry.language.as_str().to_string();

        if entry.language == LanguageId::Helm {
            versions.insert(language, String::new());
            continue;
        }
        if entry.version.is_empty() {
            continue;
        }

        match versions.get_mut(&language) {
            Some(current) if *current >= entry.version => {}
            Some(current) => *current = entry.version.clone(),
            None => {
                versions.insert(language, entry.version.clone());
            }
        }
    }

    versions
}
