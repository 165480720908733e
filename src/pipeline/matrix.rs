//! Artifact matrix: one entry per declared artifact whose context resolves

use crate::build_config::ArtifactDeclaration;
use crate::output::MatrixEntry;
use crate::stack::{LanguageId, ProjectInfo, ProjectResolver};
use crate::util::resolve_context;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A declared artifact together with the single detection run for its context
#[derive(Debug, Clone)]
pub struct ResolvedArtifact<'a> {
    pub artifact: &'a ArtifactDeclaration,
    /// Context directory joined onto the repository root
    pub dir: PathBuf,
    pub project: Option<ProjectInfo>,
}

pub struct MatrixBuilder<'a> {
    resolver: &'a ProjectResolver<'a>,
}

impl<'a> MatrixBuilder<'a> {
    pub fn new(resolver: &'a ProjectResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Runs detection once per artifact, in declaration order
    pub fn resolve<'b>(
        &self,
        artifacts: &'b [ArtifactDeclaration],
        repo_root: &Path,
    ) -> Vec<ResolvedArtifact<'b>> {
        artifacts
            .iter()
            .map(|artifact| {
                let dir = resolve_context(repo_root, &artifact.context);
                let project = self.resolver.resolve(&dir);

                match &project {
                    Some(info) => info!(
                        "Detected {} ({}) for {} in {}",
                        info.language, info.version, artifact.image, artifact.context
                    ),
                    None => warn!(
                        "Could not detect language for {} in {}",
                        artifact.image, artifact.context
                    ),
                }

                ResolvedArtifact {
                    artifact,
                    dir,
                    project,
                }
            })
            .collect()
    }

    /// Entries in declaration order. Artifacts whose language cannot be
    /// detected are left out.
    pub fn entries(resolved: &[ResolvedArtifact<'_>]) -> Vec<MatrixEntry> {
        resolved
            .iter()
            .filter_map(|r| {
                let info = r.project.as_ref()?;
                Some(MatrixEntry {
                    name: r.artifact.image.clone(),
                    context: r.artifact.context.clone(),
                    language: info.language.clone(),
                    version: info.version.clone(),
                })
            })
            .collect()
    }

    pub fn build(&self, artifacts: &[ArtifactDeclaration], repo_root: &Path) -> Vec<MatrixEntry> {
        Self::entries(&self.resolve(artifacts, repo_root))
    }
}

/// Synthetic matrix entry for a discovered chart directory
pub fn chart_matrix_entry(chart_path: &str) -> MatrixEntry {
    let name = if chart_path == "." {
        "helm-chart".to_string()
    } else {
        format!("helm-{}", chart_path.replace('/', "-"))
    };

    MatrixEntry {
        name,
        context: chart_path.to_string(),
        language: LanguageId::Helm,
        version: String::new(),
    }
}
