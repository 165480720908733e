//! Build plan: how each artifact gets built, plus standalone chart packages

use super::matrix::ResolvedArtifact;
use crate::build_config::token_key;
use crate::fs::FileSystem;
use crate::output::{BuildMethod, ImageBuild, IntegrationMatrixEntry};
use crate::stack::ProjectResolver;
use crate::util::normalize_relative;
use std::collections::HashSet;
use tracing::debug;

pub const DEFAULT_BUILDER: &str = "paketobuildpacks/builder-jammy-base";
pub const DOCKERFILE: &str = "Dockerfile";

pub struct IntegrationMatrixBuilder<'a> {
    fs: &'a dyn FileSystem,
    resolver: &'a ProjectResolver<'a>,
    default_builder: String,
}

impl<'a> IntegrationMatrixBuilder<'a> {
    pub fn new(fs: &'a dyn FileSystem, resolver: &'a ProjectResolver<'a>) -> Self {
        Self {
            fs,
            resolver,
            default_builder: DEFAULT_BUILDER.to_string(),
        }
    }

    pub fn with_default_builder(mut self, builder: impl Into<String>) -> Self {
        self.default_builder = builder.into();
        self
    }

    /// Image builds in declaration order, then the charts no image context covers
    pub fn build(
        &self,
        resolved: &[ResolvedArtifact<'_>],
        chart_paths: &[String],
    ) -> Vec<IntegrationMatrixEntry> {
        let mut entries: Vec<IntegrationMatrixEntry> = resolved
            .iter()
            .filter_map(|r| self.image_entry(r))
            .map(IntegrationMatrixEntry::Image)
            .collect();

        let covered: HashSet<String> = entries
            .iter()
            .filter_map(IntegrationMatrixEntry::as_image)
            .map(|image| normalize_relative(&image.context))
            .collect();

        for path in chart_paths {
            if covered.contains(&normalize_relative(path)) {
                debug!(chart = %path, "Chart already built as an image context");
                continue;
            }
            entries.push(IntegrationMatrixEntry::chart(path.clone()));
        }

        entries
    }

    fn image_entry(&self, resolved: &ResolvedArtifact<'_>) -> Option<ImageBuild> {
        let artifact = resolved.artifact;
        if artifact.image.is_empty() {
            debug!(context = %artifact.context, "Artifact without image, skipping");
            return None;
        }

        let suffix = image_suffix(&artifact.image);
        let mut entry = ImageBuild {
            image: artifact.image.clone(),
            build_method: BuildMethod::Docker,
            context: artifact.context.clone(),
            output_key: format!("image_{}", suffix),
            suffix,
            dockerfile: None,
            builder: None,
            build_env: None,
        };

        if self.fs.is_file(&resolved.dir.join(DOCKERFILE)) {
            entry.dockerfile = Some(DOCKERFILE.to_string());
        } else {
            entry.build_method = BuildMethod::Pack;
            entry.builder = Some(
                artifact
                    .declared_builder()
                    .unwrap_or(&self.default_builder)
                    .to_string(),
            );
            entry.build_env = Some(self.build_env(resolved));
        }

        debug!(
            image = %entry.image,
            method = ?entry.build_method,
            output_key = %entry.output_key,
            "Planned image build"
        );

        Some(entry)
    }

    fn build_env(&self, resolved: &ResolvedArtifact<'_>) -> String {
        let derived = resolved
            .project
            .as_ref()
            .map(|info| self.resolver.buildpack_env(&resolved.dir, info))
            .unwrap_or_default();

        merge_env(resolved.artifact.declared_env(), derived).join(" ")
    }
}

/// Last `-` segment of the image name, without registry path or tag.
///
/// `ghcr.io/org/app-api:1.2` → `api`
pub fn image_suffix(image: &str) -> String {
    let name = image.rsplit('/').next().unwrap_or(image);
    let name = name.split('@').next().unwrap_or(name);
    let name = name.split(':').next().unwrap_or(name);
    name.rsplit('-').next().unwrap_or(name).to_string()
}

/// Declared tokens followed by derived pairs whose key was not declared
pub fn merge_env(declared: Vec<String>, derived: Vec<(String, String)>) -> Vec<String> {
    let declared_keys: HashSet<String> = declared
        .iter()
        .map(|token| token_key(token).to_string())
        .collect();

    let mut tokens = declared;
    tokens.extend(
        derived
            .into_iter()
            .filter(|(key, _)| !declared_keys.contains(key))
            .map(|(key, value)| format!("{}={}", key, value)),
    );
    tokens
}
