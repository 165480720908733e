//! Readers for the emitted context, as the downstream CI steps consume it
//!
//! Both helpers accept JSON from a workflow input. Missing or `null` fields
//! take the same defaults the workflows use.

use crate::pipeline::DEFAULT_BUILDER;
use crate::stack::LanguageId;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("Invalid JSON input")]
    InvalidJson(#[from] serde_json::Error),

    #[error("No build context at index {index} ({available} available)")]
    IndexOutOfRange { index: usize, available: usize },
}

/// Primary build context picked for a validation job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateContext {
    /// The selected matrix entry, re-serialized as JSON
    pub context: String,
    pub language: String,
    pub version: String,
    /// The entry's own `context` directory
    pub ctx_context: String,
}

impl ValidateContext {
    pub fn output_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("context", self.context.clone()),
            ("language", self.language.clone()),
            ("version", self.version.clone()),
            ("ctx-context", self.ctx_context.clone()),
        ]
    }
}

/// The `index`-th matrix entry that is not a helm chart.
///
/// `Ok(None)` when the matrix is missing, `null`, empty, or shorter than
/// `index + 1` non-helm entries.
pub fn resolve_validate_context(
    pipeline_context: &str,
    index: usize,
) -> Result<Option<ValidateContext>, ConsumerError> {
    let ctx: Value = serde_json::from_str(pipeline_context)?;
    let entries = build_entries(&ctx);

    let Some(entry) = entries.get(index) else {
        return Ok(None);
    };

    Ok(Some(ValidateContext {
        context: serde_json::to_string(entry)?,
        language: string_field(entry, "language").unwrap_or_default(),
        version: string_field(entry, "version").unwrap_or_default(),
        ctx_context: string_field(entry, "context").unwrap_or_else(|| ".".to_string()),
    }))
}

/// Like [`resolve_validate_context`], with the miss turned into an error
pub fn require_validate_context(
    pipeline_context: &str,
    index: usize,
) -> Result<ValidateContext, ConsumerError> {
    match resolve_validate_context(pipeline_context, index)? {
        Some(resolved) => Ok(resolved),
        None => {
            let ctx: Value = serde_json::from_str(pipeline_context)?;
            Err(ConsumerError::IndexOutOfRange {
                index,
                available: build_entries(&ctx).len(),
            })
        }
    }
}

fn build_entries(ctx: &Value) -> Vec<&Value> {
    let helm = LanguageId::Helm.as_str();
    ctx.get("matrix")
        .and_then(Value::as_array)
        .map(|matrix| {
            matrix
                .iter()
                .filter(|entry| entry.get("language").and_then(Value::as_str) != Some(helm))
                .collect()
        })
        .unwrap_or_default()
}

fn string_field(entry: &Value, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(String::from)
}

/// Which job step handles an integration matrix item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Build,
    Helm,
    None,
}

impl BuildStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Helm => "helm",
            Self::None => "none",
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawArtifact {
    #[serde(rename = "type")]
    kind: Option<String>,
    build_method: Option<String>,
    context: Option<String>,
    suffix: Option<String>,
    output_key: Option<String>,
    image: Option<String>,
    path: Option<String>,
    dockerfile: Option<String>,
    builder: Option<String>,
    build_env: Option<String>,
}

/// One integration matrix item with every field filled in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactContract {
    pub kind: String,
    pub build_method: String,
    pub context: String,
    pub suffix: String,
    pub output_key: String,
    pub image: String,
    pub path: String,
    pub dockerfile: String,
    pub builder: String,
    pub build_env: String,
}

impl ArtifactContract {
    pub fn parse(json: &str) -> Result<Self, ConsumerError> {
        let raw: RawArtifact = serde_json::from_str(json)?;

        Ok(Self {
            kind: raw.kind.unwrap_or_default(),
            build_method: raw.build_method.unwrap_or_default(),
            context: raw.context.unwrap_or_else(|| ".".to_string()),
            suffix: raw.suffix.unwrap_or_default(),
            output_key: raw.output_key.unwrap_or_default(),
            image: raw.image.unwrap_or_default(),
            path: raw.path.unwrap_or_default(),
            dockerfile: raw.dockerfile.unwrap_or_else(|| "Dockerfile".to_string()),
            builder: raw.builder.unwrap_or_else(|| DEFAULT_BUILDER.to_string()),
            build_env: raw.build_env.unwrap_or_default(),
        })
    }

    /// Image items are built whatever their build method; charts are packaged
    pub fn step(&self) -> BuildStep {
        match self.kind.as_str() {
            "image" => BuildStep::Build,
            "chart" => BuildStep::Helm,
            _ => BuildStep::None,
        }
    }

    pub fn output_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", self.kind.clone()),
            ("build_method", self.build_method.clone()),
            ("context", self.context.clone()),
            ("suffix", self.suffix.clone()),
            ("output_key", self.output_key.clone()),
            ("image", self.image.clone()),
            ("path", self.path.clone()),
            ("dockerfile", self.dockerfile.clone()),
            ("builder", self.builder.clone()),
            ("build_env", self.build_env.clone()),
            ("step", self.step().as_str().to_string()),
        ]
    }
}
