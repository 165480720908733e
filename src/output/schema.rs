//! Pipeline context schema
//!
//! These types are the program's only product. Their JSON shape is a contract
//! with the CI workflows that consume it: field names, the `type` tag on
//! integration entries, and which optional fields are omitted must stay stable.

use crate::stack::LanguageId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One resolved build context, driving per-language CI jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    /// Image name of the artifact, or a synthetic `helm-*` name for charts
    pub name: String,
    /// Context as declared, relative to the repository root
    pub context: String,
    pub language: LanguageId,
    /// Toolchain version, empty when none was declared
    pub version: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMethod {
    /// Build from the context's Dockerfile
    Docker,
    /// Build with Cloud Native Buildpacks
    Pack,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBuild {
    pub image: String,
    pub build_method: BuildMethod,
    pub context: String,
    pub suffix: String,
    pub output_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<String>,
    /// Space-separated `KEY=VALUE` tokens passed to the buildpack build
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_env: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartBuild {
    pub path: String,
    pub output_key: String,
    pub image: String,
}

/// One build-plan step: an image build or a standalone chart package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum IntegrationMatrixEntry {
    Image(ImageBuild),
    Chart(ChartBuild),
}

impl IntegrationMatrixEntry {
    pub fn chart(path: impl Into<String>) -> Self {
        Self::Chart(ChartBuild {
            path: path.into(),
            output_key: "chart".to_string(),
            image: String::new(),
        })
    }

    pub fn output_key(&self) -> &str {
        match self {
            Self::Image(image) => &image.output_key,
            Self::Chart(chart) => &chart.output_key,
        }
    }

    pub fn as_image(&self) -> Option<&ImageBuild> {
        match self {
            Self::Image(image) => Some(image),
            Self::Chart(_) => None,
        }
    }
}

/// Aggregate result of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineContext {
    pub matrix: Vec<MatrixEntry>,
    /// Distinct matrix languages, sorted by name
    pub languages: Vec<String>,
    /// Representative version per language
    pub versions: BTreeMap<String, String>,
    pub chart_paths: Vec<String>,
    pub integration_matrix: Vec<IntegrationMatrixEntry>,
}

impl PipelineContext {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty() && self.chart_paths.is_empty() && self.integration_matrix.is_empty()
    }
}
