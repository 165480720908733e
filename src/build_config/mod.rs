//! Build-configuration document (skaffold-style YAML)
//!
//! Only the `build.artifacts` list is read. Every field has a documented
//! default, and an explicit `null` is treated the same as a missing key.
//!
//! ```yaml
//! build:
//!   artifacts:
//!     - image: ghcr.io/acme/api
//!       context: services/api
//!       buildpacks:
//!         builder: paketobuildpacks/builder-jammy-base
//!         env:
//!           BP_JVM_VERSION: "21"
//! ```

mod artifact;

pub use artifact::{token_key, ArtifactDeclaration, BuildpackEnv, BuildpacksConfig, DEFAULT_CONTEXT};

use serde::{Deserialize, Deserializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BuildConfigError {
    #[error("Failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub(crate) fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildConfig {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub build: BuildSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildSection {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub artifacts: Vec<ArtifactDeclaration>,
}

impl BuildConfig {
    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, BuildConfigError> {
        let parsed: Option<Self> =
            serde_yaml::from_str(content).map_err(|source| BuildConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(parsed.unwrap_or_default())
    }

    /// Loads the document at `path`; `Ok(None)` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>, BuildConfigError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Build configuration not found");
                return Ok(None);
            }
            Err(source) => {
                return Err(BuildConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = Self::from_yaml(&content, path)?;
        debug!(
            path = %path.display(),
            artifacts = config.artifacts().len(),
            "Loaded build configuration"
        );
        Ok(Some(config))
    }

    pub fn artifacts(&self) -> &[ArtifactDeclaration] {
        &self.build.artifacts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(content: &str) -> Result<BuildConfig, BuildConfigError> {
        BuildConfig::from_yaml(content, Path::new("skaffold.yaml"))
    }

    #[test]
    fn test_parse_artifacts() {
        let config = parse(
            r#"
apiVersion: skaffold/v4beta11
kind: Config
build:
  artifacts:
    - image: app-go
      context: ./go-service
    - image: app-root
"#,
        )
        .unwrap();

        let artifacts = config.artifacts();
        assert_eq!(artifacts.len(), 2);
        assert_eq!(artifacts[0].image, "app-go");
        assert_eq!(artifacts[0].context, "./go-service");
        assert_eq!(artifacts[1].context, ".");
        assert!(artifacts[1].buildpacks.is_none());
    }

    #[test]
    fn test_missing_and_null_sections() {
        assert!(parse("kind: Config\n").unwrap().artifacts().is_empty());
        assert!(parse("build:\n").unwrap().artifacts().is_empty());
        assert!(parse("build:\n  artifacts:\n").unwrap().artifacts().is_empty());
        assert!(parse("").unwrap().artifacts().is_empty());
    }

    #[test]
    fn test_malformed_document() {
        let err = parse("build: [unclosed").unwrap_err();
        assert!(matches!(err, BuildConfigError::Parse { .. }));
        assert!(err.to_string().starts_with("Error parsing skaffold.yaml"));
    }

    #[test]
    fn test_parse_error_reported_once_in_chain() {
        let err = parse("build:\n  artifacts: [\n").unwrap_err();
        assert_eq!(err.to_string(), "Error parsing skaffold.yaml");

        let cause = std::error::Error::source(&err).unwrap().to_string();
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert_eq!(chain.matches(cause.as_str()).count(), 1);
    }

    #[test]
    fn test_wrong_shape_is_an_error() {
        assert!(parse("- just\n- a list\n").is_err());
        assert!(parse("build:\n  artifacts: 3\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = BuildConfig::load(&temp.path().join("skaffold.yaml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_from_disk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("skaffold.yaml");
        fs::write(&path, "build:\n  artifacts:\n    - image: api\n      context: api\n").unwrap();

        let config = BuildConfig::load(&path).unwrap().unwrap();
        assert_eq!(config.artifacts()[0].context, "api");
    }
}
