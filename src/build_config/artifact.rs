use super::deserialize_null_default;
use serde::{Deserialize, Deserializer};
use serde_yaml::{Mapping, Value};

pub const DEFAULT_CONTEXT: &str = ".";

fn default_context() -> String {
    DEFAULT_CONTEXT.to_string()
}

fn deserialize_context<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|context| !context.is_empty())
        .unwrap_or_else(default_context))
}

/// One entry of `build.artifacts`
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactDeclaration {
    /// Image reference; may be empty for context-only entries
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub image: String,

    /// Source directory relative to the repository root
    #[serde(default = "default_context", deserialize_with = "deserialize_context")]
    pub context: String,

    #[serde(default)]
    pub buildpacks: Option<BuildpacksConfig>,
}

impl ArtifactDeclaration {
    pub fn new(image: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            context: context.into(),
            buildpacks: None,
        }
    }

    pub fn with_buildpacks(mut self, buildpacks: BuildpacksConfig) -> Self {
        self.buildpacks = Some(buildpacks);
        self
    }

    pub fn declared_builder(&self) -> Option<&str> {
        self.buildpacks
            .as_ref()
            .and_then(|bp| bp.builder.as_deref())
            .filter(|builder| !builder.is_empty())
    }

    pub fn declared_env(&self) -> Vec<String> {
        self.buildpacks
            .as_ref()
            .map(|bp| bp.env.tokens())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildpacksConfig {
    #[serde(default)]
    pub builder: Option<String>,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub env: BuildpackEnv,
}

/// Buildpack environment in any of the accepted spellings:
///
/// ```yaml
/// env: {BP_JVM_VERSION: "17"}     # mapping
/// env: ["BP_JVM_VERSION=17"]      # list of KEY=VALUE
/// env: "BP_JVM_VERSION=17 A=B"    # single whitespace-separated string
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BuildpackEnv {
    Map(Mapping),
    List(Vec<Value>),
    Line(String),
}

impl Default for BuildpackEnv {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl BuildpackEnv {
    /// Canonical `KEY=VALUE` tokens in declaration order
    pub fn tokens(&self) -> Vec<String> {
        match self {
            Self::Map(map) => map
                .iter()
                .filter_map(|(key, value)| {
                    let key = scalar_to_string(key)?;
                    let value = scalar_to_string(value).unwrap_or_default();
                    Some(format!("{}={}", key, value))
                })
                .collect(),
            Self::List(items) => items
                .iter()
                .filter_map(scalar_to_string)
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            Self::Line(line) => line.split_whitespace().map(String::from).collect(),
        }
    }
}

/// Key part of a `KEY=VALUE` token
pub fn token_key(token: &str) -> &str {
    token.split_once('=').map_or(token, |(key, _)| key)
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(yaml: &str) -> ArtifactDeclaration {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_defaults() {
        let a = artifact("image: api\n");
        assert_eq!(a.context, ".");
        assert!(a.declared_builder().is_none());
        assert!(a.declared_env().is_empty());

        let a = artifact("context: null\n");
        assert_eq!(a.image, "");
        assert_eq!(a.context, ".");
    }

    #[test]
    fn test_env_mapping_keeps_order() {
        let a = artifact(
            "image: api\nbuildpacks:\n  builder: custom/builder\n  env:\n    ZED: last\n    BP_JVM_VERSION: 21\n    BP_FLAG: true\n",
        );
        assert_eq!(a.declared_builder(), Some("custom/builder"));
        assert_eq!(
            a.declared_env(),
            vec!["ZED=last", "BP_JVM_VERSION=21", "BP_FLAG=true"]
        );
    }

    #[test]
    fn test_env_list() {
        let a = artifact("image: api\nbuildpacks:\n  env:\n    - BP_JVM_VERSION=17\n    - ''\n    - A=b c\n");
        assert_eq!(a.declared_env(), vec!["BP_JVM_VERSION=17", "A=b c"]);
    }

    #[test]
    fn test_env_line() {
        let a = artifact("image: api\nbuildpacks:\n  env: \"BP_JVM_VERSION=17  BP_X=1\"\n");
        assert_eq!(a.declared_env(), vec!["BP_JVM_VERSION=17", "BP_X=1"]);
    }

    #[test]
    fn test_null_env_and_empty_builder() {
        let a = artifact("image: api\nbuildpacks:\n  builder: ''\n  env: null\n");
        assert!(a.declared_builder().is_none());
        assert!(a.declared_env().is_empty());
    }

    #[test]
    fn test_token_key() {
        assert_eq!(token_key("BP_JVM_VERSION=17"), "BP_JVM_VERSION");
        assert_eq!(token_key("A=b=c"), "A");
        assert_eq!(token_key("FLAG"), "FLAG");
    }
}
