//! Node.js language definition

use super::LanguageDefinition;
use crate::fs::ManifestReader;
use crate::stack::LanguageId;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

pub struct NodeLanguage;

impl LanguageDefinition for NodeLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::Node
    }

    fn marker_files(&self) -> &[&str] {
        &["package.json"]
    }

    fn detect_version(&self, reader: &ManifestReader<'_>, dir: &Path) -> Option<String> {
        if let Some(content) = reader.read(dir, "package.json") {
            match serde_json::from_str::<Value>(&content) {
                Ok(parsed) => {
                    if let Some(version) = engines_node(&parsed) {
                        return Some(version);
                    }
                }
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Failed to parse package.json");
                }
            }
        }

        reader.read_trimmed(dir, ".nvmrc")
    }
}

fn engines_node(parsed: &Value) -> Option<String> {
    parsed
        .get("engines")?
        .get("node")?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(String::from)
}
