//! Python language definition

use super::LanguageDefinition;
use crate::fs::ManifestReader;
use crate::stack::LanguageId;
use std::path::Path;
use tracing::warn;

pub struct PythonLanguage;

impl LanguageDefinition for PythonLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::Python
    }

    fn marker_files(&self) -> &[&str] {
        &["requirements.txt", "pyproject.toml", "Pipfile"]
    }

    fn detect_version(&self, reader: &ManifestReader<'_>, dir: &Path) -> Option<String> {
        if let Some(content) = reader.read(dir, "pyproject.toml") {
            match toml::from_str::<toml::Value>(&content) {
                Ok(parsed) => {
                    if let Some(version) = requires_python(&parsed) {
                        return Some(version);
                    }
                }
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "Failed to parse pyproject.toml");
                }
            }
        }

        reader.read_trimmed(dir, ".python-version")
    }
}

fn requires_python(parsed: &toml::Value) -> Option<String> {
    parsed
        .get("project")?
        .get("requires-python")?
        .as_str()
        .filter(|s| !s.is_empty())
        .map(String::from)
}
