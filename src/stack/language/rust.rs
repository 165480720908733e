//! Rust language definition

use super::LanguageDefinition;
use crate::fs::ManifestReader;
use crate::stack::LanguageId;
use std::path::Path;
use tracing::warn;

pub struct RustLanguage;

impl LanguageDefinition for RustLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::Rust
    }

    fn marker_files(&self) -> &[&str] {
        &["Cargo.toml"]
    }

    fn detect_version(&self, reader: &ManifestReader<'_>, dir: &Path) -> Option<String> {
        if let Some(content) = reader.read(dir, "rust-toolchain.toml") {
            match toml::from_str::<toml::Value>(&content) {
                Ok(parsed) => {
                    if let Some(channel) = toolchain_channel(&parsed) {
                        return Some(channel);
                    }
                }
                Err(e) => {
                    warn!(
                        dir = %dir.display(),
                        error = %e,
                        "Failed to parse rust-toolchain.toml"
                    );
                }
            }
        }

        // Legacy file: a bare channel name, or the same TOML layout without the extension
        let content = reader.read_trimmed(dir, "rust-toolchain")?;
        if let Ok(parsed) = toml::from_str::<toml::Value>(&content) {
            if let Some(channel) = toolchain_channel(&parsed) {
                return Some(channel);
            }
        }
        Some(content)
    }
}

fn toolchain_channel(parsed: &toml::Value) -> Option<String> {
    parsed
        .get("toolchain")?
        .get("channel")?
        .as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
