//! Go language definition

use super::LanguageDefinition;
use crate::fs::ManifestReader;
use crate::stack::LanguageId;
use regex::Regex;
use std::path::Path;

pub struct GoLanguage;

impl LanguageDefinition for GoLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::Go
    }

    fn marker_files(&self) -> &[&str] {
        &["go.mod"]
    }

    fn detect_version(&self, reader: &ManifestReader<'_>, dir: &Path) -> Option<String> {
        let content = reader.read(dir, "go.mod")?;
        parse_go_directive(&content)
    }
}

/// First `go <version>` directive at the start of a line
fn parse_go_directive(content: &str) -> Option<String> {
    let caps = Regex::new(r"(?m)^go\s+(\S+)").ok()?.captures(content)?;
    Some(caps.get(1)?.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn detect(go_mod: &str) -> Option<String> {
        let fs = MockFileSystem::new();
        fs.add_file("go.mod", go_mod);
        GoLanguage.detect_version(&ManifestReader::new(&fs), Path::new("/mock"))
    }

    #[test]
    fn test_full_version_directive() {
        assert_eq!(detect("module x\n\ngo 1.22.0\n"), Some("1.22.0".to_string()));
    }

    #[test]
    fn test_first_directive_wins() {
        let content = "module x\n\ngo 1.21\n\ntoolchain go1.22.3\n";
        assert_eq!(detect(content), Some("1.21".to_string()));
    }

    #[test]
    fn test_directive_must_start_line() {
        assert_eq!(detect("module x\n// go 1.20\n"), None);
        assert_eq!(detect("module x\n  go 1.20\n"), None);
    }

    #[test]
    fn test_missing_go_mod() {
        let fs = MockFileSystem::new();
        assert_eq!(
            GoLanguage.detect_version(&ManifestReader::new(&fs), Path::new("/mock")),
            None
        );
    }

    #[test]
    fn test_markers() {
        assert!(GoLanguage.matches(&["go.mod".to_string(), "main.go".to_string()]));
        assert!(!GoLanguage.matches(&["go.sum".to_string()]));
    }
}
