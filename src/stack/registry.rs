use super::language::{
    GoLanguage, JavaLanguage, LanguageDefinition, NodeLanguage, PythonLanguage, RustLanguage,
};
use super::LanguageId;
use std::sync::Arc;

/// Ordered set of language definitions.
///
/// Registration order is classification precedence: when a directory carries
/// markers for several ecosystems, the earliest registered one claims it.
#[derive(Clone)]
pub struct LanguageRegistry {
    languages: Vec<Arc<dyn LanguageDefinition>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self {
            languages: Vec::new(),
        }
    }

    /// go > rust > node > python > java
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(GoLanguage));
        registry.register(Arc::new(RustLanguage));
        registry.register(Arc::new(NodeLanguage));
        registry.register(Arc::new(PythonLanguage));
        registry.register(Arc::new(JavaLanguage));
        registry
    }

    pub fn register(&mut self, language: Arc<dyn LanguageDefinition>) {
        self.languages.push(language);
    }

    /// Language governing a directory with the given entry names
    pub fn classify(&self, file_names: &[String]) -> Option<&dyn LanguageDefinition> {
        self.languages
            .iter()
            .find(|language| language.matches(file_names))
            .map(|language| language.as_ref())
    }

    pub fn get_language(&self, id: &LanguageId) -> Option<&dyn LanguageDefinition> {
        self.languages
            .iter()
            .find(|language| &language.id() == id)
            .map(|language| language.as_ref())
    }

    pub fn all_languages(&self) -> Vec<LanguageId> {
        self.languages.iter().map(|language| language.id()).collect()
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    fn classify(names: &[&str]) -> Option<LanguageId> {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        LanguageRegistry::with_defaults()
            .classify(&names)
            .map(|language| language.id())
    }

    #[parameterized(
        go = { "go.mod", LanguageId::Go },
        rust = { "Cargo.toml", LanguageId::Rust },
        node = { "package.json", LanguageId::Node },
        python_requirements = { "requirements.txt", LanguageId::Python },
        python_pyproject = { "pyproject.toml", LanguageId::Python },
        python_pipfile = { "Pipfile", LanguageId::Python },
        java_pom = { "pom.xml", LanguageId::Java },
        java_gradle = { "build.gradle", LanguageId::Java },
        java_gradle_kts = { "build.gradle.kts", LanguageId::Java },
    )]
    fn test_single_marker(marker: &str, expected: LanguageId) {
        assert_eq!(classify(&[marker, "README.md"]), Some(expected));
    }

    #[test]
    fn test_node_wins_over_java() {
        assert_eq!(classify(&["pom.xml", "package.json"]), Some(LanguageId::Node));
    }

    #[test]
    fn test_go_wins_over_everything() {
        assert_eq!(
            classify(&["Cargo.toml", "package.json", "go.mod", "pom.xml"]),
            Some(LanguageId::Go)
        );
    }

    #[test]
    fn test_rust_wins_over_python() {
        assert_eq!(
            classify(&["pyproject.toml", "Cargo.toml"]),
            Some(LanguageId::Rust)
        );
    }

    #[test]
    fn test_no_markers() {
        assert_eq!(classify(&["README.md", "Dockerfile"]), None);
        assert_eq!(classify(&[]), None);
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        assert_eq!(classify(&["cargo.toml", "GO.MOD"]), None);
    }

    #[test]
    fn test_get_language() {
        let registry = LanguageRegistry::with_defaults();
        assert!(registry.get_language(&LanguageId::Java).is_some());
        assert!(registry.get_language(&LanguageId::Helm).is_none());
        assert_eq!(
            registry.all_languages(),
            vec![
                LanguageId::Go,
                LanguageId::Rust,
                LanguageId::Node,
                LanguageId::Python,
                LanguageId::Java
            ]
        );
    }
}
