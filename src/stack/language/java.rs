//! Java/Kotlin language definition (Maven and Gradle)

use super::LanguageDefinition;
use crate::fs::ManifestReader;
use crate::stack::LanguageId;
use regex::Regex;
use roxmltree::Document;
use std::path::Path;
use tracing::warn;

/// Maven properties carrying the Java level, in lookup order
const POM_VERSION_PROPERTIES: &[&str] = &[
    "java.version",
    "maven.compiler.source",
    "maven.compiler.target",
];

const GROOVY_BUILD_FILE: &str = "build.gradle";
const KOTLIN_BUILD_FILE: &str = "build.gradle.kts";

pub struct JavaLanguage;

impl LanguageDefinition for JavaLanguage {
    fn id(&self) -> LanguageId {
        LanguageId::Java
    }

    fn marker_files(&self) -> &[&str] {
        &["pom.xml", GROOVY_BUILD_FILE, KOTLIN_BUILD_FILE]
    }

    fn detect_version(&self, reader: &ManifestReader<'_>, dir: &Path) -> Option<String> {
        if let Some(version) = reader
            .read(dir, "pom.xml")
            .and_then(|content| parse_pom_version(&content, dir))
        {
            return Some(version);
        }

        if let Some(version) = reader
            .read(dir, GROOVY_BUILD_FILE)
            .and_then(|content| parse_groovy_version(&content))
        {
            return Some(version);
        }

        reader
            .read(dir, KOTLIN_BUILD_FILE)
            .and_then(|content| parse_kotlin_version(&content))
    }

    fn buildpack_env(
        &self,
        reader: &ManifestReader<'_>,
        dir: &Path,
        version: &str,
    ) -> Vec<(String, String)> {
        let mut env = Vec::new();

        let jvm = java_version_to_bp_jvm(version);
        if !jvm.is_empty() {
            env.push(("BP_JVM_VERSION".to_string(), jvm));
        }

        if reader.has_file(dir, KOTLIN_BUILD_FILE) {
            env.push((
                "BP_GRADLE_BUILD_FILE".to_string(),
                KOTLIN_BUILD_FILE.to_string(),
            ));
        } else if reader.has_file(dir, GROOVY_BUILD_FILE) {
            env.push((
                "BP_GRADLE_BUILD_FILE".to_string(),
                GROOVY_BUILD_FILE.to_string(),
            ));
        }

        env
    }
}

/// Reduces a Java version to the bare major number buildpacks expect.
///
/// `"1.8"` becomes `"8"`, `"17.0.2"` becomes `"17"`, empty stays empty.
pub fn java_version_to_bp_jvm(version: &str) -> String {
    let version = version.trim();
    if version.is_empty() {
        return String::new();
    }

    let mut parts = version.split('.');
    let major = parts.next().unwrap_or_default();
    match (major, parts.next()) {
        ("1", Some(minor)) if !minor.is_empty() => minor.to_string(),
        _ => major.to_string(),
    }
}

fn parse_pom_version(content: &str, dir: &Path) -> Option<String> {
    match Document::parse(content) {
        Ok(doc) => POM_VERSION_PROPERTIES.iter().find_map(|property| {
            doc.descendants()
                .filter(|node| node.has_tag_name(*property))
                .filter_map(|node| node.text())
                .map(str::trim)
                .find(|text| !text.is_empty())
                .map(String::from)
        }),
        Err(e) => {
            warn!(
                dir = %dir.display(),
                error = %e,
                "Failed to parse pom.xml, scanning raw text"
            );
            POM_VERSION_PROPERTIES
                .iter()
                .find_map(|property| first_capture(&pom_property_pattern(property), content))
        }
    }
}

fn pom_property_pattern(property: &str) -> String {
    let escaped = regex::escape(property);
    format!(r"<{escaped}>\s*([^<\s][^<]*?)\s*</{escaped}>")
}

/// `sourceCompatibility = JavaVersion.VERSION_17` or `sourceCompatibility = '17'`
fn parse_groovy_version(content: &str) -> Option<String> {
    let caps = Regex::new(
        r#"sourceCompatibility\s*=\s*(?:JavaVersion\.VERSION_(\d+(?:_\d+)?)|['"]([^'"]+)['"])"#,
    )
    .ok()?
    .captures(content)?;

    if let Some(constant) = caps.get(1) {
        return Some(constant.as_str().replace('_', "."));
    }
    Some(caps.get(2)?.as_str().trim().to_string())
}

fn parse_kotlin_version(content: &str) -> Option<String> {
    let patterns = [
        r"JavaLanguageVersion\.of\(\s*(\d+)\s*\)",
        r#"languageVersion\.set\(\s*['"]?(\d+)"#,
        r#"jvmTarget\s*=\s*"([^"]+)""#,
        r"JvmTarget\.JVM_(\d+(?:_\d+)?)",
        r"sourceCompatibility\s*=\s*JavaVersion\.VERSION_(\d+(?:_\d+)?)",
    ];

    patterns
        .iter()
        .find_map(|pattern| first_capture(pattern, content))
        .map(|version| version.replace('_', "."))
}

fn first_capture(pattern: &str, content: &str) -> Option<String> {
    let caps = Regex::new(pattern).ok()?.captures(content)?;
    Some(caps.get(1)?.as_str().to_string())
}
