//! Lexical path normalization
//!
//! Contexts from the build configuration and chart paths from the scanner are
//! compared as strings, so both sides are cleaned the same way: `.` segments
//! and trailing separators are dropped, `..` cancels the previous segment, and
//! an empty result becomes `"."`. The file system is never consulted.

use std::path::{Component, Path, PathBuf};

pub fn normalize_relative(path: &str) -> String {
    let mut absolute = false;
    let mut parts: Vec<String> = Vec::new();

    for component in Path::new(path).components() {
        match component {
            Component::RootDir | Component::Prefix(_) => absolute = true,
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push("..".to_string()),
            },
            Component::Normal(part) => parts.push(part.to_string_lossy().to_string()),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// `context` resolved against `repo_root`, lexically cleaned
pub fn resolve_context(repo_root: &Path, context: &str) -> PathBuf {
    let normalized = normalize_relative(context);
    if normalized == "." {
        repo_root.to_path_buf()
    } else {
        repo_root.join(normalized)
    }
}
