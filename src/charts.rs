//! Helm chart discovery
//!
//! Walks the repository depth-first and records every directory that holds a
//! chart manifest. Hidden directories (`.git`, `.github`, ...) are pruned
//! before descending. Gitignore rules are not applied.

use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

pub const CHART_MANIFEST: &str = "Chart.yaml";

pub struct ChartScanner {
    repo_root: PathBuf,
}

impl ChartScanner {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// Repository-relative chart directories, sorted, `"."` for the root itself
    pub fn discover(&self) -> Vec<String> {
        let mut charts = BTreeSet::new();

        let walker = WalkBuilder::new(&self.repo_root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()))
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(err) => {
                    warn!(error = %err, "Failed to read directory entry");
                    continue;
                }
            };

            let is_manifest = entry.file_name() == CHART_MANIFEST
                && entry.file_type().map_or(false, |t| t.is_file());
            if !is_manifest {
                continue;
            }

            let Some(chart_dir) = entry.path().parent() else {
                continue;
            };
            let rel = relative_chart_path(&self.repo_root, chart_dir);
            debug!(path = %rel, "Found chart manifest");
            charts.insert(rel);
        }

        for chart in &charts {
            info!("Detected Helm chart in {}", chart);
        }

        charts.into_iter().collect()
    }
}

pub fn discover_charts(repo_root: &Path) -> Vec<String> {
    ChartScanner::new(repo_root).discover()
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().map_or(false, |n| n.starts_with('.'))
}

fn relative_chart_path(repo_root: &Path, chart_dir: &Path) -> String {
    let rel = chart_dir.strip_prefix(repo_root).unwrap_or(chart_dir);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}
