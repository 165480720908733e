//! Best-effort manifest access for a single directory
//!
//! Every detector reads its build manifests through [`ManifestReader`]. A
//! missing file, a missing directory and a permission error all look the same
//! to callers: the manifest is absent and contributes no signal.

use super::FileSystem;
use std::path::Path;
use tracing::trace;

pub struct ManifestReader<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> ManifestReader<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    pub fn file_system(&self) -> &'a dyn FileSystem {
        self.fs
    }

    /// Contents of `dir/filename`, or `None` on any I/O failure
    pub fn read(&self, dir: &Path, filename: &str) -> Option<String> {
        let path = dir.join(filename);
        match self.fs.read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                trace!(path = %path.display(), error = %e, "Manifest not readable");
                None
            }
        }
    }

    /// Same as [`read`](Self::read), but treats whitespace-only content as absent
    pub fn read_trimmed(&self, dir: &Path, filename: &str) -> Option<String> {
        self.read(dir, filename)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
    }

    pub fn has_file(&self, dir: &Path, filename: &str) -> bool {
        self.fs.is_file(&dir.join(filename))
    }
}
