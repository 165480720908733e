//! Key=value output channel
//!
//! CI runners hand the step an append-only file (`GITHUB_OUTPUT`) that takes
//! one `key=value` per line. Without one, the same lines go to stdout.

use super::schema::PipelineContext;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output")]
    Io(#[from] io::Error),

    #[error("Failed to serialize output")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    /// Opened in append mode, created if missing
    File(PathBuf),
}

impl OutputTarget {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::Stdout,
        }
    }

    fn open(&self) -> Result<Box<dyn Write>, OutputError> {
        match self {
            Self::Stdout => Ok(Box::new(io::stdout().lock())),
            Self::File(path) => {
                debug!(path = %path.display(), "Appending to output file");
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(Box::new(file))
            }
        }
    }
}

/// Lines describing `ctx`, without trailing newlines
pub fn render_lines(ctx: &PipelineContext) -> Result<Vec<String>, OutputError> {
    let mut lines = vec![
        format!("matrix={}", serde_json::to_string(&ctx.matrix)?),
        format!("languages={}", ctx.languages.join(",")),
        format!("pipeline-context={}", serde_json::to_string(ctx)?),
    ];

    for (language, version) in &ctx.versions {
        lines.push(format!("{}-version={}", language, version));
    }

    Ok(lines)
}

pub struct OutputWriter {
    target: OutputTarget,
}

impl OutputWriter {
    pub fn new(target: OutputTarget) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &OutputTarget {
        &self.target
    }

    pub fn emit(&self, ctx: &PipelineContext) -> Result<(), OutputError> {
        let lines = render_lines(ctx)?;
        self.write_lines(&lines)
    }

    /// Writes arbitrary pairs as `key=value` lines
    pub fn emit_pairs(&self, pairs: &[(&str, String)]) -> Result<(), OutputError> {
        let lines: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        self.write_lines(&lines)
    }

    fn write_lines(&self, lines: &[String]) -> Result<(), OutputError> {
        let mut out = self.target.open()?;
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        out.flush()?;
        Ok(())
    }
}
