//! Subcommand handlers
//!
//! Each handler does its work through `anyhow`, logs a failure, and hands
//! `main` the process exit code.

use super::commands::{ArtifactArgs, DetectArgs, OutputArgs, ResolveArgs, ValidateContextArgs};
use crate::config::RunConfig;
use crate::consumers::{require_validate_context, ArtifactContract};
use crate::fs::RealFileSystem;
use crate::output::{OutputTarget, OutputWriter};
use crate::pipeline::PipelineAssembler;
use crate::stack::{LanguageRegistry, ProjectResolver};
use anyhow::{Context, Result};
use tracing::{debug, error, info};

fn exit_code(result: Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            1
        }
    }
}

/// Output file from the flag, then `GITHUB_OUTPUT`
fn writer_for(args: &OutputArgs, config: &RunConfig) -> OutputWriter {
    let path = args.output.as_deref().or_else(|| config.output_path());
    OutputWriter::new(OutputTarget::from_path(path))
}

pub fn handle_detect(args: &DetectArgs) -> i32 {
    exit_code(run_detect(args))
}

fn run_detect(args: &DetectArgs) -> Result<()> {
    let mut config = RunConfig::from_env();
    if let Some(file) = &args.file {
        config = config.with_build_config_path(file);
    }
    if let Some(builder) = &args.default_builder {
        config = config.with_default_builder(builder);
    }
    debug!("Run configuration: {:?}", config);

    let fs = RealFileSystem::new();
    let registry = LanguageRegistry::with_defaults();
    let ctx = PipelineAssembler::from_config(&fs, &registry, &config)
        .assemble_from_file(&config.build_config_path, &config.repo_root())?;

    writer_for(&args.output, &config)
        .emit(&ctx)
        .context("Failed to write pipeline context")?;

    info!(
        "Wrote pipeline context: {} matrix entries, languages [{}]",
        ctx.matrix.len(),
        ctx.languages.join(", ")
    );
    Ok(())
}

pub fn handle_resolve(args: &ResolveArgs) -> i32 {
    exit_code(run_resolve(args))
}

fn run_resolve(args: &ResolveArgs) -> Result<()> {
    let fs = RealFileSystem::new();
    let registry = LanguageRegistry::with_defaults();

    let info = ProjectResolver::new(&fs, &registry)
        .resolve(&args.directory)
        .with_context(|| format!("Could not detect language in {}", args.directory.display()))?;

    println!("{}", serde_json::to_string(&info)?);
    Ok(())
}

pub fn handle_validate_context(args: &ValidateContextArgs) -> i32 {
    exit_code(run_validate_context(args))
}

fn run_validate_context(args: &ValidateContextArgs) -> Result<()> {
    let resolved = require_validate_context(&args.pipeline_context, args.index)
        .context("No build context to validate")?;

    info!(
        "Validating {} ({}) in {}",
        resolved.language, resolved.version, resolved.ctx_context
    );

    writer_for(&args.output, &RunConfig::from_env())
        .emit_pairs(&resolved.output_pairs())
        .context("Failed to write validate context")?;
    Ok(())
}

pub fn handle_artifact(args: &ArtifactArgs) -> i32 {
    exit_code(run_artifact(args))
}

fn run_artifact(args: &ArtifactArgs) -> Result<()> {
    let contract = ArtifactContract::parse(&args.json).context("Failed to parse artifact")?;
    debug!("Artifact contract: {:?}", contract);

    writer_for(&args.output, &RunConfig::from_env())
        .emit_pairs(&contract.output_pairs())
        .context("Failed to write artifact contract")?;
    Ok(())
}
