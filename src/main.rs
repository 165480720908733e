use pipeline_context::cli::commands::{CliArgs, Commands};
use pipeline_context::cli::handlers::{
    handle_artifact, handle_detect, handle_resolve, handle_validate_context,
};
use pipeline_context::config::resolve_log_level;
use pipeline_context::util::logging::{init_logging, LoggingConfig};
use pipeline_context::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();

    let level = match resolve_log_level(args.log_level.as_deref(), args.verbose, args.quiet) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    init_logging(LoggingConfig {
        level,
        ..LoggingConfig::from_env()
    });

    debug!("pipeline-context v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match args.resolved_command() {
        Commands::Detect(detect_args) => handle_detect(&detect_args),
        Commands::Resolve(resolve_args) => handle_resolve(&resolve_args),
        Commands::ValidateContext(validate_args) => handle_validate_context(&validate_args),
        Commands::Artifact(artifact_args) => handle_artifact(&artifact_args),
    };

    std::process::exit(exit_code);
}
