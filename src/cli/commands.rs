use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Pipeline context builder for CI workflows
#[derive(Parser, Debug)]
#[command(
    name = "pipeline-context",
    about = "Build the CI pipeline context for a repository",
    version,
    author,
    long_about = "pipeline-context reads the build artifacts declared in a skaffold-style \
                  configuration, detects each artifact's language and toolchain version, \
                  discovers Helm charts, and writes the resulting build matrix as key=value \
                  lines for the CI runner."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Used when no subcommand is given
    #[command(flatten)]
    pub detect: DetectArgs,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

impl CliArgs {
    /// The subcommand to run, `detect` when none was given
    pub fn resolved_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or_else(|| Commands::Detect(self.detect.clone()))
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    #[command(
        about = "Build the pipeline context (default)",
        long_about = "Reads the build configuration, resolves every artifact and chart, and \
                      writes matrix=, languages=, pipeline-context= and <lang>-version= lines.\n\n\
                      Examples:\n  \
                      pipeline-context\n  \
                      pipeline-context detect --file deploy/skaffold.yaml\n  \
                      pipeline-context detect --output $GITHUB_OUTPUT"
    )]
    Detect(DetectArgs),

    #[command(about = "Print the detected language and version of one directory as JSON")]
    Resolve(ResolveArgs),

    #[command(
        about = "Select the build context a validation job should use",
        long_about = "Picks the N-th non-helm matrix entry from a pipeline context and writes \
                      context=, language=, version= and ctx-context= lines.\n\n\
                      Examples:\n  \
                      pipeline-context validate-context --pipeline-context \"$CTX\"\n  \
                      pipeline-context validate-context --pipeline-context \"$CTX\" --index 1"
    )]
    ValidateContext(ValidateContextArgs),

    #[command(about = "Expand one integration matrix item into key=value lines")]
    Artifact(ArtifactArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct DetectArgs {
    #[arg(
        short = 'f',
        long,
        value_name = "FILE",
        help = "Build configuration file [env: SKAFFOLD_FILE] [default: skaffold.yaml]"
    )]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,

    #[arg(
        long,
        value_name = "IMAGE",
        help = "Builder used for buildpack builds that do not declare one"
    )]
    pub default_builder: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Append key=value lines to this file [env: GITHUB_OUTPUT] [default: stdout]"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ResolveArgs {
    #[arg(value_name = "DIR", help = "Directory to classify")]
    pub directory: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateContextArgs {
    #[arg(long, value_name = "JSON", help = "Pipeline context JSON")]
    pub pipeline_context: String,

    #[arg(long, default_value = "0", help = "Index among non-helm matrix entries")]
    pub index: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ArtifactArgs {
    #[arg(long, value_name = "JSON", help = "Integration matrix item JSON")]
    pub json: String,

    #[command(flatten)]
    pub output: OutputArgs,
}
