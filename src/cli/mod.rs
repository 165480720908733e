pub mod commands;
pub mod handlers;

pub use commands::{
    ArtifactArgs, CliArgs, Commands, DetectArgs, OutputArgs, ResolveArgs, ValidateContextArgs,
};
pub use handlers::{handle_artifact, handle_detect, handle_resolve, handle_validate_context};
