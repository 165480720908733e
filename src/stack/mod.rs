//! Language classification and toolchain version detection.
//!
//! A [`LanguageRegistry`] holds one [`LanguageDefinition`] per supported
//! ecosystem in precedence order. [`ProjectResolver`] lists a directory, lets
//! the registry pick the governing language from marker file names, and then
//! asks that language for the declared toolchain version.
//!
//! # Example
//!
//! ```no_run
//! use pipeline_context::fs::RealFileSystem;
//! use pipeline_context::stack::{LanguageRegistry, ProjectResolver};
//! use std::path::Path;
//!
//! let fs = RealFileSystem::new();
//! let registry = LanguageRegistry::with_defaults();
//! let resolver = ProjectResolver::new(&fs, &registry);
//!
//! if let Some(info) = resolver.resolve(Path::new("services/api")) {
//!     println!("{} {}", info.language, info.version);
//! }
//! ```

#[macro_use]
pub mod id_enum_macro;

pub mod detection;
pub mod language;
pub mod language_id;
pub mod registry;

pub use detection::{ProjectInfo, ProjectResolver};
pub use language::{java_version_to_bp_jvm, LanguageDefinition};
pub use language_id::LanguageId;
pub use registry::LanguageRegistry;
