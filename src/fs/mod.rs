//! FileSystem abstraction for testable file operations

pub mod manifest;
mod mock;
mod real;
mod r#trait;

pub use manifest::ManifestReader;
pub use mock::{MockEntry, MockFileSystem};
pub use r#trait::{DirEntry, FileSystem, FileType};
pub use real::RealFileSystem;
