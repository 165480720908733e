//! Pipeline context schema and the key=value output channel

pub mod schema;
pub mod writer;

pub use schema::{
    BuildMethod, ChartBuild, ImageBuild, IntegrationMatrixEntry, MatrixEntry, PipelineContext,
};
pub use writer::{render_lines, OutputError, OutputTarget, OutputWriter};
