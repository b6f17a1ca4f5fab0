//! Upload pipeline: name → declared type → size → sniff → sanitize.

pub mod pipeline;
pub mod types;

pub use pipeline::UploadPipeline;
pub use types::{PipelineStage, SanitizedImage};
