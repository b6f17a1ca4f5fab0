//! Plume processing
//!
//! The profile-picture upload pipeline. An [`UploadCandidate`] runs through
//! five ordered stages (name, declared type, size, content sniffing, image
//! sanitization); the first failure rejects the whole upload. Only a fully
//! sanitized 64x64 RGB PNG ever leaves this crate.
//!
//! [`UploadCandidate`]: plume_core::UploadCandidate

pub mod kind;
pub mod limits;
pub mod sanitizer;
pub mod sniff;
pub mod upload;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_support;

pub use kind::ImageKind;
pub use sanitizer::{ImageSanitizer, PngSanitizer};
pub use sniff::{ContentSniffer, InferSniffer};
pub use upload::{PipelineStage, SanitizedImage, UploadPipeline};
pub use validator::ValidationError;
