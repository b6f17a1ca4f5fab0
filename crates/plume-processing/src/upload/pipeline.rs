//! The upload pipeline driver.
//!
//! Runs the five stages in order and stops at the first failure. Each stage
//! transition is logged at debug; a rejection is logged once at warn with its
//! internal kind. The error returned carries the diagnostic for the caller's
//! own logs and must not be shown to the uploader.

use std::sync::Arc;

use plume_core::UploadCandidate;

use super::types::{PipelineStage, SanitizedImage};
use crate::kind::ImageKind;
use crate::sanitizer::{ImageSanitizer, PngSanitizer};
use crate::sniff::{ContentSniffer, InferSniffer};
use crate::validator::{validate_declared_type, validate_name, validate_size, ValidationError};

#[derive(Clone)]
pub struct UploadPipeline {
    sniffer: Arc<dyn ContentSniffer>,
    sanitizer: Arc<dyn ImageSanitizer>,
}

impl Default for UploadPipeline {
    fn default() -> Self {
        Self::new(Arc::new(InferSniffer), Arc::new(PngSanitizer))
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    tracing::debug!(from = %stage, to = %next, "Upload stage passed");
    *stage = next;
}

impl UploadPipeline {
    pub fn new(sniffer: Arc<dyn ContentSniffer>, sanitizer: Arc<dyn ImageSanitizer>) -> Self {
        Self { sniffer, sanitizer }
    }

    /// Run every stage over `candidate`.
    ///
    /// On success the returned image is 64x64 RGB PNG; on failure nothing
    /// derived from the candidate survives.
    pub fn run(&self, candidate: &UploadCandidate) -> Result<SanitizedImage, ValidationError> {
        let result = self.run_stages(candidate);

        if let Err(ref err) = result {
            tracing::warn!(
                stage = %err.stage(),
                to = %PipelineStage::Rejected,
                kind = err.kind(),
                size_bytes = candidate.len(),
                detail = %err,
                "Upload rejected"
            );
        }

        result
    }

    fn run_stages(&self, candidate: &UploadCandidate) -> Result<SanitizedImage, ValidationError> {
        let mut stage = PipelineStage::Pending;

        let extension_kind = validate_name(candidate.declared_name())?;
        advance(&mut stage, PipelineStage::NameOk);

        let declared_kind = validate_declared_type(candidate.declared_mime_type())?;
        advance(&mut stage, PipelineStage::TypeHintOk);

        validate_size(candidate.len())?;
        advance(&mut stage, PipelineStage::SizeOk);

        let sniffed_kind = self.sniff(candidate.raw_bytes(), declared_kind, extension_kind)?;
        advance(&mut stage, PipelineStage::SniffOk);

        let sanitized = self.sanitizer.sanitize(candidate.raw_bytes(), sniffed_kind)?;
        advance(&mut stage, PipelineStage::Sanitized);

        Ok(sanitized)
    }

    /// Sniffed type is authoritative; both hints must agree with it.
    fn sniff(
        &self,
        bytes: &[u8],
        declared: ImageKind,
        from_extension: ImageKind,
    ) -> Result<ImageKind, ValidationError> {
        let detected = self.sniffer.sniff(bytes);

        let sniffed = detected.and_then(ImageKind::from_mime_type).ok_or_else(|| {
            ValidationError::SniffMismatch(format!(
                "content detected as {}",
                detected.unwrap_or("unknown")
            ))
        })?;

        if sniffed != declared {
            return Err(ValidationError::SniffMismatch(format!(
                "content is {} but declared as {}",
                sniffed, declared
            )));
        }

        if sniffed != from_extension {
            return Err(ValidationError::SniffMismatch(format!(
                "content is {} but extension is {}",
                sniffed,
                from_extension.extension()
            )));
        }

        Ok(sniffed)
    }
}
