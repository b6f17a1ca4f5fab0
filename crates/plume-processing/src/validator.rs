//! Cheap, pre-decode checks: filename, declared MIME type and size.
//!
//! These run before any byte of content is inspected. The name and declared
//! type are hints; the sniffer re-derives the real type afterwards.

use crate::kind::ImageKind;
use crate::limits::{MAX_BASENAME_LEN, MAX_UPLOAD_BYTES};
use crate::upload::PipelineStage;

/// Why an upload was rejected.
///
/// The messages are internal diagnostics for logs and tests. Callers only
/// ever see a generic "Invalid file".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid filename: {0}")]
    NameInvalid(String),

    #[error("Declared content type not allowed: {declared:?}")]
    TypeMismatch { declared: String },

    #[error("Empty file")]
    EmptyFile,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Content type mismatch: {0}")]
    SniffMismatch(String),

    #[error("Image decode failed: {0}")]
    DecodeFailure(String),
}

impl ValidationError {
    /// Last stage the upload reached before this rejection.
    pub fn stage(&self) -> PipelineStage {
        match self {
            ValidationError::NameInvalid(_) => PipelineStage::Pending,
            ValidationError::TypeMismatch { .. } => PipelineStage::NameOk,
            ValidationError::EmptyFile | ValidationError::FileTooLarge { .. } => {
                PipelineStage::TypeHintOk
            }
            ValidationError::SniffMismatch(_) => PipelineStage::SizeOk,
            ValidationError::DecodeFailure(_) => PipelineStage::SniffOk,
        }
    }

    /// Short machine name for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::NameInvalid(_) => "name_invalid",
            ValidationError::TypeMismatch { .. } => "type_mismatch",
            ValidationError::EmptyFile => "empty_file",
            ValidationError::FileTooLarge { .. } => "file_too_large",
            ValidationError::SniffMismatch(_) => "sniff_mismatch",
            ValidationError::DecodeFailure(_) => "decode_failure",
        }
    }

    pub fn is_size_error(&self) -> bool {
        matches!(
            self,
            ValidationError::EmptyFile | ValidationError::FileTooLarge { .. }
        )
    }
}

/// Validate the client-declared filename.
///
/// Returns the image kind implied by the extension so later stages can check
/// it against the sniffed content.
pub fn validate_name(filename: &str) -> Result<ImageKind, ValidationError> {
    if filename.contains('\0') || filename.contains("0x00") {
        return Err(ValidationError::NameInvalid(
            "contains a null marker".to_string(),
        ));
    }

    let (basename, extension) = filename.split_once('.').ok_or_else(|| {
        ValidationError::NameInvalid("missing extension separator".to_string())
    })?;

    if extension.contains('.') {
        return Err(ValidationError::NameInvalid(
            "more than one extension separator".to_string(),
        ));
    }

    if basename.is_empty() || extension.is_empty() {
        return Err(ValidationError::NameInvalid(
            "empty basename or extension".to_string(),
        ));
    }

    let kind = ImageKind::from_extension(extension).ok_or_else(|| {
        ValidationError::NameInvalid(format!("extension {:?} not allowed", extension))
    })?;

    let length = basename.chars().count();
    if length > MAX_BASENAME_LEN {
        return Err(ValidationError::NameInvalid(format!(
            "basename is {} characters (max: {})",
            length, MAX_BASENAME_LEN
        )));
    }

    if let Some(c) = basename
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '-'))
    {
        return Err(ValidationError::NameInvalid(format!(
            "basename contains {:?}",
            c
        )));
    }

    Ok(kind)
}

/// Validate the client-declared MIME type. Exact match only.
pub fn validate_declared_type(content_type: &str) -> Result<ImageKind, ValidationError> {
    ImageKind::from_mime_type(content_type).ok_or_else(|| ValidationError::TypeMismatch {
        declared: content_type.to_string(),
    })
}

/// Validate the raw upload size.
pub fn validate_size(size: usize) -> Result<(), ValidationError> {
    if size == 0 {
        return Err(ValidationError::EmptyFile);
    }

    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge {
            size,
            max: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}
