use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::kind::ImageKind;

/// Where an upload currently is in the pipeline.
///
/// Stages only move forward. `Rejected` is absorbing and reachable from every
/// state before `Sanitized`; `Sanitized` is the only state from which the
/// result may be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Pending,
    NameOk,
    TypeHintOk,
    SizeOk,
    SniffOk,
    Sanitized,
    Rejected,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Pending => "pending",
            PipelineStage::NameOk => "name_ok",
            PipelineStage::TypeHintOk => "type_hint_ok",
            PipelineStage::SizeOk => "size_ok",
            PipelineStage::SniffOk => "sniff_ok",
            PipelineStage::Sanitized => "sanitized",
            PipelineStage::Rejected => "rejected",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineStage::Sanitized | PipelineStage::Rejected)
    }
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A canonical 64x64 RGB PNG.
///
/// Only the sanitizer can build one, so holding a `SanitizedImage` proves the
/// bytes went through every pipeline stage.
#[derive(Clone, PartialEq, Eq)]
pub struct SanitizedImage {
    bytes: Vec<u8>,
    width: u32,
    height: u32,
}

impl SanitizedImage {
    pub(crate) fn new(bytes: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            bytes,
            width,
            height,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn kind(&self) -> ImageKind {
        ImageKind::Png
    }

    pub fn content_type(&self) -> &'static str {
        self.kind().mime_type()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for SanitizedImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SanitizedImage")
            .field("size_bytes", &self.bytes.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}
