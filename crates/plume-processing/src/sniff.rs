//! Magic-byte content sniffing.

use crate::kind::ImageKind;

/// Determines a file's real type from its bytes alone.
pub trait ContentSniffer: Send + Sync {
    /// MIME type detected from the content, `None` if nothing matched.
    fn sniff(&self, bytes: &[u8]) -> Option<&'static str>;

    fn sniff_image(&self, bytes: &[u8]) -> Option<ImageKind> {
        self.sniff(bytes).and_then(ImageKind::from_mime_type)
    }
}

/// Sniffer backed by the `infer` signature database.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferSniffer;

impl ContentSniffer for InferSniffer {
    fn sniff(&self, bytes: &[u8]) -> Option<&'static str> {
        infer::get(bytes).map(|kind| kind.mime_type())
    }
}
