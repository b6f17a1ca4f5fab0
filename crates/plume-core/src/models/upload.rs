/// One untrusted file upload, exactly as the client declared it.
///
/// Created per request and dropped once the upload pipeline finishes. Nothing
/// in here has been checked yet.
#[derive(Clone)]
pub struct UploadCandidate {
    raw_bytes: Vec<u8>,
    declared_name: String,
    declared_mime_type: String,
}

impl UploadCandidate {
    pub fn new(
        raw_bytes: Vec<u8>,
        declared_name: impl Into<String>,
        declared_mime_type: impl Into<String>,
    ) -> Self {
        Self {
            raw_bytes,
            declared_name: declared_name.into(),
            declared_mime_type: declared_mime_type.into(),
        }
    }

    pub fn raw_bytes(&self) -> &[u8] {
        &self.raw_bytes
    }

    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    pub fn declared_mime_type(&self) -> &str {
        &self.declared_mime_type
    }

    pub fn len(&self) -> usize {
        self.raw_bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_bytes.is_empty()
    }
}

// Raw bytes are left out so logging a candidate never dumps attacker content.
impl std::fmt::Debug for UploadCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadCandidate")
            .field("size_bytes", &self.raw_bytes.len())
            .field("declared_name", &self.declared_name)
            .field("declared_mime_type", &self.declared_mime_type)
            .finish()
    }
}
