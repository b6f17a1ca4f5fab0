//! API constants

/// Versioned prefix for every JSON route.
pub const API_PREFIX: &str = "/api/v0";

/// Mount point for blobs served from local or in-memory storage. Matches the
/// default `LOCAL_STORAGE_BASE_URL`.
pub const BLOB_PREFIX: &str = "/blobs";

/// Whole-request ceiling, applied before multipart parsing. The pipeline has
/// its own, much smaller, per-file ceiling.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Server-level concurrency limit.
pub const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Multipart field carrying the upload.
pub const UPLOAD_FIELD_NAME: &str = "file";
