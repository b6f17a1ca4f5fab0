//! Fixed pipeline limits. None of these are configurable at runtime.

/// Hard ceiling on raw upload size, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 5120;

/// Longest accepted filename basename, in characters.
pub const MAX_BASENAME_LEN: usize = 255;

pub const OUTPUT_WIDTH: u32 = 64;
pub const OUTPUT_HEIGHT: u32 = 64;

/// Largest image dimension the decoder will accept.
pub const MAX_DECODE_DIMENSION: u32 = 4096;

/// Allocation budget handed to the decoder (64 MiB).
pub const MAX_DECODE_ALLOC_BYTES: u64 = 64 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "png"];
pub const ALLOWED_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];
