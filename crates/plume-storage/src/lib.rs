//! Plume Storage Library
//!
//! Blob storage for sanitized profile pictures. The [`Storage`] trait has
//! S3, local filesystem and in-memory implementations.
//!
//! # Storage key format
//!
//! Every account owns exactly one object: `profile-pictures/{account_id}.png`.
//! A new upload overwrites the previous object (last write wins). Keys are
//! derived from the account id only, never from a client filename. Keys must
//! not contain `..`, a backslash or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use keys::profile_picture_key;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use plume_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
