//! Plume Core Library
//!
//! Domain value objects, error types and configuration shared by every Plume
//! crate.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{BaseConfig, Config, PlumeConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    AccountId, AuthenticatedAccount, ProfilePicture, StoredImageReference, UploadCandidate,
};
pub use storage_types::StorageBackend;
