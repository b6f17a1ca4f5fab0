//! Domain models

pub mod account;
pub mod profile_picture;
pub mod upload;

pub use account::{AccountId, AuthenticatedAccount};
pub use profile_picture::{ProfilePicture, StoredImageReference};
pub use upload::UploadCandidate;
