//! Plume database layer
//!
//! Persistence for the account → profile-picture reference mapping.

pub mod db;

pub use db::{
    InMemoryProfilePictureRepository, PgProfilePictureRepository, ProfilePictureRepository,
};
