//! Repositories
//
// Profile picture references (trait + Postgres and in-memory implementations)
pub mod profile_picture;

pub use profile_picture::{
    InMemoryProfilePictureRepository, PgProfilePictureRepository, ProfilePictureRepository,
};
