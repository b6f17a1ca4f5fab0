pub mod blobs;
pub mod health;
pub mod profile_picture;
