pub mod profile_picture;
