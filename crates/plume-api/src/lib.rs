//! Plume API Library
//!
//! HTTP surface for profile-picture uploads: handlers, authentication
//! middleware, the upload service and application setup.

mod handlers;
mod utils;

pub mod auth;
pub mod constants;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use error::{ErrorResponse, HttpAppError};
pub use services::profile_picture::ProfilePictureService;
pub use state::AppState;
