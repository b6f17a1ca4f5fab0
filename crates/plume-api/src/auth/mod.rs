//! Authentication
//!
//! Sessions are owned by the upstream gateway. It forwards the authenticated
//! account id in a trusted header; this module turns that header into an
//! [`AuthenticatedAccount`](plume_core::AuthenticatedAccount) capability.

pub mod middleware;
pub mod models;

pub use middleware::{auth_middleware, AuthState};
pub use models::CurrentAccount;
