use crate::error::ErrorResponse;
use axum::extract::FromRequestParts;
use axum::http::{request::Parts, StatusCode};
use axum::Json;
use plume_core::AuthenticatedAccount;

/// The account the request acts for, as established by [`auth_middleware`].
///
/// Extracted from request parts rather than `Extension` so it can sit in
/// front of `Multipart` in a handler signature.
///
/// [`auth_middleware`]: super::middleware::auth_middleware
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub AuthenticatedAccount);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ErrorResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedAccount>()
            .cloned()
            .map(CurrentAccount)
            .ok_or_else(|| {
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorResponse::full(
                        "Missing account context",
                        "UNAUTHORIZED",
                        false,
                        Some("Sign in and try again"),
                    )),
                )
            })
    }
}
