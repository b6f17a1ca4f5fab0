use crate::error::HttpAppError;
use axum::{
    extract::{Request, State},
    http::HeaderName,
    middleware::Next,
    response::{IntoResponse, Response},
};
use plume_core::{AccountId, AppError, AuthenticatedAccount};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct AuthState {
    pub account_header: HeaderName,
}

impl AuthState {
    pub fn new(account_header: &str) -> Result<Self, anyhow::Error> {
        let account_header = HeaderName::from_bytes(account_header.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid account header name {:?}: {}", account_header, e))?;
        Ok(Self { account_header })
    }
}

/// Resolve the calling account from the trusted gateway header and store it
/// in the request extensions. Requests without a well-formed account id stop
/// here with 401.
pub async fn auth_middleware(
    State(auth_state): State<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let header = match request
        .headers()
        .get(&auth_state.account_header)
        .and_then(|v| v.to_str().ok())
    {
        Some(value) => value.trim(),
        None => {
            return HttpAppError(AppError::Unauthorized(
                "Missing account credentials".to_string(),
            ))
            .into_response();
        }
    };

    let account_id = match header.parse::<AccountId>() {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(error = %e, "Rejected malformed account header");
            return HttpAppError(AppError::Unauthorized(
                "Invalid account credentials".to_string(),
            ))
            .into_response();
        }
    };

    request
        .extensions_mut()
        .insert(AuthenticatedAccount::new(account_id));

    next.run(request).await
}
