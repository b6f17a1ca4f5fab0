//! Route configuration and setup

use crate::auth::{auth_middleware, AuthState};
use crate::constants::{API_PREFIX, BLOB_PREFIX, HTTP_CONCURRENCY_LIMIT, MAX_REQUEST_BODY_BYTES};
use crate::handlers::{blobs, health, profile_picture};
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use plume_core::Config;
use plume_infra::request_id_middleware;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub async fn setup_routes(
    config: &Config,
    state: Arc<AppState>,
) -> Result<Router<()>, anyhow::Error> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState::new(config.auth_account_header())?);

    // Protected routes (require an authenticated account)
    let protected_routes = protected_routes(state.clone()).layer(
        axum::middleware::from_fn_with_state(auth_state, auth_middleware),
    );

    let app = public_routes(state)
        .merge(protected_routes)
        .layer(ConcurrencyLimitLayer::new(HTTP_CONCURRENCY_LIMIT))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware));

    Ok(app)
}

fn public_routes(state: Arc<AppState>) -> Router<()> {
    Router::new()
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .route(&format!("{}/{{*key}}", BLOB_PREFIX), get(blobs::get_blob))
        .with_state(state)
}

fn protected_routes(state: Arc<AppState>) -> Router<()> {
    Router::new()
        .route(
            &format!("{}/profile-picture", API_PREFIX),
            get(profile_picture::get_own_profile_picture)
                .post(profile_picture::upload_profile_picture)
                .delete(profile_picture::remove_own_profile_picture),
        )
        .route(
            &format!("{}/accounts/{{account_id}}/profile-picture", API_PREFIX),
            get(profile_picture::get_account_profile_picture),
        )
        .with_state(state)
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers(Any);

    let origins = config.cors_origins();
    if origins.iter().any(|o| o == "*") {
        return Ok(cors.allow_origin(Any));
    }

    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|e| anyhow::anyhow!("Invalid CORS origin {:?}: {}", o, e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(cors.allow_origin(origins))
}
