//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns "healthy", "unhealthy" or "timeout".
/// The error text only goes to the log since this route is public.
async fn run_check<F, E>(timeout: Duration, f: F, check: &str) -> &'static str
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy",
        Ok(Err(e)) => {
            tracing::error!(check = check, error = %e, "Health check failed");
            "unhealthy"
        }
        Err(_) => {
            tracing::error!(
                check = check,
                timeout_ms = timeout.as_millis() as u64,
                "Health check timed out"
            );
            "timeout"
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub storage: &'static str,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - repository and blob store reachable.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (database, storage) = tokio::join!(
        run_check(CHECK_TIMEOUT, state.repository.health_check(), "database"),
        run_check(CHECK_TIMEOUT, state.storage.health_check(), "storage"),
    );

    let ready = database == "healthy" && storage == "healthy";
    if !ready {
        tracing::error!(database = database, storage = storage, "Readiness check failed");
    }

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            status: if ready { "ready" } else { "not_ready" },
            database,
            storage,
        }),
    )
}
