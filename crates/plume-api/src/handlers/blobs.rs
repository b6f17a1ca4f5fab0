//! Serves stored blobs when the backend has no public URL of its own
//! (local filesystem, memory).

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use plume_processing::ImageKind;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Only sanitized output is ever stored, so the content type is fixed.
pub async fn get_blob(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, HttpAppError> {
    let data = state.storage.download(&key).await?;

    let mut response = data.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(ImageKind::Png.mime_type()),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Ok(response)
}
