use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use plume_core::{AccountId, AppError};
use serde::Serialize;

use crate::auth::CurrentAccount;
use crate::error::HttpAppError;
use crate::state::AppState;
use crate::utils::upload::extract_multipart_file;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub profile_picture: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProfilePictureResponse {
    pub profile_picture: String,
}

/// Upload a new profile picture for the calling account.
///
/// Every rejection answers 400 with the same "Invalid file" body, whatever
/// stage refused it. Storage faults answer 503 "Upload failed".
#[tracing::instrument(
    skip(state, current, multipart),
    fields(account_id = %current.0.account_id(), operation = "upload_profile_picture")
)]
pub async fn upload_profile_picture(
    State(state): State<Arc<AppState>>,
    current: CurrentAccount,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, HttpAppError> {
    let CurrentAccount(account) = current;
    let multipart = multipart
        .map_err(|e| AppError::InvalidFile(format!("multipart: {}", e.body_text())))?;
    let candidate = extract_multipart_file(multipart).await?;

    let picture = state.profile_pictures.upload(&account, candidate).await?;

    Ok((
        StatusCode::OK,
        Json(UploadResponse {
            message: "Image uploaded successfully",
            profile_picture: picture.reference.into_inner(),
        }),
    ))
}

/// The calling account's own picture; 404 when none was uploaded yet.
pub async fn get_own_profile_picture(
    State(state): State<Arc<AppState>>,
    CurrentAccount(account): CurrentAccount,
) -> Result<impl IntoResponse, HttpAppError> {
    let picture = state
        .profile_pictures
        .get(account.account_id())
        .await?
        .ok_or_else(|| AppError::NotFound("Profile picture not found".to_string()))?;

    Ok(Json(ProfilePictureResponse {
        profile_picture: picture.reference.into_inner(),
    }))
}

/// Remove the calling account's picture; 404 when there was none.
#[tracing::instrument(
    skip(state, current),
    fields(account_id = %current.0.account_id(), operation = "remove_profile_picture")
)]
pub async fn remove_own_profile_picture(
    State(state): State<Arc<AppState>>,
    current: CurrentAccount,
) -> Result<impl IntoResponse, HttpAppError> {
    let CurrentAccount(account) = current;
    if !state.profile_pictures.remove(&account).await? {
        return Err(AppError::NotFound("Profile picture not found".to_string()).into());
    }

    Ok(Json(MessageResponse {
        message: "Profile picture removed",
    }))
}

/// Another account's picture. Accounts without one get an empty reference.
pub async fn get_account_profile_picture(
    State(state): State<Arc<AppState>>,
    CurrentAccount(_caller): CurrentAccount,
    Path(account_id): Path<String>,
) -> Result<impl IntoResponse, HttpAppError> {
    let account_id: AccountId = account_id
        .parse()
        .map_err(|_| AppError::InvalidInput("Invalid account id".to_string()))?;

    let profile_picture = state
        .profile_pictures
        .get(account_id)
        .await?
        .map(|p| p.reference.into_inner())
        .unwrap_or_default();

    Ok(Json(ProfilePictureResponse { profile_picture }))
}
