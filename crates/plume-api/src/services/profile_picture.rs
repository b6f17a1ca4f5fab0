//! Profile-picture upload service
//!
//! Orchestrates one upload: sanitize → store blob → record reference.
//! Nothing reaches the blob store unless the pipeline reached `Sanitized`.
//! Only the two infrastructure steps are retried.

use std::sync::Arc;
use std::time::Instant;

use plume_core::{
    AccountId, AppError, AuthenticatedAccount, ProfilePicture, StoredImageReference,
    UploadCandidate,
};
use plume_db::ProfilePictureRepository;
use plume_infra::{retry_with_backoff, RetryPolicy};
use plume_processing::UploadPipeline;
use plume_storage::{profile_picture_key, Storage, StorageError};

use crate::error::{app_error_from_storage, app_error_from_validation};

#[derive(Clone)]
pub struct ProfilePictureService {
    pipeline: UploadPipeline,
    storage: Arc<dyn Storage>,
    repository: Arc<dyn ProfilePictureRepository>,
    retry: RetryPolicy,
}

impl ProfilePictureService {
    pub fn new(
        pipeline: UploadPipeline,
        storage: Arc<dyn Storage>,
        repository: Arc<dyn ProfilePictureRepository>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            pipeline,
            storage,
            repository,
            retry,
        }
    }

    /// Run `candidate` through the pipeline and make the result the
    /// account's profile picture. A later upload for the same account
    /// replaces both the blob and the reference.
    #[tracing::instrument(
        skip(self, candidate),
        fields(account_id = %account.account_id(), size_bytes = candidate.len())
    )]
    pub async fn upload(
        &self,
        account: &AuthenticatedAccount,
        candidate: UploadCandidate,
    ) -> Result<ProfilePicture, AppError> {
        let started = Instant::now();
        let account_id = account.account_id();

        // Decoding is CPU-bound; keep it off the async workers.
        let pipeline = self.pipeline.clone();
        let sanitized = tokio::task::spawn_blocking(move || pipeline.run(&candidate))
            .await
            .map_err(|e| AppError::Internal(format!("Sanitization task failed: {}", e)))?
            .map_err(app_error_from_validation)?;

        let key = profile_picture_key(account_id);
        let content_type = sanitized.content_type();
        let data = sanitized.into_bytes();
        let size_bytes = data.len();

        let url = retry_with_backoff(
            self.retry,
            "storage.put",
            || {
                let storage = self.storage.clone();
                let key = key.clone();
                let data = data.clone();
                async move { storage.put(&key, content_type, data).await }
            },
            |e: &StorageError| e.is_transient(),
        )
        .await
        .map_err(app_error_from_storage)?;

        let reference = StoredImageReference::new(url);

        // The blob stays if this fails; the next upload overwrites it.
        let picture = retry_with_backoff(
            self.retry,
            "profile_pictures.upsert",
            || self.repository.upsert(account_id, &reference),
            |e: &AppError| matches!(e, AppError::Database(_)),
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, key = %key, "Blob stored but reference not recorded");
            AppError::StorageFailure(format!("repository upsert failed: {}", e))
        })?;

        tracing::info!(
            key = %key,
            stored_bytes = size_bytes,
            duration_ms = started.elapsed().as_millis() as u64,
            "Profile picture updated"
        );

        Ok(picture)
    }

    pub async fn get(&self, account_id: AccountId) -> Result<Option<ProfilePicture>, AppError> {
        self.repository.get(account_id).await
    }

    /// Clear the account's picture: the reference row first, then the blob.
    ///
    /// Returns whether a reference existed. The blob is deleted either way so
    /// a blob orphaned by an earlier failed upsert goes too.
    #[tracing::instrument(skip(self), fields(account_id = %account.account_id()))]
    pub async fn remove(&self, account: &AuthenticatedAccount) -> Result<bool, AppError> {
        let account_id = account.account_id();

        let removed = retry_with_backoff(
            self.retry,
            "profile_pictures.delete",
            || self.repository.delete(account_id),
            |e: &AppError| matches!(e, AppError::Database(_)),
        )
        .await?;

        let key = profile_picture_key(account_id);
        retry_with_backoff(
            self.retry,
            "storage.delete",
            || self.storage.delete(&key),
            |e: &StorageError| e.is_transient(),
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, key = %key, "Reference removed but blob not deleted");
            app_error_from_storage(e)
        })?;

        if removed {
            tracing::info!(key = %key, "Profile picture removed");
        }

        Ok(removed)
    }
}
