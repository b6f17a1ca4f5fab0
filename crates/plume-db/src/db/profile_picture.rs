use async_trait::async_trait;
use chrono::Utc;
use plume_core::{AccountId, AppError, ProfilePicture, StoredImageReference};
use sqlx::{PgPool, Postgres};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Stores which image reference belongs to which account.
///
/// `upsert` is idempotent per account: the latest reference replaces any
/// previous one and no history is kept.
#[async_trait]
pub trait ProfilePictureRepository: Send + Sync {
    async fn upsert(
        &self,
        account_id: AccountId,
        reference: &StoredImageReference,
    ) -> Result<ProfilePicture, AppError>;

    async fn get(&self, account_id: AccountId) -> Result<Option<ProfilePicture>, AppError>;

    /// Returns whether a row was removed.
    async fn delete(&self, account_id: AccountId) -> Result<bool, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

/// Repository for profile pictures
#[derive(Clone)]
pub struct PgProfilePictureRepository {
    pool: PgPool,
}

impl PgProfilePictureRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfilePictureRepository for PgProfilePictureRepository {
    #[tracing::instrument(skip(self), fields(db.table = "profile_pictures", db.operation = "upsert"))]
    async fn upsert(
        &self,
        account_id: AccountId,
        reference: &StoredImageReference,
    ) -> Result<ProfilePicture, AppError> {
        let picture = sqlx::query_as::<Postgres, ProfilePicture>(
            r#"
            INSERT INTO profile_pictures (account_id, reference)
            VALUES ($1, $2)
            ON CONFLICT (account_id)
            DO UPDATE SET reference = EXCLUDED.reference, updated_at = NOW()
            RETURNING account_id, reference, updated_at
            "#,
        )
        .bind(account_id)
        .bind(reference)
        .fetch_one(&self.pool)
        .await?;

        Ok(picture)
    }

    #[tracing::instrument(skip(self), fields(db.table = "profile_pictures", db.operation = "select"))]
    async fn get(&self, account_id: AccountId) -> Result<Option<ProfilePicture>, AppError> {
        let picture = sqlx::query_as::<Postgres, ProfilePicture>(
            "SELECT account_id, reference, updated_at FROM profile_pictures WHERE account_id = $1",
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(picture)
    }

    #[tracing::instrument(skip(self), fields(db.table = "profile_pictures", db.operation = "delete"))]
    async fn delete(&self, account_id: AccountId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM profile_pictures WHERE account_id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// In-memory repository for development and tests. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryProfilePictureRepository {
    pictures: Arc<RwLock<HashMap<AccountId, ProfilePicture>>>,
}

impl InMemoryProfilePictureRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.pictures.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pictures.read().await.is_empty()
    }
}

#[async_trait]
impl ProfilePictureRepository for InMemoryProfilePictureRepository {
    async fn upsert(
        &self,
        account_id: AccountId,
        reference: &StoredImageReference,
    ) -> Result<ProfilePicture, AppError> {
        let picture = ProfilePicture {
            account_id,
            reference: reference.clone(),
            updated_at: Utc::now(),
        };
        self.pictures
            .write()
            .await
            .insert(account_id, picture.clone());
        Ok(picture)
    }

    async fn get(&self, account_id: AccountId) -> Result<Option<ProfilePicture>, AppError> {
        Ok(self.pictures.read().await.get(&account_id).cloned())
    }

    async fn delete(&self, account_id: AccountId) -> Result<bool, AppError> {
        Ok(self.pictures.write().await.remove(&account_id).is_some())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }
}
