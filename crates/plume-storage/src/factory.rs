#[cfg(feature = "storage-local")]
use crate::LocalStorage;
use crate::MemoryStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use plume_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let bucket = config
                .s3_bucket()
                .map(String::from)
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = config.s3_region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = S3Storage::new(bucket, region, endpoint).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;
            let base_url = config
                .local_storage_base_url()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
                })?;

            let storage = LocalStorage::new(base_path, base_url).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),

        StorageBackend::Memory => {
            let base_url = config
                .local_storage_base_url()
                .unwrap_or("memory://blobs")
                .to_string();
            tracing::warn!("Using in-memory blob storage; uploads are lost on restart");
            Ok(Arc::new(MemoryStorage::new(base_url)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plume_core::{BaseConfig, PlumeConfig};

    fn config(backend: StorageBackend, path: Option<String>) -> Config {
        Config(Box::new(PlumeConfig {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec![],
                db_max_connections: 1,
                db_timeout_seconds: 1,
                environment: "test".to_string(),
                log_format: "pretty".to_string(),
            },
            database_url: None,
            storage_backend: backend,
            s3_bucket: None,
            s3_region: None,
            s3_endpoint: None,
            aws_region: None,
            local_storage_path: path,
            local_storage_base_url: Some("http://localhost:4000/blobs".to_string()),
            auth_account_header: "x-authenticated-account".to_string(),
            storage_retry_attempts: 1,
            storage_retry_base_delay_ms: 0,
        }))
    }

    #[tokio::test]
    async fn test_creates_memory_backend() {
        let storage = create_storage(&config(StorageBackend::Memory, None))
            .await
            .unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Memory);
    }

    #[tokio::test]
    async fn test_creates_local_backend() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("blobs").to_string_lossy().into_owned();
        let storage = create_storage(&config(StorageBackend::Local, Some(path)))
            .await
            .unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
        assert!(dir.path().join("blobs").is_dir());
    }

    #[tokio::test]
    async fn test_s3_without_bucket_is_config_error() {
        let result = create_storage(&config(StorageBackend::S3, None)).await;
        assert!(matches!(result, Err(StorageError::ConfigError(_))));
    }
}
