//! Application state shared by every handler.

use plume_core::Config;
use plume_db::ProfilePictureRepository;
use plume_infra::RetryPolicy;
use plume_processing::UploadPipeline;
use plume_storage::Storage;
use std::sync::Arc;
use std::time::Duration;

use crate::services::profile_picture::ProfilePictureService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub repository: Arc<dyn ProfilePictureRepository>,
    pub profile_pictures: ProfilePictureService,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        repository: Arc<dyn ProfilePictureRepository>,
    ) -> Self {
        let retry = RetryPolicy::new(
            config.storage_retry_attempts(),
            Duration::from_millis(config.storage_retry_base_delay_ms()),
        );

        let profile_pictures = ProfilePictureService::new(
            UploadPipeline::default(),
            storage.clone(),
            repository.clone(),
            retry,
        );

        Self {
            config,
            storage,
            repository,
            profile_pictures,
        }
    }
}
