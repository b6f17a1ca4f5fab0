//! Test helpers: build AppState and router for integration tests.
//!
//! Everything runs against in-memory storage and the in-memory repository, so
//! no database or object store is needed.

#![allow(dead_code)]

pub mod fixtures;

use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use plume_api::constants;
use plume_api::setup::routes;
use plume_api::state::AppState;
use plume_core::{AccountId, BaseConfig, Config, PlumeConfig, StorageBackend};
use plume_db::InMemoryProfilePictureRepository;
use plume_storage::{MemoryStorage, Storage};
use std::sync::Arc;

pub const ACCOUNT_HEADER: &str = "x-authenticated-account";

/// API path prefix for tests (e.g. `/api/v0`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server plus handles on the in-memory collaborators.
pub struct TestApp {
    pub server: TestServer,
    pub storage: MemoryStorage,
    pub repository: InMemoryProfilePictureRepository,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    /// Multipart upload of one `file` field as `account`.
    pub async fn upload(
        &self,
        account: AccountId,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> TestResponse {
        let part = Part::bytes(bytes::Bytes::from(bytes))
            .file_name(filename)
            .mime_type(mime_type);
        self.server
            .post(&api_path("/profile-picture"))
            .add_header(ACCOUNT_HEADER, account.to_string())
            .multipart(MultipartForm::new().add_part("file", part))
            .await
    }
}

pub fn new_account() -> AccountId {
    AccountId::new(uuid::Uuid::new_v4())
}

pub async fn setup_test_app() -> TestApp {
    let storage = MemoryStorage::default();
    let (server, repository) = build_server(Arc::new(storage.clone())).await;
    TestApp {
        server,
        storage,
        repository,
    }
}

/// Server over a caller-supplied blob store (e.g. one that fails on purpose).
pub async fn setup_test_app_with_storage(
    storage: Arc<dyn Storage>,
) -> (TestServer, InMemoryProfilePictureRepository) {
    build_server(storage).await
}

async fn build_server(
    storage: Arc<dyn Storage>,
) -> (TestServer, InMemoryProfilePictureRepository) {
    let (app, repository) = build_router(storage).await;
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    (server, repository)
}

/// The bare router, for driving requests through `tower::ServiceExt::oneshot`
/// with exact control over headers such as `Content-Length`.
pub async fn build_router(
    storage: Arc<dyn Storage>,
) -> (Router, InMemoryProfilePictureRepository) {
    let config = create_test_config();
    let repository = InMemoryProfilePictureRepository::new();

    let state = Arc::new(AppState::new(
        config.clone(),
        storage,
        Arc::new(repository.clone()),
    ));

    let app = routes::setup_routes(&config, state)
        .await
        .expect("Failed to setup routes");

    (app, repository)
}

fn create_test_config() -> Config {
    Config(Box::new(PlumeConfig {
        base: BaseConfig {
            server_port: 4000,
            cors_origins: vec!["*".to_string()],
            db_max_connections: 5,
            db_timeout_seconds: 30,
            environment: "test".to_string(),
            log_format: "pretty".to_string(),
        },
        database_url: None,
        storage_backend: StorageBackend::Memory,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        aws_region: None,
        local_storage_path: None,
        local_storage_base_url: None,
        auth_account_header: ACCOUNT_HEADER.to_string(),
        storage_retry_attempts: 3,
        storage_retry_base_delay_ms: 1,
    }))
}
