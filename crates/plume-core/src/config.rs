//! Configuration module
//!
//! Server, database, storage and retry settings loaded from the environment.
//! The upload pipeline limits are compile-time constants in `plume-processing`
//! and are deliberately absent here.

use std::env;

use crate::storage_types::StorageBackend;

const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 10;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const STORAGE_RETRY_ATTEMPTS: u32 = 3;
const STORAGE_RETRY_BASE_DELAY_MS: u64 = 100;
const AUTH_ACCOUNT_HEADER: &str = "x-authenticated-account";
const LOCAL_STORAGE_PATH: &str = "./data/blobs";
const LOCAL_STORAGE_BASE_URL: &str = "http://localhost:4000/blobs";

/// Settings every Plume binary needs
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub environment: String,
    pub log_format: String,
}

/// Profile-picture service configuration
#[derive(Clone, Debug)]
pub struct PlumeConfig {
    pub base: BaseConfig,
    pub database_url: Option<String>,
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // S3-compatible providers (MinIO etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    pub auth_account_header: String,
    pub storage_retry_attempts: u32,
    pub storage_retry_base_delay_ms: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<PlumeConfig>);

impl Config {
    fn inner(&self) -> &PlumeConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        is_production_name(&self.inner().base.environment)
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = PlumeConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.inner().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.inner().base.server_port
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.inner().base.cors_origins
    }

    pub fn environment(&self) -> &str {
        &self.inner().base.environment
    }

    pub fn log_format(&self) -> &str {
        &self.inner().base.log_format
    }

    pub fn db_max_connections(&self) -> u32 {
        self.inner().base.db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.inner().base.db_timeout_seconds
    }

    pub fn database_url(&self) -> Option<&str> {
        self.inner().database_url.as_deref()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.inner().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.inner().s3_bucket.as_deref()
    }

    /// `S3_REGION` wins over `AWS_REGION`.
    pub fn s3_region(&self) -> Option<&str> {
        self.inner()
            .s3_region
            .as_deref()
            .or(self.inner().aws_region.as_deref())
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.inner().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.inner().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.inner().local_storage_base_url.as_deref()
    }

    pub fn auth_account_header(&self) -> &str {
        &self.inner().auth_account_header
    }

    pub fn storage_retry_attempts(&self) -> u32 {
        self.inner().storage_retry_attempts
    }

    pub fn storage_retry_base_delay_ms(&self) -> u64 {
        self.inner().storage_retry_base_delay_ms
    }
}

fn is_production_name(environment: &str) -> bool {
    let environment = environment.to_lowercase();
    environment == "production" || environment == "prod"
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl PlumeConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        if is_production_name(&environment) && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let storage_backend = match optional_var("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::Local,
        };

        let base = BaseConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            environment,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase(),
        };

        Ok(PlumeConfig {
            base,
            database_url: optional_var("DATABASE_URL"),
            storage_backend,
            s3_bucket: optional_var("S3_BUCKET"),
            s3_region: optional_var("S3_REGION"),
            s3_endpoint: optional_var("S3_ENDPOINT"),
            aws_region: optional_var("AWS_REGION"),
            local_storage_path: Some(
                optional_var("LOCAL_STORAGE_PATH")
                    .unwrap_or_else(|| LOCAL_STORAGE_PATH.to_string()),
            ),
            local_storage_base_url: Some(
                optional_var("LOCAL_STORAGE_BASE_URL")
                    .unwrap_or_else(|| LOCAL_STORAGE_BASE_URL.to_string()),
            ),
            auth_account_header: optional_var("AUTH_ACCOUNT_HEADER")
                .unwrap_or_else(|| AUTH_ACCOUNT_HEADER.to_string())
                .to_lowercase(),
            storage_retry_attempts: env::var("STORAGE_RETRY_ATTEMPTS")
                .unwrap_or_else(|_| STORAGE_RETRY_ATTEMPTS.to_string())
                .parse()
                .unwrap_or(STORAGE_RETRY_ATTEMPTS),
            storage_retry_base_delay_ms: env::var("STORAGE_RETRY_BASE_DELAY_MS")
                .unwrap_or_else(|_| STORAGE_RETRY_BASE_DELAY_MS.to_string())
                .parse()
                .unwrap_or(STORAGE_RETRY_BASE_DELAY_MS),
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        let production = is_production_name(&self.base.environment);

        match self.database_url.as_deref() {
            Some(url) if !url.starts_with("postgres://") && !url.starts_with("postgresql://") => {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
            None if production => {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be set in production; the in-memory repository is for development only"
                ));
            }
            _ => {}
        }

        if self.storage_retry_attempts == 0 {
            return Err(anyhow::anyhow!("STORAGE_RETRY_ATTEMPTS must be at least 1"));
        }

        if !matches!(self.base.log_format.as_str(), "pretty" | "json") {
            return Err(anyhow::anyhow!("LOG_FORMAT must be 'pretty' or 'json'"));
        }

        if self.auth_account_header.is_empty() {
            return Err(anyhow::anyhow!("AUTH_ACCOUNT_HEADER must not be empty"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_BUCKET must be set when using S3 storage backend"
                    ));
                }
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
                if self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_BASE_URL must be set when using local storage backend"
                    ));
                }
            }
            StorageBackend::Memory => {
                if production {
                    return Err(anyhow::anyhow!(
                        "STORAGE_BACKEND=memory is not allowed in production"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dev_config() -> PlumeConfig {
        PlumeConfig {
            base: BaseConfig {
                server_port: 4000,
                cors_origins: vec!["*".to_string()],
                db_max_connections: MAX_CONNECTIONS,
                db_timeout_seconds: CONNECTION_TIMEOUT_SECS,
                environment: "development".to_string(),
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
            auth_account_header: AUTH_ACCOUNT_HEADER.to_string(),
            storage_retry_attempts: 3,
            storage_retry_base_delay_ms: 100,
        }
    }

    #[test]
    fn test_dev_config_is_valid() {
        assert!(dev_config().validate().is_ok());
    }

    #[test]
    fn test_production_requires_database() {
        let mut config = dev_config();
        config.base.environment = "production".to_string();
        config.storage_backend = StorageBackend::Local;
        config.local_storage_path = Some("/tmp".to_string());
        config.local_storage_base_url = Some("http://localhost".to_string());
        assert!(config.validate().is_err());

        config.database_url = Some("postgresql://localhost/plume".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_production_rejects_memory_storage() {
        let mut config = dev_config();
        config.base.environment = "prod".to_string();
        config.database_url = Some("postgres://localhost/plume".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_database_url() {
        let mut config = dev_config();
        config.database_url = Some("mysql://localhost/plume".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_s3_requires_bucket_and_region() {
        let mut config = dev_config();
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());

        config.s3_bucket = Some("avatars".to_string());
        assert!(config.validate().is_err());

        config.aws_region = Some("eu-west-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_retry_attempts_rejected() {
        let mut config = dev_config();
        config.storage_retry_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_region_precedence() {
        let mut inner = dev_config();
        inner.aws_region = Some("us-east-1".to_string());
        inner.s3_region = Some("eu-central-1".to_string());
        let config = Config(Box::new(inner));
        assert_eq!(config.s3_region(), Some("eu-central-1"));
    }

    #[test]
    fn test_is_production() {
        let mut inner = dev_config();
        assert!(!Config(Box::new(inner.clone())).is_production());
        inner.base.environment = "PRODUCTION".to_string();
        assert!(Config(Box::new(inner)).is_production());
    }
}
