//! Plume infrastructure
//!
//! Cross-cutting pieces shared by the binaries: telemetry setup, HTTP
//! middleware and retry with backoff.

pub mod middleware;
pub mod retry;
pub mod telemetry;

pub use middleware::request_id::{get_request_id, request_id_middleware, RequestId};
pub use retry::{retry_with_backoff, RetryPolicy};
pub use telemetry::{init_telemetry, shutdown_telemetry, LogFormat};
