//! # Runtime Module
//!
//! Axum runtime around a [`SkillRouter`](ipgeo_core::SkillRouter): request
//! ids, error bodies, metrics and graceful shutdown.

/// Environment-based configuration loading.
pub mod config;
/// Error responses and the request id middleware.
pub mod error;
/// HTTP request handlers organized by functionality.
pub mod handlers;
/// Runtime state and server loop.
pub mod http;
/// Prometheus metrics for skill invocations.
pub mod metrics;
/// HTTP router configuration and route registration.
pub mod router;
/// Signal handling for graceful shutdown.
pub mod shutdown;

pub use config::{ConfigError, HttpRuntimeConfigBuilder};
pub use error::{ErrorCode, ErrorResponse, RequestId, RuntimeError, RuntimeResult};
pub use http::{HttpRuntimeConfig, SkillRuntime};
pub use metrics::SkillMetrics;
pub use shutdown::shutdown_signal;
