//! # IP GeoLocator HTTP Runtime
//!
//! Exposes the skill router as a webhook the voice platform can POST
//! envelopes to, alongside liveness, readiness and Prometheus endpoints.
//!
//! ## Endpoints
//!
//! - `POST /skill` - handle one inbound envelope
//! - `GET /health` - liveness
//! - `GET /ready` - oracle readiness (503 when the database is unusable)
//! - `GET /metrics` - Prometheus text format
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ipgeo_core::{GeoOracle, SkillRouter};
//! use ipgeo_http::{HttpRuntimeConfigBuilder, SkillRuntime};
//!
//! async fn run<O: GeoOracle + 'static>(router: SkillRouter<O>) -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HttpRuntimeConfigBuilder::from_env()?.build()?;
//!     SkillRuntime::new(router)?.serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod runtime;

pub use runtime::{
    ConfigError, ErrorCode, ErrorResponse, HttpRuntimeConfig, HttpRuntimeConfigBuilder,
    RequestId, RuntimeError, RuntimeResult, SkillMetrics, SkillRuntime, shutdown_signal,
};
