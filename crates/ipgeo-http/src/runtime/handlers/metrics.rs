//! Prometheus scrape handler

use axum::extract::{Extension, State};
use ipgeo_core::GeoOracle;

use crate::runtime::{
    SkillRuntime,
    error::{RequestId, RequestIdExtension, RuntimeError, RuntimeResult},
};

/// GET /metrics - Prometheus text format
pub async fn metrics_endpoint<O: GeoOracle + 'static>(
    State(runtime): State<SkillRuntime<O>>,
    Extension(RequestIdExtension(request_id)): Extension<RequestIdExtension>,
) -> RuntimeResult<String> {
    runtime
        .metrics
        .encode()
        .map_err(|e| encode_failure(&e, request_id))
}

fn encode_failure(error: &prometheus::Error, request_id: RequestId) -> RuntimeError {
    RuntimeError::internal_error(format!("failed to encode metrics: {error}"), request_id)
}
