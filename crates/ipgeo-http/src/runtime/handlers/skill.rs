//! Skill webhook handler

use axum::{
    body::Bytes,
    extract::{Extension, State},
    response::Json,
};
use ipgeo_core::{GeoOracle, ResponseEnvelope};
use std::time::Instant;
use tracing::{Instrument, debug, info_span};

use crate::runtime::{
    SkillRuntime,
    error::{RequestIdExtension, RuntimeError, RuntimeResult},
};

/// POST /skill - Handle one inbound envelope
///
/// Retryable outcomes (bad or private address, unknown location) are
/// ordinary 200 responses. Only fatal skill errors produce an error body.
pub async fn handle_skill<O: GeoOracle + 'static>(
    State(runtime): State<SkillRuntime<O>>,
    Extension(RequestIdExtension(request_id)): Extension<RequestIdExtension>,
    body: Bytes,
) -> RuntimeResult<Json<ResponseEnvelope>> {
    let start = Instant::now();
    let span = info_span!("skill_request", request_id = %request_id);

    let result = runtime.router.handle_json(&body).instrument(span).await;
    let elapsed = start.elapsed();

    match result {
        Ok((outcome, response)) => {
            runtime.metrics.record_outcome(outcome, elapsed);
            debug!(
                request_id = %request_id,
                outcome = %outcome,
                elapsed_ms = elapsed.as_millis() as u64,
                "Skill request handled"
            );
            Ok(Json(response))
        }
        Err(e) => {
            runtime.metrics.record_error(elapsed);
            Err(RuntimeError::skill(e, request_id))
        }
    }
}
