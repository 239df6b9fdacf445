//! Health and readiness HTTP handlers

use axum::{extract::State, http::StatusCode, response::Json};
use ipgeo_core::GeoOracle;
use tracing::warn;

use crate::runtime::SkillRuntime;

pub const SERVICE_NAME: &str = "ipgeo-skill";

/// GET /health - Liveness with version info
pub async fn health_check<O: GeoOracle + 'static>(
    State(runtime): State<SkillRuntime<O>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_seconds": runtime.uptime_seconds(),
        "timestamp": chrono::Utc::now(),
    }))
}

/// GET /ready - Readiness: can the oracle serve lookups right now
pub async fn readiness_check<O: GeoOracle + 'static>(
    State(runtime): State<SkillRuntime<O>>,
) -> (StatusCode, Json<serde_json::Value>) {
    let oracle = runtime.router.oracle();

    match oracle.health().await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "ready",
                "oracle": oracle.describe(),
                "timestamp": chrono::Utc::now(),
            })),
        ),
        Err(e) => {
            warn!(error = %e, oracle = %oracle.describe(), "Oracle failed readiness check");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "status": "unavailable",
                    "oracle": oracle.describe(),
                    "reason": e.to_string(),
                    "timestamp": chrono::Utc::now(),
                })),
            )
        }
    }
}
