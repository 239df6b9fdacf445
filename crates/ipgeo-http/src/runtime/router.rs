//! HTTP router configuration
//!
//! This module provides router setup and route registration for the HTTP runtime.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use ipgeo_core::GeoOracle;
use std::time::Duration;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::runtime::{
    HttpRuntimeConfig, SkillRuntime,
    error::request_id_middleware,
    handlers::{handle_skill, health_check, metrics_endpoint, readiness_check},
};

impl<O: GeoOracle + 'static> SkillRuntime<O> {
    /// Create the Axum router with all endpoints and middleware
    pub fn router(self) -> Router {
        self.router_with_config(&HttpRuntimeConfig::default())
    }

    /// Create the Axum router with custom configuration
    pub fn router_with_config(self, config: &HttpRuntimeConfig) -> Router {
        let mut router = Router::new()
            .route("/skill", post(handle_skill::<O>))
            .route("/health", get(health_check::<O>))
            .route("/ready", get(readiness_check::<O>))
            .route("/metrics", get(metrics_endpoint::<O>))
            .with_state(self)
            .layer(DefaultBodyLimit::disable())
            .layer(RequestBodyLimitLayer::new(config.max_body_size))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                Duration::from_secs(config.request_timeout_secs),
            ))
            .layer(TraceLayer::new_for_http())
            // Outermost, so every response carries the id.
            .layer(middleware::from_fn(request_id_middleware));

        if config.enable_cors {
            router = router.layer(CorsLayer::permissive());
        }

        router
    }
}
