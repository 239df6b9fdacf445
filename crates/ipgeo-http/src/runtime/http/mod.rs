//! # HTTP Runtime
//!
//! Shared state behind every handler and the server loop.

mod config;

pub use config::HttpRuntimeConfig;

use ipgeo_core::{GeoOracle, SkillRouter};
use std::{sync::Arc, time::Instant};
use tokio::net::TcpListener;
use tracing::info;

use crate::runtime::{metrics::SkillMetrics, shutdown::shutdown_signal};

/// HTTP server state: the skill router, its metrics and the start time.
pub struct SkillRuntime<O> {
    pub router: Arc<SkillRouter<O>>,
    pub metrics: Arc<SkillMetrics>,
    pub started_at: Instant,
}

impl<O> Clone for SkillRuntime<O> {
    fn clone(&self) -> Self {
        Self {
            router: Arc::clone(&self.router),
            metrics: Arc::clone(&self.metrics),
            started_at: self.started_at,
        }
    }
}

impl<O: GeoOracle + 'static> SkillRuntime<O> {
    /// Wrap a router with a fresh metrics registry.
    pub fn new(router: SkillRouter<O>) -> Result<Self, prometheus::Error> {
        Ok(Self::with_metrics(router, SkillMetrics::new()?))
    }

    pub fn with_metrics(router: SkillRouter<O>, metrics: SkillMetrics) -> Self {
        Self {
            router: Arc::new(router),
            metrics: Arc::new(metrics),
            started_at: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Bind, serve until SIGINT/SIGTERM, then drain in-flight requests.
    pub async fn serve(self, config: HttpRuntimeConfig) -> std::io::Result<()> {
        let listener = TcpListener::bind(config.bind_addr).await?;
        info!(
            bind_addr = %listener.local_addr()?,
            oracle = %self.router.oracle().describe(),
            request_timeout_secs = config.request_timeout_secs,
            max_body_size = config.max_body_size,
            "IP GeoLocator skill listening"
        );

        let app = self.router_with_config(&config);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Server stopped");
        Ok(())
    }
}
