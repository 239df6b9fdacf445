//! Skill Metrics
//!
//! Per-runtime Prometheus registry. Label cardinality is bounded by the
//! closed set of outcomes plus `error`.

use ipgeo_core::Outcome;
use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Latency buckets in seconds, tuned for sub-second database lookups.
pub const LATENCY_BUCKETS: &[f64] = &[
    0.001, // 1ms
    0.005, // 5ms
    0.01,  // 10ms
    0.05,  // 50ms
    0.1,   // 100ms
    0.25,  // 250ms
    0.5,   // 500ms
    1.0,   // 1s
    2.5,   // 2.5s
    5.0,   // 5s
];

/// Outcome label for invocations that failed fatally.
pub const ERROR_OUTCOME: &str = "error";

#[derive(Debug, Clone)]
pub struct SkillMetrics {
    registry: Registry,
    responses_total: IntCounterVec,
    request_duration_seconds: Histogram,
}

impl SkillMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let responses_total = IntCounterVec::new(
            Opts::new(
                "ipgeo_skill_responses_total",
                "Total number of skill responses by outcome",
            ),
            &["outcome"],
        )?;
        let request_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "ipgeo_skill_request_duration_seconds",
                "Skill invocation duration in seconds",
            )
            .buckets(LATENCY_BUCKETS.to_vec()),
        )?;

        registry.register(Box::new(responses_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;

        Ok(Self {
            registry,
            responses_total,
            request_duration_seconds,
        })
    }

    pub fn record_outcome(&self, outcome: Outcome, elapsed: Duration) {
        self.record(outcome.as_str(), elapsed);
    }

    pub fn record_error(&self, elapsed: Duration) {
        self.record(ERROR_OUTCOME, elapsed);
    }

    fn record(&self, label: &str, elapsed: Duration) {
        self.responses_total.with_label_values(&[label]).inc();
        self.request_duration_seconds
            .observe(elapsed.as_secs_f64());
    }

    /// Count recorded for one outcome label.
    pub fn responses(&self, label: &str) -> u64 {
        self.responses_total.with_label_values(&[label]).get()
    }

    /// Render the registry in Prometheus text format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        TextEncoder::new().encode_to_string(&self.registry.gather())
    }
}
