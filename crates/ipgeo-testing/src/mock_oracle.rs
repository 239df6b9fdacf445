//! # Mock Geolocation Oracle
//!
//! Returns predefined answers per address and records every lookup.

use async_trait::async_trait;
use ipgeo_core::{GeoOracle, GeoRecord, OracleError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A mock oracle; clones share call tracking.
#[derive(Debug, Clone)]
pub struct MockGeoOracle {
    answers: HashMap<String, Result<GeoRecord, OracleError>>,
    default_answer: Option<Result<GeoRecord, OracleError>>,
    delay: Option<Duration>,
    healthy: bool,
    call_history: Arc<Mutex<Vec<String>>>,
}

impl MockGeoOracle {
    /// An oracle with an empty database: every address is not found.
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            default_answer: None,
            delay: None,
            healthy: true,
            call_history: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `address` with a record.
    pub fn with_record(mut self, address: impl Into<String>, record: GeoRecord) -> Self {
        self.answers.insert(address.into(), Ok(record));
        self
    }

    /// Answer `address` with an error.
    pub fn with_error(mut self, address: impl Into<String>, error: OracleError) -> Self {
        self.answers.insert(address.into(), Err(error));
        self
    }

    /// Answer every unscripted address with a record.
    pub fn with_default_record(mut self, record: GeoRecord) -> Self {
        self.default_answer = Some(Ok(record));
        self
    }

    /// Answer every unscripted address with an error.
    pub fn with_default_error(mut self, error: OracleError) -> Self {
        self.default_answer = Some(Err(error));
        self
    }

    /// Sleep before answering, for timeout tests.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Report the oracle as unhealthy to readiness checks.
    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_history.lock().unwrap().len()
    }

    pub fn call_history(&self) -> Vec<String> {
        self.call_history.lock().unwrap().clone()
    }

    pub fn was_called_with(&self, address: &str) -> bool {
        self.call_history
            .lock()
            .unwrap()
            .iter()
            .any(|called| called == address)
    }

    pub fn reset(&self) {
        self.call_history.lock().unwrap().clear();
    }
}

impl Default for MockGeoOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GeoOracle for MockGeoOracle {
    async fn lookup(&self, address: &str) -> Result<GeoRecord, OracleError> {
        self.call_history.lock().unwrap().push(address.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(answer) = self.answers.get(address) {
            answer.clone()
        } else if let Some(default) = &self.default_answer {
            default.clone()
        } else {
            Err(OracleError::NotFound(address.to_string()))
        }
    }

    async fn health(&self) -> Result<(), OracleError> {
        if self.healthy {
            Ok(())
        } else {
            Err(OracleError::Unavailable("mock oracle marked unhealthy".to_string()))
        }
    }

    fn describe(&self) -> String {
        format!("mock ({} scripted addresses)", self.answers.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_and_default_answers() {
        let oracle = MockGeoOracle::new()
            .with_record("1.1.1.1", GeoRecord::new("Sydney", "NSW", "Australia"))
            .with_error("2.2.2.2", OracleError::MalformedInput("2.2.2.2".into()));

        assert_eq!(
            oracle.lookup("1.1.1.1").await.unwrap().city.as_deref(),
            Some("Sydney")
        );
        assert!(matches!(
            oracle.lookup("2.2.2.2").await,
            Err(OracleError::MalformedInput(_))
        ));
        assert!(matches!(
            oracle.lookup("3.3.3.3").await,
            Err(OracleError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_clones_share_history() {
        let oracle = MockGeoOracle::new().with_default_record(GeoRecord::default());
        let clone = oracle.clone();

        clone.lookup("9.9.9.9").await.unwrap();

        assert_eq!(oracle.call_count(), 1);
        assert!(oracle.was_called_with("9.9.9.9"));
        oracle.reset();
        assert_eq!(clone.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unhealthy() {
        assert!(MockGeoOracle::new().health().await.is_ok());
        assert!(MockGeoOracle::new().unhealthy().health().await.is_err());
    }
}
