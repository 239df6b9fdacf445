//! # Geolocation Oracle
//!
//! The oracle maps an address string to place names. It is an external
//! dependency: the router only relies on the three outcomes it signals
//! (a record, "not in the database", "malformed address").

#[cfg(feature = "maxmind")]
mod maxmind;

#[cfg(feature = "maxmind")]
pub use maxmind::MaxMindOracle;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

pub const UNKNOWN_CITY: &str = "Unknown city";
pub const UNKNOWN_STATE: &str = "Unknown state";
pub const UNKNOWN_COUNTRY: &str = "Unknown country";

/// Raw oracle answer; every component may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoRecord {
    pub city: Option<String>,
    /// Most specific subdivision (state, province, region).
    pub subdivision: Option<String>,
    pub country: Option<String>,
}

impl GeoRecord {
    pub fn new(
        city: impl Into<String>,
        subdivision: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            city: Some(city.into()),
            subdivision: Some(subdivision.into()),
            country: Some(country.into()),
        }
    }
}

/// Speakable place names, with placeholders for missing components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub city: String,
    pub state: String,
    pub country: String,
}

impl From<GeoRecord> for Place {
    fn from(record: GeoRecord) -> Self {
        Self {
            city: nullable_name(record.city.as_deref(), UNKNOWN_CITY),
            state: nullable_name(record.subdivision.as_deref(), UNKNOWN_STATE),
            country: nullable_name(record.country.as_deref(), UNKNOWN_COUNTRY),
        }
    }
}

/// The name if present, otherwise the placeholder.
pub fn nullable_name(name: Option<&str>, placeholder: &str) -> String {
    name.unwrap_or(placeholder).to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    #[error("address '{0}' not found in the geolocation database")]
    NotFound(String),

    #[error("'{0}' is not an address the geolocation database accepts")]
    MalformedInput(String),

    #[error("geolocation database unavailable: {0}")]
    Unavailable(String),
}

/// Address to place-name lookup.
///
/// Implementations must be safe to call from concurrent invocations; no
/// mutable state may be shared between lookups.
#[async_trait]
pub trait GeoOracle: Send + Sync {
    /// Look up one dotted-quad address.
    async fn lookup(&self, address: &str) -> Result<GeoRecord, OracleError>;

    /// Whether the oracle can currently serve lookups.
    async fn health(&self) -> Result<(), OracleError> {
        Ok(())
    }

    /// Short human-readable description for logs and readiness reports.
    fn describe(&self) -> String;
}

#[async_trait]
impl<O: GeoOracle + ?Sized> GeoOracle for Arc<O> {
    async fn lookup(&self, address: &str) -> Result<GeoRecord, OracleError> {
        (**self).lookup(address).await
    }

    async fn health(&self) -> Result<(), OracleError> {
        (**self).health().await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nullable_name() {
        assert_eq!(nullable_name(Some("Paris"), UNKNOWN_CITY), "Paris");
        assert_eq!(nullable_name(None, UNKNOWN_CITY), "Unknown city");
    }

    #[test]
    fn test_place_substitutes_each_component_independently() {
        let place = Place::from(GeoRecord {
            city: None,
            subdivision: Some("Bavaria".into()),
            country: None,
        });
        assert_eq!(place.city, "Unknown city");
        assert_eq!(place.state, "Bavaria");
        assert_eq!(place.country, "Unknown country");

        let empty = Place::from(GeoRecord::default());
        assert_eq!(empty.state, "Unknown state");
    }
}
