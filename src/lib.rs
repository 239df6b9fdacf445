//! # IP GeoLocator
//!
//! Voice skill that answers "where is this IP address?". The platform sends
//! the four spoken octets as slots; the skill validates the address, turns
//! away private and reserved networks, looks the rest up in a city
//! database and speaks back the city, region and country.
//!
//! ## Core Components
//!
//! - **[SkillRouter]**: one envelope in, one response envelope out
//! - **[GeoOracle]**: address to place-name lookup
//! - **[SkillRuntime]**: axum webhook around the router
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "maxmind")]
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use ipgeo_workspace::{HttpRuntimeConfigBuilder, MaxMindOracle, SkillConfigBuilder, SkillRouter, SkillRuntime};
//!
//! let config = SkillConfigBuilder::from_env()?.build()?;
//! let oracle = MaxMindOracle::from_config(&config)?;
//! let runtime = SkillRuntime::new(SkillRouter::new(oracle, config))?;
//!
//! runtime.serve(HttpRuntimeConfigBuilder::from_env()?.build()?).await?;
//! # Ok(())
//! # }
//! ```

pub use ipgeo_core as core;
pub use ipgeo_http as http;

pub use ipgeo_core::{
    AddressError, AddressScope, ConfigError, GeoOracle, GeoRecord, IntentName, LookupResult,
    OracleError, Outcome, Place, ReaderMode, RequestEnvelope, RequestKind, ReservedRange,
    Resolution, ResponseEnvelope, SkillConfig, SkillConfigBuilder, SkillError, SkillResult,
    SkillRouter, SpeechResponse, Turn,
};
pub use ipgeo_http::{HttpRuntimeConfig, HttpRuntimeConfigBuilder, SkillRuntime};

#[cfg(feature = "maxmind")]
pub use ipgeo_core::MaxMindOracle;
