//! # IP GeoLocator Core
//!
//! Voice-skill handler that turns a spoken IPv4 address into a city, region
//! and country. One inbound envelope produces one outbound envelope; all
//! state is request-scoped.
//!
//! ## Components
//!
//! - **[SkillRouter]**: routes by request kind, then by intent name
//! - **[address]**: assembles the four octet slots, validates the
//!   dotted quad and rejects non-routable addresses
//! - **[GeoOracle]**: address to place-name lookup, with a MaxMind City
//!   database implementation behind the `maxmind` feature
//! - **[SpeechResponse]**: the fixed response templates
//!
//! ## Usage
//!
//! ```rust,no_run
//! # #[cfg(feature = "maxmind")]
//! # async fn run(body: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! use ipgeo_core::{MaxMindOracle, SkillConfigBuilder, SkillRouter};
//!
//! let config = SkillConfigBuilder::from_env()?.build()?;
//! let oracle = MaxMindOracle::from_config(&config)?;
//! let router = SkillRouter::new(oracle, config);
//!
//! let (_outcome, response) = router.handle_json(body).await?;
//! println!("{}", serde_json::to_string(&response)?);
//! # Ok(())
//! # }
//! ```

pub mod address;
pub mod config;
pub mod envelope;
pub mod error;
pub mod geo;
pub mod router;
pub mod speech;

pub use address::{AddressError, AddressScope, ReservedRange, Resolution};
pub use config::{ConfigError, ReaderMode, SkillConfig, SkillConfigBuilder};
pub use envelope::{IntentName, RequestEnvelope, RequestKind, ResponseEnvelope};
pub use error::{SkillError, SkillResult};
pub use geo::{GeoOracle, GeoRecord, OracleError, Place};
pub use router::{LookupResult, Outcome, SkillRouter, Turn};
pub use speech::SpeechResponse;

#[cfg(feature = "maxmind")]
pub use geo::MaxMindOracle;
