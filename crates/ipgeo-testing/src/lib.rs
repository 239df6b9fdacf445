//! # IP GeoLocator Testing Utilities
//!
//! - **Mock Oracle**: scripted geolocation answers with call tracking, so
//!   tests can assert that the database was never consulted
//! - **Fixtures**: inbound envelopes for every request shape the platform
//!   sends
//!
//! ## Usage
//!
//! ```rust
//! use ipgeo_core::{GeoRecord, SkillConfig, SkillRouter};
//! use ipgeo_testing::{MockGeoOracle, fixtures};
//!
//! # tokio_test::block_on(async {
//! let oracle = MockGeoOracle::new()
//!     .with_record("8.8.8.8", GeoRecord::new("Mountain View", "California", "United States"));
//! let router = SkillRouter::new(oracle.clone(), SkillConfig::default());
//!
//! let response = router.handle(&fixtures::lookup_request(["8", "8", "8", "8"])).await.unwrap();
//! assert!(response.should_end_session());
//! assert_eq!(oracle.call_count(), 1);
//! # });
//! ```

pub mod fixtures;
pub mod mock_oracle;

pub use mock_oracle::MockGeoOracle;
