//! # Environment-Based Configuration
//!
//! Loads the HTTP runtime settings from the environment so a deployment
//! can be tuned without a rebuild.
//!
//! ## Environment Variables
//!
//! - `IPGEO_BIND_ADDR` - Listen address (default: `0.0.0.0:8080`)
//! - `IPGEO_REQUEST_TIMEOUT_SECS` - Request timeout in seconds (default: 10)
//! - `IPGEO_MAX_BODY_SIZE` - Maximum envelope size in bytes (default: 65536)
//! - `IPGEO_ENABLE_CORS` - Enable permissive CORS (default: false)

use std::net::SocketAddr;

use ipgeo_core::config::env;
pub use ipgeo_core::config::ConfigError;

use crate::runtime::HttpRuntimeConfig;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Builder for `HttpRuntimeConfig` with environment variable support
#[derive(Debug, Clone)]
pub struct HttpRuntimeConfigBuilder {
    bind_addr: SocketAddr,
    request_timeout_secs: u64,
    max_body_size: usize,
    enable_cors: bool,
}

impl Default for HttpRuntimeConfigBuilder {
    fn default() -> Self {
        let defaults = HttpRuntimeConfig::default();
        Self {
            bind_addr: defaults.bind_addr,
            request_timeout_secs: defaults.request_timeout_secs,
            max_body_size: defaults.max_body_size,
            enable_cors: defaults.enable_cors,
        }
    }
}

impl HttpRuntimeConfigBuilder {
    /// Create a new builder with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any environment variable has an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::default();

        if let Some(addr) = env::get_parsed::<SocketAddr>("IPGEO_BIND_ADDR")? {
            builder = builder.bind_addr(addr);
        }
        if let Some(timeout) = env::get_u64("IPGEO_REQUEST_TIMEOUT_SECS")? {
            builder = builder.request_timeout_secs(timeout);
        }
        if let Some(max_size) = env::get_usize("IPGEO_MAX_BODY_SIZE")? {
            builder = builder.max_body_size(max_size);
        }
        if let Some(cors) = env::get_bool("IPGEO_ENABLE_CORS")? {
            builder = builder.enable_cors(cors);
        }

        Ok(builder)
    }

    #[must_use]
    pub fn bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    #[must_use]
    pub fn request_timeout_secs(mut self, timeout: u64) -> Self {
        self.request_timeout_secs = timeout;
        self
    }

    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    #[must_use]
    pub fn enable_cors(mut self, enable: bool) -> Self {
        self.enable_cors = enable;
        self
    }

    /// Validate configuration and build `HttpRuntimeConfig`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the configuration is invalid.
    pub fn build(self) -> Result<HttpRuntimeConfig, ConfigError> {
        self.validate()?;

        Ok(HttpRuntimeConfig {
            bind_addr: self.bind_addr,
            request_timeout_secs: self.request_timeout_secs,
            max_body_size: self.max_body_size,
            enable_cors: self.enable_cors,
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::ValidationError(format!(
                "request_timeout_secs must be <= {MAX_REQUEST_TIMEOUT_SECS}"
            )));
        }

        if self.max_body_size == 0 {
            return Err(ConfigError::ValidationError(
                "max_body_size must be greater than 0".to_string(),
            ));
        }
        if self.max_body_size > MAX_BODY_SIZE {
            return Err(ConfigError::ValidationError(format!(
                "max_body_size must be <= {MAX_BODY_SIZE} bytes"
            )));
        }

        Ok(())
    }
}
