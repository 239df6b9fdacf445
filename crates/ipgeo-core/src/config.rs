//! # Skill Configuration
//!
//! Settings for the router and the geolocation oracle, loaded from the
//! environment so deployments can change them without a rebuild.
//!
//! ## Environment Variables
//!
//! - `IPGEO_DATABASE_PATH` - City database file (default: `./GeoLite2-City.mmdb`)
//! - `IPGEO_READER_MODE` - `shared` or `per_call` (default: `shared`)
//! - `IPGEO_LOOKUP_TIMEOUT_MS` - Oracle timeout in milliseconds (default: 2000)
//! - `IPGEO_CARD_TITLE_PREFIX` - Prefix for every card title (default: `IP Geo Lookup - `)
//! - `IPGEO_APPLICATION_ID` - Only accept envelopes for this application id
//! - `IPGEO_UNKNOWN_INTENT_FALLBACK` - Answer unknown intents instead of failing (default: false)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DATABASE_PATH: &str = "./GeoLite2-City.mmdb";
pub const DEFAULT_CARD_TITLE_PREFIX: &str = "IP Geo Lookup - ";
pub const DEFAULT_LOOKUP_TIMEOUT_MS: u64 = 2_000;
const MAX_LOOKUP_TIMEOUT_MS: u64 = 30_000;

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable '{key}': {message}")]
    InvalidEnvVar { key: String, message: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// How the city database is held between invocations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReaderMode {
    /// One read-only handle opened at startup.
    #[default]
    Shared,
    /// A fresh handle per lookup, released before the lookup returns.
    PerCall,
}

impl FromStr for ReaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "shared" => Ok(ReaderMode::Shared),
            "per_call" | "per-call" => Ok(ReaderMode::PerCall),
            other => Err(format!(
                "invalid reader mode '{other}', expected 'shared' or 'per_call'"
            )),
        }
    }
}

/// Validated skill configuration
#[derive(Debug, Clone)]
pub struct SkillConfig {
    pub database_path: PathBuf,
    pub reader_mode: ReaderMode,
    pub lookup_timeout: Duration,
    pub card_title_prefix: String,
    /// When set, envelopes for any other application are rejected.
    pub expected_application_id: Option<String>,
    /// Answer unrecognized intents with a generic reply instead of failing.
    pub unknown_intent_fallback: bool,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            reader_mode: ReaderMode::Shared,
            lookup_timeout: Duration::from_millis(DEFAULT_LOOKUP_TIMEOUT_MS),
            card_title_prefix: DEFAULT_CARD_TITLE_PREFIX.to_string(),
            expected_application_id: None,
            unknown_intent_fallback: false,
        }
    }
}

/// Builder for `SkillConfig` with environment variable support
#[derive(Debug, Clone, Default)]
pub struct SkillConfigBuilder {
    config: SkillConfig,
}

impl SkillConfigBuilder {
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

        if let Some(path) = env::get_string("IPGEO_DATABASE_PATH") {
            builder = builder.database_path(path);
        }
        if let Some(mode) = env::get_parsed::<ReaderMode>("IPGEO_READER_MODE")? {
            builder = builder.reader_mode(mode);
        }
        if let Some(ms) = env::get_u64("IPGEO_LOOKUP_TIMEOUT_MS")? {
            builder = builder.lookup_timeout(Duration::from_millis(ms));
        }
        if let Some(prefix) = env::get_string("IPGEO_CARD_TITLE_PREFIX") {
            builder = builder.card_title_prefix(prefix);
        }
        if let Some(app_id) = env::get_string("IPGEO_APPLICATION_ID") {
            builder = builder.expected_application_id(app_id);
        }
        if let Some(fallback) = env::get_bool("IPGEO_UNKNOWN_INTENT_FALLBACK")? {
            builder = builder.unknown_intent_fallback(fallback);
        }

        Ok(builder)
    }

    #[must_use]
    pub fn database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.database_path = path.into();
        self
    }

    #[must_use]
    pub fn reader_mode(mut self, mode: ReaderMode) -> Self {
        self.config.reader_mode = mode;
        self
    }

    #[must_use]
    pub fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.config.lookup_timeout = timeout;
        self
    }

    #[must_use]
    pub fn card_title_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config.card_title_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn expected_application_id(mut self, app_id: impl Into<String>) -> Self {
        self.config.expected_application_id = Some(app_id.into());
        self
    }

    #[must_use]
    pub fn unknown_intent_fallback(mut self, enable: bool) -> Self {
        self.config.unknown_intent_fallback = enable;
        self
    }

    /// Validate configuration and build `SkillConfig`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if the configuration is invalid.
    pub fn build(self) -> Result<SkillConfig, ConfigError> {
        self.validate()?;
        Ok(self.config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let timeout_ms = self.config.lookup_timeout.as_millis();
        if timeout_ms == 0 {
            return Err(ConfigError::ValidationError(
                "lookup_timeout must be greater than 0".to_string(),
            ));
        }
        if timeout_ms > u128::from(MAX_LOOKUP_TIMEOUT_MS) {
            return Err(ConfigError::ValidationError(format!(
                "lookup_timeout must be <= {MAX_LOOKUP_TIMEOUT_MS}ms"
            )));
        }

        if self.config.database_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "database_path cannot be empty".to_string(),
            ));
        }

        if matches!(&self.config.expected_application_id, Some(id) if id.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "expected_application_id cannot be blank".to_string(),
            ));
        }

        Ok(())
    }
}

/// Environment variable helpers shared by every configuration layer.
pub mod env {
    use super::ConfigError;
    use std::str::FromStr;

    pub fn get_string(key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    pub fn get_bool(key: &str) -> Result<Option<bool>, ConfigError> {
        match std::env::var(key) {
            Ok(val) => match val.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(Some(true)),
                "false" | "0" | "no" | "off" => Ok(Some(false)),
                _ => Err(ConfigError::InvalidEnvVar {
                    key: key.to_string(),
                    message: format!(
                        "invalid boolean value '{val}', expected true/false/1/0/yes/no/on/off"
                    ),
                }),
            },
            Err(_) => Ok(None),
        }
    }

    pub fn get_u64(key: &str) -> Result<Option<u64>, ConfigError> {
        get_parsed(key)
    }

    pub fn get_usize(key: &str) -> Result<Option<usize>, ConfigError> {
        get_parsed(key)
    }

    /// Parse any `FromStr` value, naming the variable on failure.
    pub fn get_parsed<T>(key: &str) -> Result<Option<T>, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match std::env::var(key) {
            Ok(val) => val
                .parse::<T>()
                .map(Some)
                .map_err(|e| ConfigError::InvalidEnvVar {
                    key: key.to_string(),
                    message: format!("invalid value '{val}': {e}"),
                }),
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "IPGEO_DATABASE_PATH",
        "IPGEO_READER_MODE",
        "IPGEO_LOOKUP_TIMEOUT_MS",
        "IPGEO_CARD_TITLE_PREFIX",
        "IPGEO_APPLICATION_ID",
        "IPGEO_UNKNOWN_INTENT_FALLBACK",
    ];

    fn clear_env() {
        for key in VARS {
            // SAFETY: env tests are serialized
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    fn test_default_builder() {
        let config = SkillConfigBuilder::new().build().unwrap();
        assert_eq!(config.database_path, PathBuf::from("./GeoLite2-City.mmdb"));
        assert_eq!(config.reader_mode, ReaderMode::Shared);
        assert_eq!(config.lookup_timeout, Duration::from_millis(2000));
        assert_eq!(config.card_title_prefix, "IP Geo Lookup - ");
        assert!(config.expected_application_id.is_none());
        assert!(!config.unknown_intent_fallback);
    }

    #[test]
    fn test_builder_validation_timeout() {
        let result = SkillConfigBuilder::new()
            .lookup_timeout(Duration::ZERO)
            .build();
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("lookup_timeout must be greater than 0")
        );

        let result = SkillConfigBuilder::new()
            .lookup_timeout(Duration::from_secs(31))
            .build();
        assert!(result.unwrap_err().to_string().contains("<= 30000ms"));
    }

    #[test]
    fn test_builder_validation_blank_application_id() {
        let result = SkillConfigBuilder::new()
            .expected_application_id("   ")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_reader_mode_parsing() {
        assert_eq!("shared".parse::<ReaderMode>(), Ok(ReaderMode::Shared));
        assert_eq!("PER_CALL".parse::<ReaderMode>(), Ok(ReaderMode::PerCall));
        assert_eq!("per-call".parse::<ReaderMode>(), Ok(ReaderMode::PerCall));
        assert!("pooled".parse::<ReaderMode>().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        clear_env();
        // SAFETY: env tests are serialized
        unsafe {
            std::env::set_var("IPGEO_DATABASE_PATH", "/var/lib/geoip/GeoIP2-City.mmdb");
            std::env::set_var("IPGEO_READER_MODE", "per_call");
            std::env::set_var("IPGEO_LOOKUP_TIMEOUT_MS", "750");
            std::env::set_var("IPGEO_CARD_TITLE_PREFIX", "");
            std::env::set_var("IPGEO_APPLICATION_ID", "amzn1.ask.skill.ipgeo");
            std::env::set_var("IPGEO_UNKNOWN_INTENT_FALLBACK", "yes");
        }

        let config = SkillConfigBuilder::from_env().unwrap().build().unwrap();
        clear_env();

        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/geoip/GeoIP2-City.mmdb")
        );
        assert_eq!(config.reader_mode, ReaderMode::PerCall);
        assert_eq!(config.lookup_timeout, Duration::from_millis(750));
        assert_eq!(config.card_title_prefix, "");
        assert_eq!(
            config.expected_application_id.as_deref(),
            Some("amzn1.ask.skill.ipgeo")
        );
        assert!(config.unknown_intent_fallback);
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_values() {
        clear_env();
        unsafe { std::env::set_var("IPGEO_LOOKUP_TIMEOUT_MS", "soon") };
        let err = SkillConfigBuilder::from_env().unwrap_err();
        assert!(err.to_string().contains("IPGEO_LOOKUP_TIMEOUT_MS"));

        clear_env();
        unsafe { std::env::set_var("IPGEO_UNKNOWN_INTENT_FALLBACK", "maybe") };
        let err = SkillConfigBuilder::from_env().unwrap_err();
        assert!(err.to_string().contains("invalid boolean value 'maybe'"));
        clear_env();
    }

    #[test]
    fn test_env_helpers_absent() {
        assert_eq!(env::get_bool("IPGEO_NONEXISTENT").unwrap(), None);
        assert_eq!(env::get_u64("IPGEO_NONEXISTENT").unwrap(), None);
    }
}
