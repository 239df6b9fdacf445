use ipgeo_core::{ConfigError, OracleError, SkillError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("geolocation database error: {0}")]
    Oracle(#[from] OracleError),

    #[error("{0}")]
    Skill(#[from] SkillError),

    #[error("failed to read event from '{path}': {error}")]
    ReadEvent {
        path: String,
        #[source]
        error: std::io::Error,
    },

    #[error("failed to encode response: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("metrics setup failed: {0}")]
    Metrics(String),

    #[error("server error: {0}")]
    Server(std::io::Error),
}
