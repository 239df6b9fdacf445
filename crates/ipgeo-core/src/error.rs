//! Error Types
//!
//! Only conditions that abort an invocation are errors. Retryable outcomes
//! (bad address, private address, address not in the database) are shaped
//! into voice responses by the router and never surface here.

use thiserror::Error;

use crate::geo::OracleError;

/// Fatal failures of a single skill invocation.
///
/// These are surfaced to the caller (the voice platform, the HTTP runtime
/// or the CLI) instead of being turned into speech.
#[derive(Debug, Error)]
pub enum SkillError {
    /// The envelope could not be decoded or lacks a required field.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// `request.type` holds a value outside the three known kinds.
    #[error("unrecognized request type '{0}'")]
    UnrecognizedRequestKind(String),

    /// The intent name matched none of the handlers.
    #[error("unrecognized intent '{0}'")]
    UnrecognizedIntent(String),

    /// The envelope was issued for a different skill.
    #[error("application id '{actual}' does not match the configured application")]
    ApplicationMismatch {
        /// Application id carried by the envelope
        actual: String,
    },

    /// The geolocation database is unusable.
    #[error("geolocation oracle failed: {0}")]
    Oracle(#[from] OracleError),
}

impl SkillError {
    /// Stable snake_case identifier, used for metrics labels and error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            SkillError::MalformedEnvelope(_) => "malformed_envelope",
            SkillError::UnrecognizedRequestKind(_) => "unrecognized_request_kind",
            SkillError::UnrecognizedIntent(_) => "unrecognized_intent",
            SkillError::ApplicationMismatch { .. } => "application_mismatch",
            SkillError::Oracle(_) => "oracle_unavailable",
        }
    }

    /// Whether the caller sent something this skill cannot handle, as
    /// opposed to the skill itself being broken.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, SkillError::Oracle(_))
    }
}

impl From<serde_json::Error> for SkillError {
    fn from(err: serde_json::Error) -> Self {
        SkillError::MalformedEnvelope(err.to_string())
    }
}

/// Result alias for skill invocations.
pub type SkillResult<T> = Result<T, SkillError>;
