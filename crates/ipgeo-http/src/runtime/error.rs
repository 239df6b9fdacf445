//! Error handling for the HTTP runtime
//!
//! Fatal skill errors become structured JSON bodies with a typed error
//! code and the request id, so a failed invocation can be matched to its
//! log lines.

use axum::{
    extract::Request,
    http::{
        StatusCode,
        header::{self, HeaderValue},
    },
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use ipgeo_core::SkillError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Correlation id for one HTTP request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID using UUID v4
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an id that has already been validated.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extension for storing RequestId in Axum request extensions
#[derive(Debug, Clone)]
pub struct RequestIdExtension(pub RequestId);

/// Maximum length for client-provided request IDs
const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Client ids must be short and limited to `[A-Za-z0-9_-]` so they cannot
/// inject fields into structured logs.
fn validate_request_id(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_REQUEST_ID_LENGTH
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Middleware that extracts or generates the `X-Request-ID`
///
/// The id is stored in request extensions for handlers and echoed on the
/// response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| validate_request_id(s))
        .map(RequestId::new_unchecked)
        .unwrap_or_else(RequestId::generate);

    request
        .extensions_mut()
        .insert(RequestIdExtension(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(
            header::HeaderName::from_static("x-request-id"),
            header_value,
        );
    }

    response
}

/// Type-safe error codes for runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Body is not a decodable envelope or lacks a required field
    MalformedEnvelope,
    /// `request.type` is not one the skill handles
    UnrecognizedRequestKind,
    /// Intent name is not one the skill handles
    UnrecognizedIntent,
    /// Envelope addressed to another application
    ApplicationMismatch,
    /// Geolocation database cannot be used
    OracleUnavailable,
    /// Internal server error
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MalformedEnvelope => "malformed_envelope",
            Self::UnrecognizedRequestKind => "unrecognized_request_kind",
            Self::UnrecognizedIntent => "unrecognized_intent",
            Self::ApplicationMismatch => "application_mismatch",
            Self::OracleUnavailable => "oracle_unavailable",
            Self::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error response for HTTP APIs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Request ID for tracking and debugging
    pub request_id: RequestId,
}

/// Specific error information for different error categories
#[derive(Debug, thiserror::Error)]
pub enum RuntimeErrorKind {
    /// The skill refused or failed the invocation
    #[error(transparent)]
    Skill(#[from] SkillError),

    /// Failure inside the runtime itself
    #[error("internal error: {reason}")]
    Internal { reason: String },
}

/// Runtime error carrying the request id it belongs to
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct RuntimeError {
    pub request_id: RequestId,
    pub kind: RuntimeErrorKind,
}

impl RuntimeError {
    pub fn new(kind: RuntimeErrorKind, request_id: RequestId) -> Self {
        Self { request_id, kind }
    }

    pub fn skill(error: SkillError, request_id: RequestId) -> Self {
        Self::new(RuntimeErrorKind::Skill(error), request_id)
    }

    pub fn internal_error(reason: impl Into<String>, request_id: RequestId) -> Self {
        Self::new(
            RuntimeErrorKind::Internal {
                reason: reason.into(),
            },
            request_id,
        )
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Bad envelopes are the caller's fault; an unusable database is ours.
    pub fn status_code(&self) -> StatusCode {
        match &self.kind {
            RuntimeErrorKind::Skill(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            RuntimeErrorKind::Skill(_) | RuntimeErrorKind::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match &self.kind {
            RuntimeErrorKind::Skill(SkillError::MalformedEnvelope(_)) => {
                ErrorCode::MalformedEnvelope
            }
            RuntimeErrorKind::Skill(SkillError::UnrecognizedRequestKind(_)) => {
                ErrorCode::UnrecognizedRequestKind
            }
            RuntimeErrorKind::Skill(SkillError::UnrecognizedIntent(_)) => {
                ErrorCode::UnrecognizedIntent
            }
            RuntimeErrorKind::Skill(SkillError::ApplicationMismatch { .. }) => {
                ErrorCode::ApplicationMismatch
            }
            RuntimeErrorKind::Skill(SkillError::Oracle(_)) => ErrorCode::OracleUnavailable,
            RuntimeErrorKind::Internal { .. } => ErrorCode::InternalError,
        }
    }

    /// Message safe to return to the caller. Database paths and other
    /// internals only go to the log.
    fn user_facing_message(&self) -> String {
        match &self.kind {
            RuntimeErrorKind::Skill(SkillError::Oracle(_)) => {
                "The geolocation database is currently unavailable.".to_string()
            }
            RuntimeErrorKind::Skill(e) => e.to_string(),
            RuntimeErrorKind::Internal { .. } => {
                "An internal error occurred. Please try again later.".to_string()
            }
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_code(),
            message: self.user_facing_message(),
            request_id: self.request_id.clone(),
        }
    }
}

impl IntoResponse for RuntimeError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(
                error_code = %self.error_code(),
                request_id = %self.request_id,
                status_code = %status_code,
                error_message = %self,
                "HTTP runtime error occurred"
            );
        } else {
            tracing::warn!(
                error_code = %self.error_code(),
                request_id = %self.request_id,
                error_message = %self,
                "Rejected skill request"
            );
        }

        (status_code, Json(self.to_error_response())).into_response()
    }
}

/// Result type alias for HTTP runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
