//! Error types for the relay
//!
//! Every failure of a generation request ends up as one `RelayError`, which
//! knows its HTTP status and renders as a FastAPI-style `{"detail": ...}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::constants::detail;

pub type Result<T> = std::result::Result<T, RelayError>;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Upstream answered with a non-2xx status, or could not be reached.
    #[error("Upstream error (HTTP {status}): {detail}")]
    Upstream { status: u16, detail: String },

    /// Upstream answered 2xx but the body is not the expected shape.
    #[error("Malformed upstream response: {0}")]
    MalformedUpstreamResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Inbound body rejected before reaching the relay.
    #[error("Invalid request (HTTP {status}): {detail}")]
    InvalidRequest { status: u16, detail: String },
}

impl RelayError {
    pub fn upstream_status(status: u16) -> Self {
        RelayError::Upstream {
            status,
            detail: detail::UPSTREAM_FAILED.to_string(),
        }
    }

    /// HTTP status surfaced to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::Upstream { status, .. } | RelayError::InvalidRequest { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            RelayError::MalformedUpstreamResponse(_) => StatusCode::BAD_GATEWAY,
            RelayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message surfaced to the caller. Internal reasons stay in the logs.
    pub fn client_detail(&self) -> String {
        match self {
            RelayError::Upstream { detail, .. } | RelayError::InvalidRequest { detail, .. } => {
                detail.clone()
            }
            RelayError::MalformedUpstreamResponse(_) => detail::MALFORMED_RESPONSE.to_string(),
            RelayError::Configuration(_) => detail::NOT_CONFIGURED.to_string(),
        }
    }
}

/// Timeouts and transport failures count as upstream errors.
impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RelayError::Upstream {
                status: StatusCode::GATEWAY_TIMEOUT.as_u16(),
                detail: detail::UPSTREAM_TIMEOUT.to_string(),
            }
        } else if let Some(status) = err.status() {
            RelayError::upstream_status(status.as_u16())
        } else {
            RelayError::Upstream {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                detail: detail::UPSTREAM_UNREACHABLE.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(err: serde_json::Error) -> Self {
        RelayError::MalformedUpstreamResponse(err.to_string())
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            RelayError::Configuration(_) => error!("❌ [API] {}", self),
            RelayError::InvalidRequest { .. } => {}
            _ => warn!("⚠️ [API] {}", self),
        }
        (status, Json(json!({ "detail": self.client_detail() }))).into_response()
    }
}
