//! Error types for the lexapi client.
//!
//! # Design
//! Every non-expected HTTP status maps onto one variant so callers can match
//! on the failure class (`NotFound`, `RateLimited`, ...) instead of raw
//! numbers. The API's error envelope is parsed into `ErrorDetails` when
//! present; otherwise the raw body becomes the message.

use std::fmt;

use serde::Deserialize;

use crate::http::HttpResponse;

/// Status, machine-readable code and message of a failed API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetails {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "HTTP {} ({code}): {}", self.status, self.message),
            None => write!(f, "HTTP {}: {}", self.status, self.message),
        }
    }
}

/// Errors returned by `ApiClient` and every service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(ErrorDetails),

    #[error("unauthorized: {0}")]
    Unauthorized(ErrorDetails),

    #[error("payment required: {0}")]
    PaymentRequired(ErrorDetails),

    #[error("forbidden: {0}")]
    Forbidden(ErrorDetails),

    #[error("not found: {0}")]
    NotFound(ErrorDetails),

    #[error("conflict: {0}")]
    Conflict(ErrorDetails),

    #[error("unprocessable entity: {0}")]
    Unprocessable(ErrorDetails),

    #[error("rate limited: {details}")]
    RateLimited {
        details: ErrorDetails,
        /// Seconds from the `Retry-After` header, when the server sent one.
        retry_after: Option<u64>,
    },

    #[error("server error: {0}")]
    Server(ErrorDetails),

    /// Any status the endpoint does not document, including an unexpected 2xx.
    #[error("unexpected status: {0}")]
    UnexpectedStatus(ErrorDetails),

    #[error("transport failed: {0}")]
    Transport(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// Rejected locally before any request was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

impl ApiError {
    /// Map a response whose status was not the expected one.
    pub fn from_response(response: &HttpResponse) -> Self {
        let details = match serde_json::from_str::<ErrorEnvelope>(&response.body) {
            Ok(envelope) => ErrorDetails {
                status: response.status,
                code: envelope.error.code,
                message: envelope.error.message,
            },
            Err(_) => ErrorDetails {
                status: response.status,
                code: None,
                message: response.body.clone(),
            },
        };

        match response.status {
            400 => ApiError::BadRequest(details),
            401 => ApiError::Unauthorized(details),
            402 => ApiError::PaymentRequired(details),
            403 => ApiError::Forbidden(details),
            404 => ApiError::NotFound(details),
            409 => ApiError::Conflict(details),
            422 => ApiError::Unprocessable(details),
            429 => ApiError::RateLimited {
                details,
                retry_after: response
                    .header("retry-after")
                    .and_then(|v| v.trim().parse().ok()),
            },
            500..=599 => ApiError::Server(details),
            _ => ApiError::UnexpectedStatus(details),
        }
    }

    /// The HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<u16> {
        self.details().map(|d| d.status)
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            ApiError::BadRequest(d)
            | ApiError::Unauthorized(d)
            | ApiError::PaymentRequired(d)
            | ApiError::Forbidden(d)
            | ApiError::NotFound(d)
            | ApiError::Conflict(d)
            | ApiError::Unprocessable(d)
            | ApiError::Server(d)
            | ApiError::UnexpectedStatus(d) => Some(d),
            ApiError::RateLimited { details, .. } => Some(details),
            _ => None,
        }
    }

    /// Whether repeating the same call later could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::RateLimited { .. } | ApiError::Transport(_) => true,
            ApiError::Server(d) => matches!(d.status, 502..=504),
            _ => false,
        }
    }
}
