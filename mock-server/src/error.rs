//! Error type shared by every handler.
//!
//! Each variant renders as `{"error": {"code": ..., "message": ...}}` with
//! the matching status, the same envelope the real API sends.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum MockError {
    #[error("missing or malformed bearer token")]
    Unauthorized,

    #[error("{0}")]
    BadRequest(String),

    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unprocessable(String),
}

impl MockError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        MockError::NotFound { kind, id: id.into() }
    }

    fn status_and_code(&self) -> (StatusCode, String) {
        match self {
            MockError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".into()),
            MockError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request".into()),
            MockError::NotFound { kind, .. } => (StatusCode::NOT_FOUND, format!("{kind}_not_found")),
            MockError::Conflict(_) => (StatusCode::CONFLICT, "conflict".into()),
            MockError::Unprocessable(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_body".into()),
        }
    }
}

impl From<JsonRejection> for MockError {
    fn from(rejection: JsonRejection) -> Self {
        MockError::Unprocessable(rejection.body_text())
    }
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status != StatusCode::NOT_FOUND {
            warn!(%status, %code, error = %self, "request rejected");
        }
        let body = json!({ "error": { "code": code, "message": self.to_string() } });
        (status, Json(body)).into_response()
    }
}
