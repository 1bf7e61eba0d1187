use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use crate::error::MockError;

/// Accept any non-empty bearer token.
pub async fn require_bearer(request: Request, next: Next) -> Result<Response, MockError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .unwrap_or_default();
    if token.is_empty() {
        return Err(MockError::Unauthorized);
    }
    Ok(next.run(request).await)
}
