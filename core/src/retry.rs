//! Fixed retry wrapper around any `Transport`.
//!
//! Three attempts, a constant pause between them, no configuration. 429 and
//! 503 mean the server did not act on the request, so every method is
//! retried. 502, 504 and connection failures are ambiguous and only retried
//! for requests that are safe to repeat.

use std::thread;
use std::time::Duration;

use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

pub const MAX_ATTEMPTS: u32 = 3;
pub const RETRY_PAUSE: Duration = Duration::from_millis(200);

pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

#[derive(Debug, Clone)]
pub struct RetryingTransport<T> {
    inner: T,
}

impl<T: Transport> RetryingTransport<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }
}

fn safe_to_repeat(request: &HttpRequest) -> bool {
    request.method.is_idempotent() || request.header(IDEMPOTENCY_KEY_HEADER).is_some()
}

fn should_retry(request: &HttpRequest, outcome: &Result<HttpResponse, ApiError>) -> bool {
    match outcome {
        Ok(response) => match response.status {
            429 | 503 => true,
            502 | 504 => safe_to_repeat(request),
            _ => false,
        },
        Err(ApiError::Transport(_)) => safe_to_repeat(request),
        Err(_) => false,
    }
}

impl<T: Transport> Transport for RetryingTransport<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut attempt = 1;
        loop {
            let outcome = self.inner.execute(request);
            if attempt >= MAX_ATTEMPTS || !should_retry(request, &outcome) {
                return outcome;
            }
            match &outcome {
                Ok(response) => warn!(
                    method = request.method.as_str(),
                    url = %request.url,
                    status = response.status,
                    attempt,
                    "Retrying request"
                ),
                Err(error) => warn!(
                    method = request.method.as_str(),
                    url = %request.url,
                    %error,
                    attempt,
                    "Retrying request after transport failure"
                ),
            }
            thread::sleep(RETRY_PAUSE);
            attempt += 1;
        }
    }
}
