//! Shared request builder, executor and response parser.
//!
//! # Design
//! `ApiClient` keeps three steps apart: building an
//! `HttpRequest`, executing it through a `Transport` and parsing the
//! `HttpResponse`. Services compose those three steps once per endpoint; the
//! `build_*` and `parse_*` halves stay public so callers can drive an
//! endpoint the SDK does not wrap yet.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use config::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::retry::RetryingTransport;
use crate::services::{
    AgentsService, ComputeService, DatabaseService, FormatService, LegalResearchService,
    LlmService, MemoryService, OcrService, PaymentsService, PrivilegeService, SearchService,
    VaultService, VoiceService, WebhooksService, WorkflowsService,
};
use crate::transport::{Transport, UreqTransport};

/// Response of `GET /v1/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub version: String,
}

/// Client for the whole API. Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: Url,
    api_key: Option<String>,
    user_agent: String,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client with the `ureq` transport described by `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let ureq = UreqTransport::new(Duration::from_secs(config.timeout_secs));
        let transport: Arc<dyn Transport> = if config.retry {
            Arc::new(RetryingTransport::new(ureq))
        } else {
            Arc::new(ureq)
        };
        Self::from_parts(config, transport)
    }

    /// Build a client from `ClientConfig::load`.
    pub fn from_env() -> Result<Self, ApiError> {
        Self::new(ClientConfig::load()?)
    }

    /// Build a client that sends every request through `transport`.
    ///
    /// `config.retry` and `config.timeout_secs` are ignored; wrap the
    /// transport in `RetryingTransport` to get retries.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Result<Self, ApiError> {
        Self::from_parts(config, Arc::new(transport))
    }

    fn from_parts(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self, ApiError> {
        config.validate()?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ConfigError::Message(format!("invalid base_url {:?}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::Message(format!("base_url {:?} cannot be a base", config.base_url)).into());
        }
        Ok(Self {
            base_url,
            api_key: config.api_key,
            user_agent: config.user_agent,
            transport,
        })
    }

    /// Base URL without a trailing `/`.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    // ------------------------------------------------------------------
    // Build
    // ------------------------------------------------------------------

    /// Build a body-less request for `segments` joined under the base URL.
    ///
    /// Each segment is percent-encoded as one path segment. Empty, `.` and
    /// `..` segments are rejected: the URL parser would drop or resolve them
    /// and the request would address a different resource.
    pub fn build_request(
        &self,
        method: HttpMethod,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<HttpRequest, ApiError> {
        let url = self.url_for(segments, query)?;

        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), self.user_agent.clone()),
        ];
        if let Some(key) = &self.api_key {
            headers.push(("authorization".to_string(), format!("Bearer {key}")));
        }

        Ok(HttpRequest {
            method,
            url,
            headers,
            body: None,
        })
    }

    /// Build a request carrying `body` as JSON.
    pub fn build_json_request<B: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        segments: &[&str],
        query: &[(&str, String)],
        body: &B,
    ) -> Result<HttpRequest, ApiError> {
        let mut request = self.build_request(method, segments, query)?;
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        request
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        request.body = Some(body);
        Ok(request)
    }

    fn url_for(&self, segments: &[&str], query: &[(&str, String)]) -> Result<String, ApiError> {
        if let Some(position) = segments.iter().position(|s| s.is_empty()) {
            return Err(ApiError::InvalidRequest(format!(
                "path segment {position} of /{} is empty",
                segments.join("/")
            )));
        }
        if let Some(segment) = segments.iter().find(|s| matches!(**s, "." | "..")) {
            return Err(ApiError::InvalidRequest(format!(
                "path segment {segment:?} of /{} is a relative reference",
                segments.join("/")
            )));
        }

        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidRequest("base URL cannot carry a path".into()))?;
            path.pop_if_empty();
            path.extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url.to_string())
    }

    // ------------------------------------------------------------------
    // Execute
    // ------------------------------------------------------------------

    pub fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let started = Instant::now();
        let result = self.transport.execute(&request);
        match &result {
            Ok(response) => debug!(
                method = request.method.as_str(),
                url = %request.url,
                status = response.status,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Request completed"
            ),
            Err(error) => debug!(
                method = request.method.as_str(),
                url = %request.url,
                %error,
                "Request failed"
            ),
        }
        result
    }

    // ------------------------------------------------------------------
    // Parse
    // ------------------------------------------------------------------

    /// Deserialize the body if the status is exactly `expected`.
    pub fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
        check_status(&response, expected)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    /// Accept the response if the status is exactly `expected`, ignoring the body.
    pub fn parse_empty(response: HttpResponse, expected: u16) -> Result<(), ApiError> {
        check_status(&response, expected)
    }

    // ------------------------------------------------------------------
    // One-call helpers used by the services
    // ------------------------------------------------------------------

    pub(crate) fn get<T: DeserializeOwned>(&self, segments: &[&str], query: &[(&str, String)]) -> Result<T, ApiError> {
        let request = self.build_request(HttpMethod::Get, segments, query)?;
        Self::parse_json(self.execute(request)?, 200)
    }

    pub(crate) fn send_json<B, T>(
        &self,
        method: HttpMethod,
        segments: &[&str],
        body: &B,
        expected: u16,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_json_request(method, segments, &[], body)?;
        Self::parse_json(self.execute(request)?, expected)
    }

    /// Body-less POST, for actions such as cancel or test.
    pub(crate) fn post_empty<T: DeserializeOwned>(&self, segments: &[&str], expected: u16) -> Result<T, ApiError> {
        let request = self.build_request(HttpMethod::Post, segments, &[])?;
        Self::parse_json(self.execute(request)?, expected)
    }

    pub(crate) fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        let request = self.build_request(HttpMethod::Delete, segments, &[])?;
        Self::parse_empty(self.execute(request)?, 204)
    }

    // ------------------------------------------------------------------
    // Endpoints and services
    // ------------------------------------------------------------------

    pub fn health(&self) -> Result<Health, ApiError> {
        self.get(&["v1", "health"], &[])
    }

    pub fn agents(&self) -> AgentsService<'_> {
        AgentsService::new(self)
    }

    pub fn compute(&self) -> ComputeService<'_> {
        ComputeService::new(self)
    }

    pub fn database(&self) -> DatabaseService<'_> {
        DatabaseService::new(self)
    }

    pub fn format(&self) -> FormatService<'_> {
        FormatService::new(self)
    }

    pub fn legal(&self) -> LegalResearchService<'_> {
        LegalResearchService::new(self)
    }

    pub fn llm(&self) -> LlmService<'_> {
        LlmService::new(self)
    }

    pub fn memory(&self) -> MemoryService<'_> {
        MemoryService::new(self)
    }

    pub fn ocr(&self) -> OcrService<'_> {
        OcrService::new(self)
    }

    pub fn payments(&self) -> PaymentsService<'_> {
        PaymentsService::new(self)
    }

    pub fn privilege(&self) -> PrivilegeService<'_> {
        PrivilegeService::new(self)
    }

    pub fn search(&self) -> SearchService<'_> {
        SearchService::new(self)
    }

    pub fn voice(&self) -> VoiceService<'_> {
        VoiceService::new(self)
    }

    pub fn vault(&self) -> VaultService<'_> {
        VaultService::new(self)
    }

    pub fn webhooks(&self) -> WebhooksService<'_> {
        WebhooksService::new(self)
    }

    pub fn workflows(&self) -> WorkflowsService<'_> {
        WorkflowsService::new(self)
    }
}

/// Map any status other than `expected` to the matching `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::from_response(response))
}
