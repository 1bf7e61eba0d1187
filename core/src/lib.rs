//! Synchronous Rust client for the lexapi legal-AI platform.
//!
//! # Overview
//! One `ApiClient` covers every service area: agents, compute, database,
//! document formats, legal research, LLM proxy, memory, OCR, payments,
//! privilege detection, search, voice, vault storage, webhooks and
//! workflows. Each area is reached through an accessor that returns a thin
//! service implementing that area's contract trait:
//!
//! ```no_run
//! use lexapi_core::prelude::*;
//! use lexapi_core::models::ListParams;
//!
//! let client = ApiClient::from_env()?;
//! let agents = client.agents().list_agents(&ListParams::new().with_limit(10u32))?;
//! # Ok::<(), lexapi_core::ApiError>(())
//! ```
//!
//! # Design
//! - Requests are plain `HttpRequest` values; a `Transport` executes them.
//!   The default transport is `ureq`, optionally wrapped in
//!   `RetryingTransport`. Tests substitute their own.
//! - Every endpoint documents exactly one success status. Any other status
//!   becomes an `ApiError` variant carrying the server's error envelope.
//! - DTOs are defined independently from the mock-server crate; the
//!   integration tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod retry;
pub mod services;
pub mod transport;

pub use client::{ApiClient, Health};
pub use config::ClientConfig;
pub use error::{ApiError, ErrorDetails};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use models::{ListParams, Page};
pub use retry::RetryingTransport;
pub use transport::{Transport, UreqTransport};

/// The client, its configuration and every service contract.
pub mod prelude {
    pub use crate::services::{
        AgentsApi, ComputeApi, DatabaseApi, FormatApi, LegalResearchApi, LlmApi, MemoryApi, OcrApi,
        PaymentsApi, PrivilegeApi, SearchApi, VaultApi, VoiceApi, WebhooksApi, WorkflowsApi,
    };
    pub use crate::{ApiClient, ApiError, ClientConfig};
}
