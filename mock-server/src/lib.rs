//! In-memory stand-in for the lexapi HTTP API.
//!
//! Mirrors every route the client crate calls, backed by `store::Store`.
//! Every `/v1` route except `/v1/health` requires a bearer token; failures
//! use the API's `{"error": {"code", "message"}}` envelope.

mod auth;
pub mod error;
mod handlers;
pub mod store;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::handlers::{agents, compute, data, documents, legal, llm, memory, payments, vault, webhooks, workflows};
use crate::store::{Db, Store};

pub use crate::error::MockError;

/// The full application over a fresh store.
pub fn app() -> Router {
    app_with_store(Store::shared())
}

pub fn app_with_store(db: Db) -> Router {
    let api = Router::new()
        .route("/v1/agents", get(agents::list_agents).post(agents::create_agent))
        .route("/v1/agents/{id}", get(agents::get_agent).delete(agents::delete_agent))
        .route("/v1/agents/{id}/runs", post(agents::run_agent))
        .route("/v1/agents/{id}/runs/{run_id}", get(agents::get_run))
        .route("/v1/compute/jobs", get(compute::list_jobs).post(compute::submit_job))
        .route("/v1/compute/jobs/{id}", get(compute::get_job))
        .route("/v1/compute/jobs/{id}/cancel", post(compute::cancel_job))
        .route("/v1/database/query", post(data::execute_query))
        .route("/v1/database/tables", get(data::list_tables))
        .route("/v1/format/convert", post(documents::convert))
        .route("/v1/format/formats", get(documents::list_formats))
        .route("/v1/legal/cases/search", post(legal::search_cases))
        .route("/v1/legal/cases/{id}", get(legal::get_case))
        .route("/v1/legal/statutes", get(legal::search_statutes))
        .route("/v1/legal/citations/verify", post(legal::verify_citations))
        .route("/v1/llm/chat/completions", post(llm::chat_completion))
        .route("/v1/llm/embeddings", post(llm::create_embeddings))
        .route("/v1/llm/models", get(llm::list_models))
        .route("/v1/memory", post(memory::store_memory))
        .route("/v1/memory/search", post(memory::search_memory))
        .route("/v1/memory/{id}", get(memory::get_memory).delete(memory::delete_memory))
        .route("/v1/ocr/extract", post(documents::extract_text))
        .route("/v1/payments/checkout", post(payments::create_checkout))
        .route("/v1/payments/balance", get(payments::get_balance))
        .route("/v1/payments/transactions", get(payments::list_transactions))
        .route("/v1/privilege/detect", post(documents::detect_privilege))
        .route("/v1/privilege/detect/batch", post(documents::detect_privilege_batch))
        .route("/v1/search", post(data::search))
        .route("/v1/voice/transcriptions", post(documents::transcribe))
        .route("/v1/voice/speech", post(documents::synthesize))
        .route("/v1/vaults", get(vault::list_vaults).post(vault::create_vault))
        .route("/v1/vaults/{id}", get(vault::get_vault).delete(vault::delete_vault))
        .route("/v1/vaults/{id}/objects", get(vault::list_objects).post(vault::upload_object))
        .route(
            "/v1/vaults/{id}/objects/{object_id}",
            get(vault::download_object).delete(vault::delete_object),
        )
        .route("/v1/webhooks", get(webhooks::list_webhooks).post(webhooks::create_webhook))
        .route(
            "/v1/webhooks/{id}",
            get(webhooks::get_webhook)
                .patch(webhooks::update_webhook)
                .delete(webhooks::delete_webhook),
        )
        .route("/v1/webhooks/{id}/test", post(webhooks::test_webhook))
        .route("/v1/workflows", get(workflows::list_workflows).post(workflows::create_workflow))
        .route(
            "/v1/workflows/{id}",
            get(workflows::get_workflow).delete(workflows::delete_workflow),
        )
        .route("/v1/workflows/{id}/executions", post(workflows::execute_workflow))
        .route("/v1/workflows/{id}/executions/{execution_id}", get(workflows::get_execution))
        .route_layer(middleware::from_fn(auth::require_bearer));

    Router::new()
        .route("/v1/health", get(handlers::health))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
