//! End-to-end tests against the live mock server.
//!
//! # Design
//! Each test starts the mock server on a random port, then drives the public
//! client over real HTTP with the production `ureq` transport. This checks
//! that request building, status handling and response parsing agree with
//! the server on every route.

use std::net::SocketAddr;

use lexapi_core::models::agents::{AgentStatus, CreateAgentRequest, RunAgentRequest, RunStatus};
use lexapi_core::models::compute::{JobStatus, ResourceSpec, SubmitJobRequest};
use lexapi_core::models::database::QueryRequest;
use lexapi_core::models::format::{ConvertRequest, DocumentFormat};
use lexapi_core::models::legal::{CaseSearchRequest, CitationCheckRequest, StatuteQuery, Treatment};
use lexapi_core::models::llm::{ChatCompletionRequest, ChatMessage, EmbeddingRequest};
use lexapi_core::models::memory::{MemorySearchRequest, StoreMemoryRequest};
use lexapi_core::models::ocr::OcrRequest;
use lexapi_core::models::payments::{CheckoutSession, CreateCheckoutRequest};
use lexapi_core::models::privilege::{BatchPrivilegeRequest, PrivilegeRequest, PrivilegeType};
use lexapi_core::models::search::{SearchRequest, SearchSource};
use lexapi_core::models::vault::{CreateVaultRequest, UploadObjectRequest};
use lexapi_core::models::voice::{AudioFormat, SpeechRequest, TranscriptionRequest};
use lexapi_core::models::webhooks::{CreateWebhookRequest, UpdateWebhookRequest, WebhookEvent};
use lexapi_core::models::workflows::{CreateWorkflowRequest, ExecuteWorkflowRequest, ExecutionStatus, StepKind, WorkflowStep};
use lexapi_core::prelude::*;
use lexapi_core::retry::IDEMPOTENCY_KEY_HEADER;
use lexapi_core::{HttpMethod, ListParams};
use serde_json::json;

/// Start the mock server on a random port and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr) -> ApiClient {
    let config = ClientConfig::new(format!("http://{addr}"))
        .with_api_key("sk_test")
        .with_timeout_secs(5)
        .without_retry();
    ApiClient::new(config).unwrap()
}

fn client() -> ApiClient {
    client_for(start_server())
}

#[test]
fn health_and_auth() {
    let addr = start_server();
    let anonymous = ApiClient::new(ClientConfig::new(format!("http://{addr}")).without_retry()).unwrap();

    assert_eq!(anonymous.health().unwrap().status, "ok");

    let err = anonymous.agents().list_agents(&ListParams::new()).unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert_eq!(err.details().unwrap().code.as_deref(), Some("unauthorized"));
}

#[test]
fn agent_lifecycle() {
    let client = client();
    let agents = client.agents();

    assert!(agents.list_agents(&ListParams::new()).unwrap().data.is_empty());

    let agent = agents
        .create_agent(
            &CreateAgentRequest::new("Reviewer", "claude-sonnet")
                .with_instructions("Flag indemnity clauses")
                .with_tool("search"),
        )
        .unwrap();
    assert_eq!(agent.status, AgentStatus::Active);
    assert_eq!(agent.tools, vec!["search".to_string()]);
    assert_eq!(agents.get_agent(&agent.id).unwrap(), agent);

    let run = agents
        .run_agent(&agent.id, &RunAgentRequest::new("review the NDA"))
        .unwrap();
    assert_eq!(run.status, RunStatus::Queued);
    let run = agents.get_run(&agent.id, &run.id).unwrap();
    assert!(run.status.is_terminal());
    assert_eq!(run.output.as_deref(), Some("Processed: review the NDA"));

    assert_eq!(agents.list_agents(&ListParams::new()).unwrap().data.len(), 1);

    agents.delete_agent(&agent.id).unwrap();
    let err = agents.get_agent(&agent.id).unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
    assert_eq!(err.details().unwrap().code.as_deref(), Some("agent_not_found"));
    assert!(matches!(agents.delete_agent(&agent.id), Err(ApiError::NotFound(_))));
}

#[test]
fn compute_jobs() {
    let client = client();
    let compute = client.compute();

    let job = compute
        .submit_job(
            &SubmitJobRequest::new("python:3.12")
                .with_command(["python", "-c", "print(1)"])
                .with_resources(ResourceSpec::new(2.0, 2048)),
        )
        .unwrap();
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.resources.memory_mb, 2048);
    assert_eq!(compute.get_job(&job.id).unwrap().id, job.id);

    let pending = compute.list_jobs(&ListParams::new(), Some(JobStatus::Pending)).unwrap();
    assert_eq!(pending.data.len(), 1);

    let cancelled = compute.cancel_job(&job.id).unwrap();
    assert_eq!(cancelled.status, JobStatus::Cancelled);
    assert!(matches!(compute.cancel_job(&job.id), Err(ApiError::Conflict(_))));
    assert!(compute
        .list_jobs(&ListParams::new(), Some(JobStatus::Running))
        .unwrap()
        .data
        .is_empty());
}

#[test]
fn database_and_format() {
    let client = client();

    let result = client
        .database()
        .execute_query(&QueryRequest::new("SELECT id, title, status FROM matters WHERE status = $1").with_param("open"))
        .unwrap();
    assert_eq!(result.row_count, 2);
    assert_eq!(result.column("title").unwrap()[0], &json!("Acme v. Globex"));

    let tables = client.database().list_tables(Some("main")).unwrap();
    assert_eq!(tables.data[0].name, "matters");
    assert!(matches!(client.database().list_tables(Some("archive")), Err(ApiError::NotFound(_))));

    let converted = client
        .format()
        .convert(&ConvertRequest::from_bytes(b"# Heads of terms", DocumentFormat::Markdown, DocumentFormat::Pdf))
        .unwrap();
    assert_eq!(converted.format, DocumentFormat::Pdf);
    assert_eq!(converted.decode_content().unwrap(), b"# Heads of terms");

    let formats = client.format().list_formats().unwrap();
    assert!(formats.data.iter().any(|f| f.source == DocumentFormat::Docx));
}

#[test]
fn legal_research() {
    let client = client();
    let legal = client.legal();

    let cases = legal.search_cases(&CaseSearchRequest::new("breach of contract")).unwrap();
    assert!(cases.data.iter().any(|c| c.id == "case_1"));

    let case = legal.get_case("case_2").unwrap();
    assert_eq!(case.citation, "[1893] 1 QB 256");
    assert!(matches!(legal.get_case("case_404"), Err(ApiError::NotFound(_))));

    let statutes = legal
        .search_statutes(&StatuteQuery::new("sale of goods").with_jurisdiction("uk"))
        .unwrap();
    assert_eq!(statutes.data[0].id, "st_1");

    let checked = legal
        .verify_citations(&CitationCheckRequest::new(["163 U.S. 537", "1 Fake 1"]))
        .unwrap();
    assert_eq!(checked.results[0].treatment, Treatment::Overruled);
    assert_eq!(checked.problems().count(), 2);
}

#[test]
fn llm_endpoints() {
    let client = client();
    let llm = client.llm();

    let completion = llm
        .chat_completion(&ChatCompletionRequest::new(
            "gpt-4o",
            vec![ChatMessage::system("Be brief."), ChatMessage::user("Summarise clause 4")],
        ))
        .unwrap();
    assert_eq!(completion.first_content(), Some("Echo: Summarise clause 4"));

    let embeddings = llm
        .create_embeddings(&EmbeddingRequest::new("text-embedding-3-small", ["indemnity", "warranty"]))
        .unwrap();
    assert_eq!(embeddings.data.len(), 2);
    assert!(matches!(
        llm.create_embeddings(&EmbeddingRequest::new("gpt-4o", ["x"])),
        Err(ApiError::Unprocessable(_))
    ));

    let models = llm.list_models().unwrap();
    assert!(models.data.iter().any(|m| m.supports_embeddings));
}

#[test]
fn memory_and_search() {
    let client = client();
    let memory = client.memory();

    let record = memory
        .store_memory(&StoreMemoryRequest::new("matter-42", "Indemnity cap is twice annual fees").with_metadata("source", "email"))
        .unwrap();
    assert_eq!(memory.get_memory(&record.id).unwrap().content, record.content);

    let found = memory
        .search_memory(&MemorySearchRequest::new("matter-42", "indemnity cap").with_top_k(3u32))
        .unwrap();
    assert_eq!(found.best().unwrap().record.id, record.id);

    let results = client
        .search()
        .search(&SearchRequest::new("indemnity").with_source(SearchSource::Memory))
        .unwrap();
    assert_eq!(results.from_source(SearchSource::Memory).count(), 1);

    memory.delete_memory(&record.id).unwrap();
    assert!(matches!(memory.get_memory(&record.id), Err(ApiError::NotFound(_))));
}

#[test]
fn document_processing() {
    let client = client();

    let ocr = client
        .ocr()
        .extract_text(&OcrRequest::from_url("https://files.example/scan.pdf").with_language("de"))
        .unwrap();
    assert_eq!(ocr.language.as_deref(), Some("de"));
    assert!(!ocr.full_text().is_empty());

    let text = "Advice from counsel on the merger";
    let assessment = client.privilege().detect_privilege(&PrivilegeRequest::new(text)).unwrap();
    assert!(assessment.privileged);
    assert_eq!(assessment.flagged_text(text), vec!["counsel"]);

    let batch = client
        .privilege()
        .detect_privilege_batch(&BatchPrivilegeRequest::new(vec![
            PrivilegeRequest::new("Attorney work product"),
            PrivilegeRequest::new("Lunch menu"),
        ]))
        .unwrap();
    assert_eq!(batch.results.len(), 2);
    assert!(batch.results[0].privilege_types.contains(&PrivilegeType::WorkProduct));
    assert!(!batch.results[1].privileged);

    let transcript = client
        .voice()
        .transcribe(&TranscriptionRequest::from_bytes(b"RIFF", AudioFormat::Wav).with_diarize(true))
        .unwrap();
    assert_eq!(transcript.segments[0].speaker.as_deref(), Some("A"));

    let speech = client
        .voice()
        .synthesize(&SpeechRequest::new("The hearing is adjourned", "alloy", AudioFormat::Mp3).with_speed(2.0f32))
        .unwrap();
    assert_eq!(speech.format, AudioFormat::Mp3);
    assert!(!speech.decode_audio().unwrap().is_empty());
}

#[test]
fn payments() {
    let client = client();
    let payments = client.payments();

    let checkout = CreateCheckoutRequest::new("price_pro", "https://app.example/ok", "https://app.example/cancel");
    let first = payments.create_checkout_session(&checkout).unwrap();
    let second = payments.create_checkout_session(&checkout).unwrap();
    assert_ne!(first.id, second.id, "each call carries a fresh idempotency key");

    let balance = payments.get_balance().unwrap();
    assert_eq!(balance.currency, "usd");

    let page = payments.list_transactions(&ListParams::new().with_limit(2u32)).unwrap();
    assert_eq!(page.data.len(), 2);
    let rest = payments
        .list_transactions(&ListParams::after(&page).unwrap())
        .unwrap();
    assert_eq!(rest.data[0].id, "txn_3");
    assert!(!rest.has_more());
}

#[test]
fn repeated_idempotency_key_replays_checkout() {
    let client = client();
    let body = CreateCheckoutRequest::new("price_pro", "https://app.example/ok", "https://app.example/cancel");

    let send = || -> CheckoutSession {
        let mut request = client
            .build_json_request(HttpMethod::Post, &["v1", "payments", "checkout"], &[], &body)
            .unwrap();
        request
            .headers
            .push((IDEMPOTENCY_KEY_HEADER.to_string(), "order-1138".to_string()));
        ApiClient::parse_json(client.execute(request).unwrap(), 201).unwrap()
    };

    assert_eq!(send(), send());
}

#[test]
fn vault_objects() {
    let client = client();
    let vault = client.vault();

    let created = vault
        .create_vault(&CreateVaultRequest::new("Matter 42").with_description("Acquisition"))
        .unwrap();
    let upload = UploadObjectRequest::from_bytes("nda.txt", "text/plain", b"mutual NDA");
    let object = vault.upload_object(&created.id, &upload).unwrap();
    assert_eq!(object.size_bytes, 10);
    assert!(matches!(vault.upload_object(&created.id, &upload), Err(ApiError::Conflict(_))));

    assert_eq!(vault.get_vault(&created.id).unwrap().object_count, 1);
    assert_eq!(vault.list_vaults(&ListParams::new()).unwrap().data.len(), 1);
    assert_eq!(vault.list_objects(&created.id, &ListParams::new()).unwrap().data[0].key, "nda.txt");

    let download = vault.download_object(&created.id, &object.id).unwrap();
    assert_eq!(download.verify_checksum().unwrap(), b"mutual NDA");

    vault.delete_object(&created.id, &object.id).unwrap();
    assert!(matches!(vault.download_object(&created.id, &object.id), Err(ApiError::NotFound(_))));

    vault.delete_vault(&created.id).unwrap();
    assert!(matches!(vault.get_vault(&created.id), Err(ApiError::NotFound(_))));
}

#[test]
fn webhook_lifecycle() {
    let client = client();
    let webhooks = client.webhooks();

    let hook = webhooks
        .create_webhook(&CreateWebhookRequest::new(
            "https://hooks.example/lexapi",
            vec![WebhookEvent::PaymentSucceeded],
        ))
        .unwrap();
    assert!(hook.secret.is_some());
    assert!(webhooks.get_webhook(&hook.id).unwrap().secret.is_none());
    assert_eq!(webhooks.list_webhooks(&ListParams::new()).unwrap().data.len(), 1);

    let delivery = webhooks.test_webhook(&hook.id).unwrap();
    assert!(delivery.success);
    assert_eq!(delivery.status_code, Some(200));

    let updated = webhooks
        .update_webhook(&hook.id, &UpdateWebhookRequest::new().with_active(false))
        .unwrap();
    assert!(!updated.active);
    assert!(!webhooks.test_webhook(&hook.id).unwrap().success);

    webhooks.delete_webhook(&hook.id).unwrap();
    assert!(matches!(webhooks.get_webhook(&hook.id), Err(ApiError::NotFound(_))));
}

#[test]
fn workflow_execution() {
    let client = client();
    let workflows = client.workflows();

    let workflow = workflows
        .create_workflow(
            &CreateWorkflowRequest::new("intake")
                .with_step(WorkflowStep::new("ocr", StepKind::Ocr))
                .with_step(WorkflowStep::new("screen", StepKind::Privilege).with_config(json!({"jurisdiction": "us"}))),
        )
        .unwrap();
    assert_eq!(workflows.get_workflow(&workflow.id).unwrap().steps.len(), 2);
    assert_eq!(workflows.list_workflows(&ListParams::new()).unwrap().data.len(), 1);

    let execution = workflows
        .execute_workflow(&workflow.id, &ExecuteWorkflowRequest::new(json!({"document_id": "obj_1"})))
        .unwrap();
    assert_eq!(execution.status, ExecutionStatus::Pending);

    let finished = workflows.get_execution(&workflow.id, &execution.id).unwrap();
    assert_eq!(finished.status, ExecutionStatus::Succeeded);
    assert_eq!(finished.output, Some(json!({"steps_completed": 2})));
    assert!(finished.finished_at.is_some());

    workflows.delete_workflow(&workflow.id).unwrap();
    assert!(matches!(
        workflows.get_execution(&workflow.id, &execution.id),
        Err(ApiError::NotFound(_))
    ));
}
