//! One contract trait and one thin service per API area.
//!
//! Each service borrows the shared `ApiClient` and turns every method into
//! exactly one HTTP call: serialize, send, check the documented status,
//! deserialize. The contracts are object safe so callers can hold a
//! `&dyn AgentsApi` and swap in their own implementation.

mod agents;
mod compute;
mod database;
mod format;
mod legal;
mod llm;
mod memory;
mod ocr;
mod payments;
mod privilege;
mod search;
mod vault;
mod voice;
mod webhooks;
mod workflows;

pub use agents::{AgentsApi, AgentsService};
pub use compute::{ComputeApi, ComputeService};
pub use database::{DatabaseApi, DatabaseService};
pub use format::{FormatApi, FormatService};
pub use legal::{LegalResearchApi, LegalResearchService};
pub use llm::{LlmApi, LlmService};
pub use memory::{MemoryApi, MemoryService};
pub use ocr::{OcrApi, OcrService};
pub use payments::{PaymentsApi, PaymentsService};
pub use privilege::{PrivilegeApi, PrivilegeService};
pub use search::{SearchApi, SearchService};
pub use vault::{VaultApi, VaultService};
pub use voice::{VoiceApi, VoiceService};
pub use webhooks::{WebhooksApi, WebhooksService};
pub use workflows::{WorkflowsApi, WorkflowsService};
