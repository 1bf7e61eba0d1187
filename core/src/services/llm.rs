use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::llm::{ChatCompletion, ChatCompletionRequest, EmbeddingRequest, EmbeddingResponse, ModelInfo};
use crate::models::Page;

/// Provider-agnostic LLM proxy.
pub trait LlmApi {
    fn chat_completion(&self, input: &ChatCompletionRequest) -> Result<ChatCompletion, ApiError>;

    fn create_embeddings(&self, input: &EmbeddingRequest) -> Result<EmbeddingResponse, ApiError>;

    fn list_models(&self) -> Result<Page<ModelInfo>, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct LlmService<'a> {
    client: &'a ApiClient,
}

impl<'a> LlmService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl LlmApi for LlmService<'_> {
    fn chat_completion(&self, input: &ChatCompletionRequest) -> Result<ChatCompletion, ApiError> {
        if input.messages.is_empty() {
            return Err(ApiError::InvalidRequest("chat completion needs at least one message".into()));
        }
        self.client
            .send_json(HttpMethod::Post, &["v1", "llm", "chat", "completions"], input, 200)
    }

    fn create_embeddings(&self, input: &EmbeddingRequest) -> Result<EmbeddingResponse, ApiError> {
        self.client
            .send_json(HttpMethod::Post, &["v1", "llm", "embeddings"], input, 200)
    }

    fn list_models(&self) -> Result<Page<ModelInfo>, ApiError> {
        self.client.get(&["v1", "llm", "models"], &[])
    }
}
