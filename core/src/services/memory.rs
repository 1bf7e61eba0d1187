use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::memory::{MemoryRecord, MemorySearchRequest, MemorySearchResult, StoreMemoryRequest};

/// Long-term semantic memory, partitioned by namespace.
pub trait MemoryApi {
    fn store_memory(&self, input: &StoreMemoryRequest) -> Result<MemoryRecord, ApiError>;

    fn get_memory(&self, memory_id: &str) -> Result<MemoryRecord, ApiError>;

    fn search_memory(&self, input: &MemorySearchRequest) -> Result<MemorySearchResult, ApiError>;

    fn delete_memory(&self, memory_id: &str) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct MemoryService<'a> {
    client: &'a ApiClient,
}

impl<'a> MemoryService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl MemoryApi for MemoryService<'_> {
    fn store_memory(&self, input: &StoreMemoryRequest) -> Result<MemoryRecord, ApiError> {
        self.client.send_json(HttpMethod::Post, &["v1", "memory"], input, 201)
    }

    fn get_memory(&self, memory_id: &str) -> Result<MemoryRecord, ApiError> {
        self.client.get(&["v1", "memory", memory_id], &[])
    }

    fn search_memory(&self, input: &MemorySearchRequest) -> Result<MemorySearchResult, ApiError> {
        if input.top_k == Some(0) {
            return Err(ApiError::InvalidRequest("top_k must be at least 1".into()));
        }
        self.client
            .send_json(HttpMethod::Post, &["v1", "memory", "search"], input, 200)
    }

    fn delete_memory(&self, memory_id: &str) -> Result<(), ApiError> {
        self.client.delete(&["v1", "memory", memory_id])
    }
}
