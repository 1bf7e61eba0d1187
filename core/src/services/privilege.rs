use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::privilege::{BatchPrivilegeRequest, BatchPrivilegeResult, PrivilegeAssessment, PrivilegeRequest};

/// Attorney-client / work-product privilege screening.
pub trait PrivilegeApi {
    fn detect_privilege(&self, input: &PrivilegeRequest) -> Result<PrivilegeAssessment, ApiError>;

    fn detect_privilege_batch(&self, input: &BatchPrivilegeRequest) -> Result<BatchPrivilegeResult, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct PrivilegeService<'a> {
    client: &'a ApiClient,
}

impl<'a> PrivilegeService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl PrivilegeApi for PrivilegeService<'_> {
    fn detect_privilege(&self, input: &PrivilegeRequest) -> Result<PrivilegeAssessment, ApiError> {
        self.client
            .send_json(HttpMethod::Post, &["v1", "privilege", "detect"], input, 200)
    }

    fn detect_privilege_batch(&self, input: &BatchPrivilegeRequest) -> Result<BatchPrivilegeResult, ApiError> {
        if input.documents.is_empty() {
            return Err(ApiError::InvalidRequest("batch has no documents".into()));
        }
        let result: BatchPrivilegeResult =
            self.client
                .send_json(HttpMethod::Post, &["v1", "privilege", "detect", "batch"], input, 200)?;
        if result.results.len() != input.documents.len() {
            return Err(ApiError::Deserialization(format!(
                "batch returned {} assessments for {} documents",
                result.results.len(),
                input.documents.len()
            )));
        }
        Ok(result)
    }
}
