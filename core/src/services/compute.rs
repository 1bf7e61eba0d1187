use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::compute::{ComputeJob, JobStatus, SubmitJobRequest};
use crate::models::{ListParams, Page};

/// Containerised batch jobs.
pub trait ComputeApi {
    fn submit_job(&self, input: &SubmitJobRequest) -> Result<ComputeJob, ApiError>;

    fn get_job(&self, job_id: &str) -> Result<ComputeJob, ApiError>;

    /// List jobs, optionally only those in `status`.
    fn list_jobs(&self, params: &ListParams, status: Option<JobStatus>) -> Result<Page<ComputeJob>, ApiError>;

    fn cancel_job(&self, job_id: &str) -> Result<ComputeJob, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct ComputeService<'a> {
    client: &'a ApiClient,
}

impl<'a> ComputeService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl ComputeApi for ComputeService<'_> {
    fn submit_job(&self, input: &SubmitJobRequest) -> Result<ComputeJob, ApiError> {
        if input.image.trim().is_empty() {
            return Err(ApiError::InvalidRequest("compute job needs an image".into()));
        }
        self.client
            .send_json(HttpMethod::Post, &["v1", "compute", "jobs"], input, 201)
    }

    fn get_job(&self, job_id: &str) -> Result<ComputeJob, ApiError> {
        self.client.get(&["v1", "compute", "jobs", job_id], &[])
    }

    fn list_jobs(&self, params: &ListParams, status: Option<JobStatus>) -> Result<Page<ComputeJob>, ApiError> {
        let mut query = params.to_query();
        if let Some(status) = status {
            query.push(("status", status.as_ref().to_string()));
        }
        self.client.get(&["v1", "compute", "jobs"], &query)
    }

    fn cancel_job(&self, job_id: &str) -> Result<ComputeJob, ApiError> {
        self.client
            .post_empty(&["v1", "compute", "jobs", job_id, "cancel"], 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{client_returning, client_without_calls};

    const JOB: &str = r#"{"id":"job_1","image":"redline:1","command":[],"status":"cancelled","resources":{"cpu":1.0,"memory_mb":512},"created_at":"2026-02-02T08:00:00Z"}"#;

    #[test]
    fn list_jobs_filters_by_status() {
        let client = client_returning(
            |req| req.url == "http://api.test/v1/compute/jobs?status=running",
            200,
            r#"{"data":[]}"#,
        );
        client
            .compute()
            .list_jobs(&ListParams::new(), Some(JobStatus::Running))
            .unwrap();
    }

    #[test]
    fn cancel_is_a_bodyless_post() {
        let client = client_returning(
            |req| {
                req.method == HttpMethod::Post
                    && req.url == "http://api.test/v1/compute/jobs/job_1/cancel"
                    && req.body.is_none()
                    && req.header("content-type").is_none()
            },
            200,
            JOB,
        );
        let job = client.compute().cancel_job("job_1").unwrap();
        assert_eq!(job.status, JobStatus::Cancelled);
    }

    #[test]
    fn blank_image_is_rejected_locally() {
        let client = client_without_calls();
        let err = client.compute().submit_job(&SubmitJobRequest::new("  ")).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }
}
