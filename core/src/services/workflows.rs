use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::workflows::{CreateWorkflowRequest, ExecuteWorkflowRequest, Workflow, WorkflowExecution};
use crate::models::{ListParams, Page};

/// Multi-step pipelines chaining other services.
pub trait WorkflowsApi {
    fn create_workflow(&self, input: &CreateWorkflowRequest) -> Result<Workflow, ApiError>;

    fn list_workflows(&self, params: &ListParams) -> Result<Page<Workflow>, ApiError>;

    fn get_workflow(&self, workflow_id: &str) -> Result<Workflow, ApiError>;

    fn delete_workflow(&self, workflow_id: &str) -> Result<(), ApiError>;

    /// Start an execution; it completes asynchronously.
    fn execute_workflow(&self, workflow_id: &str, input: &ExecuteWorkflowRequest)
        -> Result<WorkflowExecution, ApiError>;

    fn get_execution(&self, workflow_id: &str, execution_id: &str) -> Result<WorkflowExecution, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct WorkflowsService<'a> {
    client: &'a ApiClient,
}

impl<'a> WorkflowsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl WorkflowsApi for WorkflowsService<'_> {
    fn create_workflow(&self, input: &CreateWorkflowRequest) -> Result<Workflow, ApiError> {
        if input.steps.is_empty() {
            return Err(ApiError::InvalidRequest("workflow has no steps".into()));
        }
        self.client.send_json(HttpMethod::Post, &["v1", "workflows"], input, 201)
    }

    fn list_workflows(&self, params: &ListParams) -> Result<Page<Workflow>, ApiError> {
        self.client.get(&["v1", "workflows"], &params.to_query())
    }

    fn get_workflow(&self, workflow_id: &str) -> Result<Workflow, ApiError> {
        self.client.get(&["v1", "workflows", workflow_id], &[])
    }

    fn delete_workflow(&self, workflow_id: &str) -> Result<(), ApiError> {
        self.client.delete(&["v1", "workflows", workflow_id])
    }

    fn execute_workflow(
        &self,
        workflow_id: &str,
        input: &ExecuteWorkflowRequest,
    ) -> Result<WorkflowExecution, ApiError> {
        self.client
            .send_json(HttpMethod::Post, &["v1", "workflows", workflow_id, "executions"], input, 202)
    }

    fn get_execution(&self, workflow_id: &str, execution_id: &str) -> Result<WorkflowExecution, ApiError> {
        self.client
            .get(&["v1", "workflows", workflow_id, "executions", execution_id], &[])
    }
}
