use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::agents::{Agent, AgentRun, CreateAgentRequest, RunAgentRequest};
use crate::models::{ListParams, Page};

/// Agent definitions and their runs.
pub trait AgentsApi {
    fn list_agents(&self, params: &ListParams) -> Result<Page<Agent>, ApiError>;

    fn create_agent(&self, input: &CreateAgentRequest) -> Result<Agent, ApiError>;

    fn get_agent(&self, agent_id: &str) -> Result<Agent, ApiError>;

    fn delete_agent(&self, agent_id: &str) -> Result<(), ApiError>;

    /// Start a run. The server accepts it asynchronously; poll `get_run`.
    fn run_agent(&self, agent_id: &str, input: &RunAgentRequest) -> Result<AgentRun, ApiError>;

    fn get_run(&self, agent_id: &str, run_id: &str) -> Result<AgentRun, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct AgentsService<'a> {
    client: &'a ApiClient,
}

impl<'a> AgentsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl AgentsApi for AgentsService<'_> {
    fn list_agents(&self, params: &ListParams) -> Result<Page<Agent>, ApiError> {
        self.client.get(&["v1", "agents"], &params.to_query())
    }

    fn create_agent(&self, input: &CreateAgentRequest) -> Result<Agent, ApiError> {
        self.client.send_json(HttpMethod::Post, &["v1", "agents"], input, 201)
    }

    fn get_agent(&self, agent_id: &str) -> Result<Agent, ApiError> {
        self.client.get(&["v1", "agents", agent_id], &[])
    }

    fn delete_agent(&self, agent_id: &str) -> Result<(), ApiError> {
        self.client.delete(&["v1", "agents", agent_id])
    }

    fn run_agent(&self, agent_id: &str, input: &RunAgentRequest) -> Result<AgentRun, ApiError> {
        self.client
            .send_json(HttpMethod::Post, &["v1", "agents", agent_id, "runs"], input, 202)
    }

    fn get_run(&self, agent_id: &str, run_id: &str) -> Result<AgentRun, ApiError> {
        self.client.get(&["v1", "agents", agent_id, "runs", run_id], &[])
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::agents::{AgentStatus, RunStatus};
    use crate::services::test_support::{client_returning, client_without_calls, json_body};

    const AGENT: &str = r#"{"id":"ag_1","name":"Reviewer","model":"claude-sonnet","tools":["search"],"status":"active","created_at":"2026-01-05T10:00:00Z"}"#;

    #[test]
    fn create_agent_posts_json_and_expects_201() {
        let client = client_returning(
            |req| {
                req.method == HttpMethod::Post
                    && req.url == "http://api.test/v1/agents"
                    && json_body(req) == json!({"name": "Reviewer", "model": "claude-sonnet", "tools": ["search"]})
            },
            201,
            AGENT,
        );
        let agent = client
            .agents()
            .create_agent(&CreateAgentRequest::new("Reviewer", "claude-sonnet").with_tool("search"))
            .unwrap();
        assert_eq!(agent.id, "ag_1");
        assert_eq!(agent.status, AgentStatus::Active);
    }

    #[test]
    fn create_agent_with_200_is_unexpected() {
        let client = client_returning(|_| true, 200, AGENT);
        let err = client
            .agents()
            .create_agent(&CreateAgentRequest::new("Reviewer", "claude-sonnet"))
            .unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedStatus(_)));
    }

    #[test]
    fn list_agents_sends_pagination() {
        let client = client_returning(
            |req| req.method == HttpMethod::Get && req.url == "http://api.test/v1/agents?limit=2&cursor=c_1",
            200,
            r#"{"data":[],"next_cursor":null}"#,
        );
        let page = client
            .agents()
            .list_agents(&ListParams::new().with_limit(2u32).with_cursor("c_1"))
            .unwrap();
        assert!(page.data.is_empty());
    }

    #[test]
    fn run_agent_expects_202() {
        let client = client_returning(
            |req| req.url == "http://api.test/v1/agents/ag_1/runs" && json_body(req)["input"] == "Review clause 9",
            202,
            r#"{"id":"run_1","agent_id":"ag_1","status":"queued","input":"Review clause 9","created_at":"2026-01-05T10:01:00Z"}"#,
        );
        let run = client
            .agents()
            .run_agent("ag_1", &RunAgentRequest::new("Review clause 9"))
            .unwrap();
        assert_eq!(run.status, RunStatus::Queued);
        assert!(run.output.is_none());
    }

    #[test]
    fn delete_missing_agent_is_not_found() {
        let client = client_returning(
            |req| req.method == HttpMethod::Delete && req.url == "http://api.test/v1/agents/ag_404",
            404,
            r#"{"error":{"code":"not_found","message":"agent ag_404 not found"}}"#,
        );
        let err = client.agents().delete_agent("ag_404").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref d) if d.message == "agent ag_404 not found"));
    }

    #[test]
    fn empty_id_never_reaches_transport() {
        let client = client_without_calls();
        assert!(matches!(client.agents().get_agent(""), Err(ApiError::InvalidRequest(_))));
        assert!(matches!(client.agents().get_run("ag_1", ""), Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn contract_is_object_safe() {
        let client = client_returning(|req| req.url == "http://api.test/v1/agents/ag_1", 200, AGENT);
        let service = client.agents();
        let api: &dyn AgentsApi = &service;
        assert_eq!(api.get_agent("ag_1").unwrap().name, "Reviewer");
    }
}
