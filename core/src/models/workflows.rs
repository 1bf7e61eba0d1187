use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which platform service a workflow step calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StepKind {
    Agent,
    Llm,
    Ocr,
    Convert,
    Privilege,
    Search,
    Webhook,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub name: String,
    pub kind: StepKind,
    /// Step-specific settings, passed through to the service.
    #[serde(default)]
    pub config: Value,
}

impl WorkflowStep {
    pub fn new(name: impl Into<String>, kind: StepKind) -> Self {
        Self {
            name: name.into(),
            kind,
            config: Value::Null,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub steps: Vec<WorkflowStep>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateWorkflowRequest {
    pub name: String,
    pub steps: Vec<WorkflowStep>,
}

impl CreateWorkflowRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_step(mut self, step: WorkflowStep) -> Self {
        self.steps.push(step);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteWorkflowRequest {
    pub input: Value,
}

impl ExecuteWorkflowRequest {
    pub fn new(input: Value) -> Self {
        Self { input }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl ExecutionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ExecutionStatus::Succeeded | ExecutionStatus::Failed | ExecutionStatus::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowExecution {
    pub id: String,
    pub workflow_id: String,
    pub status: ExecutionStatus,
    pub input: Value,
    #[serde(default)]
    pub output: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn create_workflow_shape() {
        let req = CreateWorkflowRequest::new("intake")
            .with_step(WorkflowStep::new("scan", StepKind::Ocr))
            .with_step(WorkflowStep::new("screen", StepKind::Privilege).with_config(json!({"jurisdiction": "us"})));
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "name": "intake",
                "steps": [
                    {"name": "scan", "kind": "ocr", "config": null},
                    {"name": "screen", "kind": "privilege", "config": {"jurisdiction": "us"}}
                ]
            })
        );
    }

    #[test]
    fn execution_without_output() {
        let execution: WorkflowExecution = serde_json::from_value(json!({
            "id": "exe_1",
            "workflow_id": "wf_1",
            "status": "running",
            "input": {"doc": "vlt_1/obj_1"},
            "started_at": "2026-04-01T12:00:00Z"
        }))
        .unwrap();
        assert_eq!(execution.status, ExecutionStatus::Running);
        assert!(!execution.status.is_terminal());
        assert!(execution.output.is_none());
        assert!(execution.finished_at.is_none());
    }
}
