use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event names a webhook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr, strum::EnumString)]
pub enum WebhookEvent {
    #[serde(rename = "agent_run.completed")]
    #[strum(serialize = "agent_run.completed")]
    AgentRunCompleted,
    #[serde(rename = "compute_job.completed")]
    #[strum(serialize = "compute_job.completed")]
    ComputeJobCompleted,
    #[serde(rename = "workflow_execution.completed")]
    #[strum(serialize = "workflow_execution.completed")]
    WorkflowExecutionCompleted,
    #[serde(rename = "vault.object_created")]
    #[strum(serialize = "vault.object_created")]
    VaultObjectCreated,
    #[serde(rename = "payment.succeeded")]
    #[strum(serialize = "payment.succeeded")]
    PaymentSucceeded,
    /// An event this SDK version does not know. Never sent.
    #[serde(other, rename = "unknown")]
    #[strum(serialize = "unknown")]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    pub url: String,
    pub events: Vec<WebhookEvent>,
    pub active: bool,
    #[serde(default)]
    pub description: Option<String>,
    /// Signing secret; only returned by the create call.
    #[serde(default)]
    pub secret: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWebhookRequest {
    pub url: String,
    pub events: Vec<WebhookEvent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateWebhookRequest {
    pub fn new(url: impl Into<String>, events: Vec<WebhookEvent>) -> Self {
        Self {
            url: url.into(),
            events,
            description: None,
        }
    }
}

/// Reject event lists the server would not accept from this client.
pub(crate) fn check_events(events: &[WebhookEvent]) -> Result<(), String> {
    if events.is_empty() {
        return Err("webhook must subscribe to at least one event".into());
    }
    if events.contains(&WebhookEvent::Unknown) {
        return Err("webhook events contain an unrecognised event".into());
    }
    Ok(())
}

optional_setters!(CreateWebhookRequest {
    with_description => description: String,
});

/// Partial update; fields left `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWebhookRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<WebhookEvent>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}

impl UpdateWebhookRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.events.is_none() && self.active.is_none()
    }
}

optional_setters!(UpdateWebhookRequest {
    with_url => url: String,
    with_events => events: Vec<WebhookEvent>,
    with_active => active: bool,
});

/// Record of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookDelivery {
    pub id: String,
    pub webhook_id: String,
    pub event: WebhookEvent,
    #[serde(default)]
    pub status_code: Option<u16>,
    pub success: bool,
    pub delivered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn event_names_are_dotted() {
        let req = CreateWebhookRequest::new(
            "https://hooks.example/lex",
            vec![WebhookEvent::AgentRunCompleted, WebhookEvent::PaymentSucceeded],
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({"url": "https://hooks.example/lex", "events": ["agent_run.completed", "payment.succeeded"]})
        );
        assert_eq!(WebhookEvent::VaultObjectCreated.to_string(), "vault.object_created");
        assert_eq!(
            "compute_job.completed".parse::<WebhookEvent>().unwrap(),
            WebhookEvent::ComputeJobCompleted
        );
    }

    #[test]
    fn unknown_event_reads_and_prints_the_same() {
        let event: WebhookEvent = serde_json::from_value(json!("case.closed")).unwrap();
        assert_eq!(event, WebhookEvent::Unknown);
        assert_eq!(serde_json::to_value(event).unwrap(), json!(event.to_string()));
    }

    #[test]
    fn update_sends_only_changed_fields() {
        let req = UpdateWebhookRequest::new().with_active(false);
        assert!(!req.is_empty());
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({"active": false}));
        assert!(UpdateWebhookRequest::new().is_empty());
    }
}
