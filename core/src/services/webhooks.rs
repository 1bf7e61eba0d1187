use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::webhooks::{check_events, CreateWebhookRequest, UpdateWebhookRequest, Webhook, WebhookDelivery};
use crate::models::{ListParams, Page};

/// Outbound event subscriptions.
pub trait WebhooksApi {
    /// Register an endpoint. The signing secret is only returned here.
    fn create_webhook(&self, input: &CreateWebhookRequest) -> Result<Webhook, ApiError>;

    fn list_webhooks(&self, params: &ListParams) -> Result<Page<Webhook>, ApiError>;

    fn get_webhook(&self, webhook_id: &str) -> Result<Webhook, ApiError>;

    fn update_webhook(&self, webhook_id: &str, input: &UpdateWebhookRequest) -> Result<Webhook, ApiError>;

    fn delete_webhook(&self, webhook_id: &str) -> Result<(), ApiError>;

    /// Ask the server to deliver a test event now and report the outcome.
    fn test_webhook(&self, webhook_id: &str) -> Result<WebhookDelivery, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct WebhooksService<'a> {
    client: &'a ApiClient,
}

impl<'a> WebhooksService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl WebhooksApi for WebhooksService<'_> {
    fn create_webhook(&self, input: &CreateWebhookRequest) -> Result<Webhook, ApiError> {
        check_events(&input.events).map_err(ApiError::InvalidRequest)?;
        self.client.send_json(HttpMethod::Post, &["v1", "webhooks"], input, 201)
    }

    fn list_webhooks(&self, params: &ListParams) -> Result<Page<Webhook>, ApiError> {
        self.client.get(&["v1", "webhooks"], &params.to_query())
    }

    fn get_webhook(&self, webhook_id: &str) -> Result<Webhook, ApiError> {
        self.client.get(&["v1", "webhooks", webhook_id], &[])
    }

    fn update_webhook(&self, webhook_id: &str, input: &UpdateWebhookRequest) -> Result<Webhook, ApiError> {
        if input.is_empty() {
            return Err(ApiError::InvalidRequest("webhook update changes nothing".into()));
        }
        if let Some(events) = &input.events {
            check_events(events).map_err(ApiError::InvalidRequest)?;
        }
        self.client
            .send_json(HttpMethod::Patch, &["v1", "webhooks", webhook_id], input, 200)
    }

    fn delete_webhook(&self, webhook_id: &str) -> Result<(), ApiError> {
        self.client.delete(&["v1", "webhooks", webhook_id])
    }

    fn test_webhook(&self, webhook_id: &str) -> Result<WebhookDelivery, ApiError> {
        self.client.post_empty(&["v1", "webhooks", webhook_id, "test"], 200)
    }
}
