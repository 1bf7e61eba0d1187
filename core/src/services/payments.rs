use tracing::debug;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::payments::{Balance, CheckoutSession, CreateCheckoutRequest, Transaction};
use crate::models::{ListParams, Page};
use crate::retry::IDEMPOTENCY_KEY_HEADER;

/// Billing: checkout, balance and transaction history.
pub trait PaymentsApi {
    /// Open a hosted checkout session. Each call carries a fresh
    /// idempotency key, so a retried request cannot create two sessions.
    fn create_checkout_session(&self, input: &CreateCheckoutRequest) -> Result<CheckoutSession, ApiError>;

    fn get_balance(&self) -> Result<Balance, ApiError>;

    fn list_transactions(&self, params: &ListParams) -> Result<Page<Transaction>, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct PaymentsService<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl PaymentsApi for PaymentsService<'_> {
    fn create_checkout_session(&self, input: &CreateCheckoutRequest) -> Result<CheckoutSession, ApiError> {
        if input.quantity == 0 {
            return Err(ApiError::InvalidRequest("checkout quantity must be at least 1".into()));
        }
        let mut request =
            self.client
                .build_json_request(HttpMethod::Post, &["v1", "payments", "checkout"], &[], input)?;
        let key = Uuid::new_v4().to_string();
        debug!(idempotency_key = %key, "Creating checkout session");
        request.headers.push((IDEMPOTENCY_KEY_HEADER.to_string(), key));
        ApiClient::parse_json(self.client.execute(request)?, 201)
    }

    fn get_balance(&self) -> Result<Balance, ApiError> {
        self.client.get(&["v1", "payments", "balance"], &[])
    }

    fn list_transactions(&self, params: &ListParams) -> Result<Page<Transaction>, ApiError> {
        self.client
            .get(&["v1", "payments", "transactions"], &params.to_query())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::payments::CheckoutStatus;
    use crate::services::test_support::{client_returning, client_without_calls};

    #[test]
    fn checkout_carries_idempotency_key() {
        let client = client_returning(
            |req| {
                req.url == "http://api.test/v1/payments/checkout"
                    && req
                        .header("idempotency-key")
                        .is_some_and(|k| Uuid::parse_str(k).is_ok())
            },
            201,
            r#"{"id":"cs_1","url":"https://pay.example/cs_1","status":"open","expires_at":"2026-05-01T00:00:00Z"}"#,
        );
        let session = client
            .payments()
            .create_checkout_session(&CreateCheckoutRequest::new("price_pro", "https://app/ok", "https://app/no"))
            .unwrap();
        assert_eq!(session.status, CheckoutStatus::Open);
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let client = client_without_calls();
        let req = CreateCheckoutRequest::new("price_pro", "https://app/ok", "https://app/no").with_quantity(0);
        assert!(matches!(
            client.payments().create_checkout_session(&req),
            Err(ApiError::InvalidRequest(_))
        ));
    }

    #[test]
    fn payment_required_maps_to_variant() {
        let client = client_returning(|_| true, 402, r#"{"error":{"code":"card_declined","message":"declined"}}"#);
        assert!(matches!(client.payments().get_balance(), Err(ApiError::PaymentRequired(_))));
    }
}
