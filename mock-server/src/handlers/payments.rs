use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use tracing::debug;

use super::{created, object, required_str, ApiResult, JsonBody, StatusResult};
use crate::error::MockError;
use crate::store::{new_id, paginate, Db, PageParams};

const IDEMPOTENCY_KEY: &str = "idempotency-key";

/// Creating the same checkout twice with one idempotency key returns the
/// first session.
pub async fn create_checkout(State(db): State<Db>, headers: HeaderMap, payload: JsonBody) -> StatusResult {
    let key = headers
        .get(IDEMPOTENCY_KEY)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| MockError::BadRequest("Idempotency-Key header is required".into()))?
        .to_string();
    let body = object(payload)?;
    required_str(&body, "price_id")?;
    required_str(&body, "success_url")?;
    required_str(&body, "cancel_url")?;
    if body["quantity"].as_u64() == Some(0) {
        return Err(MockError::Unprocessable("`quantity` must be at least 1".into()));
    }

    let mut store = db.write().await;
    if let Some(existing) = store.checkouts.get(&key) {
        debug!(idempotency_key = %key, "replaying checkout session");
        return created(existing.clone());
    }
    let id = new_id("cs");
    let expires_at = (Utc::now() + Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Secs, true);
    let session = json!({
        "id": id,
        "url": format!("https://pay.lexapi.test/{id}"),
        "status": "open",
        "expires_at": expires_at,
    });
    store.checkouts.insert(key, session.clone());
    created(session)
}

pub async fn get_balance() -> Json<Value> {
    Json(json!({"available": 125_000, "pending": 5_000, "currency": "usd"}))
}

pub async fn list_transactions(State(db): State<Db>, Query(params): Query<PageParams>) -> ApiResult {
    let store = db.read().await;
    Ok(Json(paginate(store.transactions.iter(), &params)?))
}
