use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::{created, now, object, required_array, required_str, ApiResult, JsonBody, StatusResult};
use crate::error::MockError;
use crate::store::{new_id, paginate, Db, PageParams};

/// Secrets are shown once, at creation.
fn public(webhook: &Value) -> Value {
    let mut webhook = webhook.clone();
    if let Some(map) = webhook.as_object_mut() {
        map.remove("secret");
    }
    webhook
}

fn check_url(url: &str) -> Result<(), MockError> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(MockError::Unprocessable(format!("`url` must be http(s), got {url}")))
    }
}

pub async fn create_webhook(State(db): State<Db>, payload: JsonBody) -> StatusResult {
    let body = object(payload)?;
    let url = required_str(&body, "url")?;
    check_url(url)?;
    let events = required_array(&body, "events")?;

    let mut store = db.write().await;
    if store.webhooks.iter().any(|w| w["url"] == url) {
        return Err(MockError::Conflict(format!("a webhook for {url} already exists")));
    }
    let webhook = json!({
        "id": new_id("wh"),
        "url": url,
        "events": events,
        "active": true,
        "description": body["description"],
        "secret": new_id("whsec"),
        "created_at": now(),
    });
    created(store.webhooks.insert(webhook))
}

pub async fn list_webhooks(State(db): State<Db>, Query(params): Query<PageParams>) -> ApiResult {
    let store = db.read().await;
    let mut page = paginate(store.webhooks.iter(), &params)?;
    if let Some(data) = page["data"].as_array_mut() {
        data.iter_mut().for_each(|w| *w = public(w));
    }
    Ok(Json(page))
}

pub async fn get_webhook(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let store = db.read().await;
    store
        .webhooks
        .get(&id)
        .map(|w| Json(public(w)))
        .ok_or_else(|| MockError::not_found("webhook", id))
}

pub async fn update_webhook(State(db): State<Db>, Path(id): Path<String>, payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let url = body["url"].as_str();
    if let Some(url) = url {
        check_url(url)?;
    }
    let events = match &body["events"] {
        Value::Null => None,
        Value::Array(events) if !events.is_empty() => Some(events.clone()),
        _ => return Err(MockError::Unprocessable("`events` must be a non-empty array".into())),
    };
    let active = body["active"].as_bool();
    if url.is_none() && events.is_none() && active.is_none() {
        return Err(MockError::Unprocessable("update changes nothing".into()));
    }

    let mut store = db.write().await;
    let webhook = store
        .webhooks
        .get_mut(&id)
        .ok_or_else(|| MockError::not_found("webhook", &id))?;
    if let Some(url) = url {
        webhook["url"] = Value::from(url);
    }
    if let Some(events) = events {
        webhook["events"] = Value::Array(events);
    }
    if let Some(active) = active {
        webhook["active"] = Value::from(active);
    }
    Ok(Json(public(webhook)))
}

pub async fn delete_webhook(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, MockError> {
    let removed = db.write().await.webhooks.remove(&id);
    removed
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| MockError::not_found("webhook", id))
}

/// Inactive webhooks record a failed delivery instead of being called.
pub async fn test_webhook(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let store = db.read().await;
    let webhook = store
        .webhooks
        .get(&id)
        .ok_or_else(|| MockError::not_found("webhook", &id))?;
    let active = webhook["active"].as_bool().unwrap_or(false);
    let status_code = if active { Value::from(200) } else { Value::Null };
    Ok(Json(json!({
        "id": new_id("dl"),
        "webhook_id": id,
        "event": webhook["events"][0],
        "status_code": status_code,
        "success": active,
        "delivered_at": now(),
    })))
}
