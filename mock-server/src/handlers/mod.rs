//! Route handlers, one module per API area.
//!
//! Handlers work on `serde_json::Value` rather than typed DTOs so the mock
//! stays independent of the client crate.

pub mod agents;
pub mod compute;
pub mod data;
pub mod documents;
pub mod legal;
pub mod llm;
pub mod memory;
pub mod payments;
pub mod vault;
pub mod webhooks;
pub mod workflows;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::error::MockError;

pub type JsonBody = Result<Json<Value>, JsonRejection>;
pub type ApiResult = Result<Json<Value>, MockError>;
pub type StatusResult = Result<(StatusCode, Json<Value>), MockError>;

/// Unwrap a JSON body, rejecting anything but an object.
pub fn object(payload: JsonBody) -> Result<Value, MockError> {
    let Json(body) = payload?;
    if !body.is_object() {
        return Err(MockError::Unprocessable("body must be a JSON object".into()));
    }
    Ok(body)
}

/// A string field that must be present and non-blank.
pub fn required_str<'a>(body: &'a Value, field: &str) -> Result<&'a str, MockError> {
    body[field]
        .as_str()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| MockError::Unprocessable(format!("`{field}` is required")))
}

/// An array field that must be present and non-empty.
pub fn required_array<'a>(body: &'a Value, field: &str) -> Result<&'a Vec<Value>, MockError> {
    body[field]
        .as_array()
        .filter(|a| !a.is_empty())
        .ok_or_else(|| MockError::Unprocessable(format!("`{field}` must be a non-empty array")))
}

/// The field's value, or `default` when absent or null.
pub fn or_default(body: &Value, field: &str, default: Value) -> Value {
    match &body[field] {
        Value::Null => default,
        value => value.clone(),
    }
}

/// Decoded length of a base64 string.
pub fn decoded_len(encoded: &str) -> usize {
    let padding = encoded.bytes().rev().take_while(|b| *b == b'=').count();
    (encoded.len() / 4 * 3).saturating_sub(padding)
}

pub fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub fn created(value: Value) -> StatusResult {
    Ok((StatusCode::CREATED, Json(value)))
}

pub fn accepted(value: Value) -> StatusResult {
    Ok((StatusCode::ACCEPTED, Json(value)))
}

/// A single, final page.
pub fn single_page(data: Vec<Value>) -> Json<Value> {
    Json(json!({ "data": data, "next_cursor": null }))
}

/// Lower-cased words of `text`, for the naive matching the mock does.
pub fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
