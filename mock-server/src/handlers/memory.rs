use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::{created, now, object, or_default, required_str, words, ApiResult, JsonBody, StatusResult};
use crate::error::MockError;
use crate::store::{new_id, Db};

const DEFAULT_TOP_K: usize = 5;

pub async fn store_memory(State(db): State<Db>, payload: JsonBody) -> StatusResult {
    let body = object(payload)?;
    let record = json!({
        "id": new_id("mem"),
        "namespace": required_str(&body, "namespace")?,
        "content": required_str(&body, "content")?,
        "metadata": or_default(&body, "metadata", json!({})),
        "created_at": now(),
    });
    let record = db.write().await.memories.insert(record);
    created(record)
}

pub async fn get_memory(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let store = db.read().await;
    store
        .memories
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("memory", id))
}

pub async fn search_memory(State(db): State<Db>, payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let namespace = required_str(&body, "namespace")?;
    let terms = words(required_str(&body, "query")?);
    let top_k = match body["top_k"].as_u64() {
        Some(0) => return Err(MockError::Unprocessable("`top_k` must be at least 1".into())),
        Some(k) => k as usize,
        None => DEFAULT_TOP_K,
    };

    let store = db.read().await;
    let mut matches: Vec<(f64, &Value)> = store
        .memories
        .iter()
        .filter(|m| m["namespace"] == namespace)
        .filter_map(|m| {
            let content = words(m["content"].as_str().unwrap_or_default());
            let found = terms.iter().filter(|t| content.contains(t)).count();
            (found > 0).then(|| (found as f64 / terms.len() as f64, m))
        })
        .collect();
    matches.sort_by(|a, b| b.0.total_cmp(&a.0));
    matches.truncate(top_k);

    let matches: Vec<Value> = matches
        .into_iter()
        .map(|(score, record)| json!({"score": score, "record": record}))
        .collect();
    Ok(Json(json!({ "matches": matches })))
}

pub async fn delete_memory(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, MockError> {
    let removed = db.write().await.memories.remove(&id);
    removed
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| MockError::not_found("memory", id))
}
