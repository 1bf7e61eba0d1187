use axum::Json;
use serde_json::{json, Value};

use super::{object, required_array, required_str, single_page, ApiResult, JsonBody};
use crate::error::MockError;
use crate::store::new_id;

const EMBEDDING_DIMENSIONS: usize = 8;

fn models() -> Vec<Value> {
    vec![
        json!({"id": "gpt-4o", "provider": "openai", "context_window": 128000, "supports_embeddings": false}),
        json!({"id": "claude-sonnet", "provider": "anthropic", "context_window": 200000, "supports_embeddings": false}),
        json!({"id": "text-embedding-3-small", "provider": "openai", "context_window": 8191, "supports_embeddings": true}),
    ]
}

fn find_model(id: &str) -> Result<Value, MockError> {
    models()
        .into_iter()
        .find(|m| m["id"] == id)
        .ok_or_else(|| MockError::not_found("model", id))
}

fn token_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub async fn list_models() -> Json<Value> {
    single_page(models())
}

pub async fn chat_completion(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let model = find_model(required_str(&body, "model")?)?;
    let messages = required_array(&body, "messages")?;

    let prompt_tokens: usize = messages
        .iter()
        .map(|m| token_count(m["content"].as_str().unwrap_or_default()))
        .sum();
    let last_user = messages
        .iter()
        .rev()
        .find(|m| m["role"] == "user")
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default();
    let reply = format!("Echo: {last_user}");
    let completion_tokens = token_count(&reply);

    Ok(Json(json!({
        "id": new_id("cmpl"),
        "model": model["id"],
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": reply},
            "finish_reason": "stop",
        }],
        "usage": {
            "prompt_tokens": prompt_tokens,
            "completion_tokens": completion_tokens,
            "total_tokens": prompt_tokens + completion_tokens,
        },
    })))
}

/// Deterministic pseudo-embedding derived from the input bytes.
fn embed(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0f32; EMBEDDING_DIMENSIONS];
    for (i, byte) in text.bytes().enumerate() {
        vector[i % EMBEDDING_DIMENSIONS] += f32::from(byte) / 255.0;
    }
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
    vector
}

pub async fn create_embeddings(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let model = find_model(required_str(&body, "model")?)?;
    if model["supports_embeddings"] != true {
        return Err(MockError::Unprocessable(format!("model {} does not produce embeddings", model["id"])));
    }
    let inputs = required_array(&body, "input")?;
    let data: Vec<Value> = inputs
        .iter()
        .enumerate()
        .map(|(index, text)| json!({"index": index, "embedding": embed(text.as_str().unwrap_or_default())}))
        .collect();
    let tokens: usize = inputs
        .iter()
        .map(|t| token_count(t.as_str().unwrap_or_default()))
        .sum();
    Ok(Json(json!({
        "model": model["id"],
        "data": data,
        "usage": {"prompt_tokens": tokens, "completion_tokens": 0, "total_tokens": tokens},
    })))
}
