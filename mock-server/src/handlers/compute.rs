use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{created, now, object, or_default, required_str, ApiResult, JsonBody, StatusResult};
use crate::error::MockError;
use crate::store::{new_id, paginate, Db, PageParams};

const FINISHED: [&str; 3] = ["completed", "failed", "cancelled"];

#[derive(Debug, Deserialize)]
pub struct JobListParams {
    limit: Option<usize>,
    cursor: Option<String>,
    status: Option<String>,
}

pub async fn submit_job(State(db): State<Db>, payload: JsonBody) -> StatusResult {
    let body = object(payload)?;
    let job = json!({
        "id": new_id("job"),
        "image": required_str(&body, "image")?,
        "command": or_default(&body, "command", json!([])),
        "status": "pending",
        "resources": or_default(&body, "resources", json!({"cpu": 1.0, "memory_mb": 1024})),
        "exit_code": null,
        "created_at": now(),
    });
    let job = db.write().await.jobs.insert(job);
    created(job)
}

pub async fn get_job(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let store = db.read().await;
    store
        .jobs
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("job", id))
}

pub async fn list_jobs(State(db): State<Db>, Query(params): Query<JobListParams>) -> ApiResult {
    let store = db.read().await;
    let status = params.status.as_deref();
    let rows = store
        .jobs
        .iter()
        .filter(|job| status.is_none_or(|s| job["status"] == s));
    let page = PageParams {
        limit: params.limit,
        cursor: params.cursor,
    };
    Ok(Json(paginate(rows, &page)?))
}

pub async fn cancel_job(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let mut store = db.write().await;
    let job = store
        .jobs
        .get_mut(&id)
        .ok_or_else(|| MockError::not_found("job", &id))?;
    let status = job["status"].as_str().unwrap_or_default();
    if FINISHED.contains(&status) {
        return Err(MockError::Conflict(format!("job {id} is already {status}")));
    }
    job["status"] = Value::from("cancelled");
    Ok(Json(job.clone()))
}
