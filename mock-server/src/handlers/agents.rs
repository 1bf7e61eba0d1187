use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::{accepted, created, now, object, or_default, required_str, ApiResult, JsonBody, StatusResult};
use crate::error::MockError;
use crate::store::{new_id, paginate, Db, PageParams};

pub async fn list_agents(State(db): State<Db>, Query(params): Query<PageParams>) -> ApiResult {
    let store = db.read().await;
    Ok(Json(paginate(store.agents.iter(), &params)?))
}

pub async fn create_agent(State(db): State<Db>, payload: JsonBody) -> StatusResult {
    let body = object(payload)?;
    let agent = json!({
        "id": new_id("ag"),
        "name": required_str(&body, "name")?,
        "model": required_str(&body, "model")?,
        "instructions": body["instructions"],
        "tools": or_default(&body, "tools", json!([])),
        "status": "active",
        "created_at": now(),
    });
    let agent = db.write().await.agents.insert(agent);
    created(agent)
}

pub async fn get_agent(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let store = db.read().await;
    store
        .agents
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("agent", id))
}

pub async fn delete_agent(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, MockError> {
    let mut store = db.write().await;
    store.agents.remove(&id).ok_or_else(|| MockError::not_found("agent", &id))?;
    store.runs.remove_where("agent_id", &id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn run_agent(State(db): State<Db>, Path(id): Path<String>, payload: JsonBody) -> StatusResult {
    let body = object(payload)?;
    let input = required_str(&body, "input")?;
    let mut store = db.write().await;
    if store.agents.get(&id).is_none() {
        return Err(MockError::not_found("agent", id));
    }
    let run = json!({
        "id": new_id("run"),
        "agent_id": id,
        "status": "queued",
        "input": input,
        "output": null,
        "created_at": now(),
    });
    accepted(store.runs.insert(run))
}

/// Runs complete the first time they are polled.
pub async fn get_run(State(db): State<Db>, Path((agent_id, run_id)): Path<(String, String)>) -> ApiResult {
    let mut store = db.write().await;
    let run = store
        .runs
        .get_mut(&run_id)
        .filter(|r| r["agent_id"] == agent_id.as_str())
        .ok_or_else(|| MockError::not_found("run", &run_id))?;
    if run["status"] == "queued" {
        let output = format!("Processed: {}", run["input"].as_str().unwrap_or_default());
        run["status"] = Value::from("succeeded");
        run["output"] = Value::from(output);
    }
    Ok(Json(run.clone()))
}
