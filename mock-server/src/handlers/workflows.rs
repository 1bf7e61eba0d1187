use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::{accepted, created, now, object, or_default, required_array, required_str, ApiResult, JsonBody, StatusResult};
use crate::error::MockError;
use crate::store::{new_id, paginate, Db, PageParams};

pub async fn create_workflow(State(db): State<Db>, payload: JsonBody) -> StatusResult {
    let body = object(payload)?;
    let name = required_str(&body, "name")?;
    let steps = required_array(&body, "steps")?
        .iter()
        .map(|step| {
            Ok(json!({
                "name": required_str(step, "name")?,
                "kind": required_str(step, "kind")?,
                "config": step["config"],
            }))
        })
        .collect::<Result<Vec<Value>, MockError>>()?;
    let workflow = json!({
        "id": new_id("wf"),
        "name": name,
        "steps": steps,
        "created_at": now(),
    });
    let workflow = db.write().await.workflows.insert(workflow);
    created(workflow)
}

pub async fn list_workflows(State(db): State<Db>, Query(params): Query<PageParams>) -> ApiResult {
    let store = db.read().await;
    Ok(Json(paginate(store.workflows.iter(), &params)?))
}

pub async fn get_workflow(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let store = db.read().await;
    store
        .workflows
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("workflow", id))
}

pub async fn delete_workflow(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, MockError> {
    let mut store = db.write().await;
    store
        .workflows
        .remove(&id)
        .ok_or_else(|| MockError::not_found("workflow", &id))?;
    store.executions.remove_where("workflow_id", &id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn execute_workflow(State(db): State<Db>, Path(id): Path<String>, payload: JsonBody) -> StatusResult {
    let body = object(payload)?;
    let mut store = db.write().await;
    if store.workflows.get(&id).is_none() {
        return Err(MockError::not_found("workflow", id));
    }
    let execution = json!({
        "id": new_id("ex"),
        "workflow_id": id,
        "status": "pending",
        "input": or_default(&body, "input", json!({})),
        "output": null,
        "error": null,
        "started_at": now(),
        "finished_at": null,
    });
    accepted(store.executions.insert(execution))
}

/// Executions finish the first time they are polled.
pub async fn get_execution(
    State(db): State<Db>,
    Path((workflow_id, execution_id)): Path<(String, String)>,
) -> ApiResult {
    let mut store = db.write().await;
    let steps = store
        .workflows
        .get(&workflow_id)
        .and_then(|w| w["steps"].as_array())
        .map_or(0, Vec::len);
    let execution = store
        .executions
        .get_mut(&execution_id)
        .filter(|e| e["workflow_id"] == workflow_id.as_str())
        .ok_or_else(|| MockError::not_found("execution", &execution_id))?;
    if execution["status"] == "pending" {
        execution["status"] = Value::from("succeeded");
        execution["output"] = json!({ "steps_completed": steps });
        execution["finished_at"] = Value::from(now());
    }
    Ok(Json(execution.clone()))
}
