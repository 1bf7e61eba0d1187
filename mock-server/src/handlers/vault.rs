use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use super::{created, decoded_len, now, object, required_str, ApiResult, JsonBody, StatusResult};
use crate::error::MockError;
use crate::store::{new_id, paginate, Db, PageParams, Store};

/// Object rows keep their content alongside the metadata; strip it for
/// metadata-only responses.
fn metadata(object: &Value) -> Value {
    let mut object = object.clone();
    if let Some(map) = object.as_object_mut() {
        map.remove("content");
    }
    object
}

fn adjust_object_count(store: &mut Store, vault_id: &str, delta: i64) {
    if let Some(vault) = store.vaults.get_mut(vault_id) {
        let count = vault["object_count"].as_i64().unwrap_or_default() + delta;
        vault["object_count"] = Value::from(count.max(0));
    }
}

pub async fn create_vault(State(db): State<Db>, payload: JsonBody) -> StatusResult {
    let body = object(payload)?;
    let vault = json!({
        "id": new_id("vlt"),
        "name": required_str(&body, "name")?,
        "description": body["description"],
        "object_count": 0,
        "created_at": now(),
    });
    let vault = db.write().await.vaults.insert(vault);
    created(vault)
}

pub async fn list_vaults(State(db): State<Db>, Query(params): Query<PageParams>) -> ApiResult {
    let store = db.read().await;
    Ok(Json(paginate(store.vaults.iter(), &params)?))
}

pub async fn get_vault(State(db): State<Db>, Path(id): Path<String>) -> ApiResult {
    let store = db.read().await;
    store
        .vaults
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| MockError::not_found("vault", id))
}

pub async fn delete_vault(State(db): State<Db>, Path(id): Path<String>) -> Result<StatusCode, MockError> {
    let mut store = db.write().await;
    store.vaults.remove(&id).ok_or_else(|| MockError::not_found("vault", &id))?;
    store.objects.remove_where("vault_id", &id);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_object(State(db): State<Db>, Path(vault_id): Path<String>, payload: JsonBody) -> StatusResult {
    let body = object(payload)?;
    let key = required_str(&body, "key")?;
    let content_type = required_str(&body, "content_type")?;
    let content = body["content"]
        .as_str()
        .ok_or_else(|| MockError::Unprocessable("`content` is required".into()))?;

    let mut store = db.write().await;
    if store.vaults.get(&vault_id).is_none() {
        return Err(MockError::not_found("vault", vault_id));
    }
    let duplicate = store
        .objects
        .iter()
        .any(|o| o["vault_id"] == vault_id.as_str() && o["key"] == key);
    if duplicate {
        return Err(MockError::Conflict(format!("key {key} already exists in vault {vault_id}")));
    }

    let object = json!({
        "id": new_id("obj"),
        "vault_id": vault_id,
        "key": key,
        "content_type": content_type,
        "size_bytes": decoded_len(content),
        "checksum_sha256": body["checksum_sha256"],
        "created_at": now(),
        "content": content,
    });
    let stored = store.objects.insert(object);
    adjust_object_count(&mut store, &vault_id, 1);
    created(metadata(&stored))
}

pub async fn list_objects(
    State(db): State<Db>,
    Path(vault_id): Path<String>,
    Query(params): Query<PageParams>,
) -> ApiResult {
    let store = db.read().await;
    if store.vaults.get(&vault_id).is_none() {
        return Err(MockError::not_found("vault", vault_id));
    }
    let rows = store.objects.iter().filter(|o| o["vault_id"] == vault_id.as_str());
    let mut page = paginate(rows, &params)?;
    if let Some(data) = page["data"].as_array_mut() {
        data.iter_mut().for_each(|o| *o = metadata(o));
    }
    Ok(Json(page))
}

fn find_object<'a>(store: &'a Store, vault_id: &str, object_id: &str) -> Result<&'a Value, MockError> {
    store
        .objects
        .get(object_id)
        .filter(|o| o["vault_id"] == vault_id)
        .ok_or_else(|| MockError::not_found("object", object_id))
}

pub async fn download_object(
    State(db): State<Db>,
    Path((vault_id, object_id)): Path<(String, String)>,
) -> ApiResult {
    let store = db.read().await;
    let object = find_object(&store, &vault_id, &object_id)?;
    Ok(Json(json!({ "object": metadata(object), "content": object["content"] })))
}

pub async fn delete_object(
    State(db): State<Db>,
    Path((vault_id, object_id)): Path<(String, String)>,
) -> Result<StatusCode, MockError> {
    let mut store = db.write().await;
    find_object(&store, &vault_id, &object_id)?;
    store.objects.remove(&object_id);
    adjust_object_count(&mut store, &vault_id, -1);
    Ok(StatusCode::NO_CONTENT)
}
