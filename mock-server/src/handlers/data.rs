//! Database queries and federated search.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::legal::{cases, statutes};
use super::{object, required_str, single_page, words, ApiResult, JsonBody};
use crate::error::MockError;
use crate::store::Db;

const DATABASE: &str = "main";

fn matters_columns() -> Value {
    json!([
        {"name": "id", "data_type": "integer"},
        {"name": "title", "data_type": "text"},
        {"name": "status", "data_type": "text"}
    ])
}

fn check_database(name: Option<&str>) -> Result<(), MockError> {
    match name {
        None | Some(DATABASE) => Ok(()),
        Some(other) => Err(MockError::not_found("database", other)),
    }
}

pub async fn execute_query(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let sql = required_str(&body, "sql")?;
    check_database(body["database"].as_str())?;

    let result = if sql.trim_start().to_lowercase().starts_with("select") {
        json!({
            "columns": matters_columns(),
            "rows": [[1, "Acme v. Globex", "open"], [2, "Estate of Doe", "closed"]],
            "row_count": 2,
            "elapsed_ms": 3,
        })
    } else {
        json!({ "columns": [], "rows": [], "row_count": 0, "elapsed_ms": 1 })
    };
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct TablesParams {
    database: Option<String>,
}

pub async fn list_tables(Query(params): Query<TablesParams>) -> ApiResult {
    check_database(params.database.as_deref())?;
    Ok(single_page(vec![
        json!({"name": "matters", "row_count": 2, "columns": matters_columns()}),
        json!({"name": "clients", "row_count": 0}),
    ]))
}

/// Score `text` by the share of query words it contains.
fn score(query: &[String], text: &str) -> f64 {
    let haystack = words(text);
    let found = query.iter().filter(|w| haystack.contains(w)).count();
    found as f64 / query.len().max(1) as f64
}

pub async fn search(State(db): State<Db>, payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let query = required_str(&body, "query")?.to_string();
    let terms = words(&query);
    let wanted: Vec<&str> = body["sources"]
        .as_array()
        .map(|a| a.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let include = |source: &str| wanted.is_empty() || wanted.contains(&source);

    let mut hits = Vec::new();
    if include("cases") {
        for case in cases() {
            let text = format!("{} {}", case["name"], case["snippet"]);
            hits.push(json!({"id": case["id"], "source": "cases", "title": case["name"],
                "snippet": case["snippet"], "score": score(&terms, &text)}));
        }
    }
    if include("statutes") {
        for statute in statutes() {
            let text = format!("{} {}", statute["title"], statute["text"]);
            hits.push(json!({"id": statute["id"], "source": "statutes", "title": statute["title"],
                "snippet": statute["text"], "score": score(&terms, &text)}));
        }
    }
    {
        let store = db.read().await;
        if include("vault") {
            for object in store.objects.iter() {
                let key = object["key"].as_str().unwrap_or_default();
                hits.push(json!({"id": object["id"], "source": "vault", "title": key,
                    "score": score(&terms, key)}));
            }
        }
        if include("memory") {
            for memory in store.memories.iter() {
                let content = memory["content"].as_str().unwrap_or_default();
                hits.push(json!({"id": memory["id"], "source": "memory", "title": memory["namespace"],
                    "snippet": content, "score": score(&terms, content)}));
            }
        }
    }

    hits.retain(|h| h["score"].as_f64().unwrap_or_default() > 0.0);
    hits.sort_by(|a, b| {
        let (a, b) = (a["score"].as_f64().unwrap_or_default(), b["score"].as_f64().unwrap_or_default());
        b.total_cmp(&a)
    });
    let total = hits.len();
    if let Some(limit) = body["limit"].as_u64() {
        hits.truncate(limit as usize);
    }
    Ok(Json(json!({ "query": query, "hits": hits, "total": total })))
}
