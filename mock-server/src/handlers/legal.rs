//! Case law, statutes and citation checks over a small fixed corpus.

use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{object, required_array, required_str, single_page, words, ApiResult, JsonBody};
use crate::error::MockError;

pub(crate) fn cases() -> Vec<Value> {
    vec![
        json!({
            "id": "case_1", "name": "Hadley v. Baxendale", "citation": "9 Ex. 341",
            "court": "Court of Exchequer", "jurisdiction": "uk", "decided_on": "1854-02-23",
            "snippet": "damages for breach of contract limited to foreseeable loss",
            "judges": ["Alderson B"], "cited_by_count": 5120, "treatment": "good_law",
        }),
        json!({
            "id": "case_2", "name": "Carlill v. Carbolic Smoke Ball Co", "citation": "[1893] 1 QB 256",
            "court": "Court of Appeal", "jurisdiction": "uk", "decided_on": "1892-12-07",
            "snippet": "unilateral contract formed by performance of an advertised offer",
            "judges": ["Lindley LJ", "Bowen LJ", "AL Smith LJ"], "cited_by_count": 2310, "treatment": "good_law",
        }),
        json!({
            "id": "case_3", "name": "Plessy v. Ferguson", "citation": "163 U.S. 537",
            "court": "Supreme Court", "jurisdiction": "us", "decided_on": "1896-05-18",
            "snippet": "separate but equal doctrine",
            "judges": ["Brown J"], "cited_by_count": 4020, "treatment": "overruled",
        }),
    ]
}

pub(crate) fn statutes() -> Vec<Value> {
    vec![
        json!({
            "id": "st_1", "title": "Sale of Goods Act 1979", "code": "c. 54", "section": "14",
            "jurisdiction": "uk", "text": "goods supplied under a contract of sale are of satisfactory quality",
        }),
        json!({
            "id": "st_2", "title": "Uniform Commercial Code", "code": "UCC", "section": "2-207",
            "jurisdiction": "us", "text": "additional terms in acceptance or confirmation of a contract",
        }),
    ]
}

fn summary(case: &Value) -> Value {
    json!({
        "id": case["id"], "name": case["name"], "citation": case["citation"],
        "court": case["court"], "jurisdiction": case["jurisdiction"],
        "decided_on": case["decided_on"], "snippet": case["snippet"], "relevance": 1.0,
    })
}

fn mentions_any(terms: &[String], text: &str) -> bool {
    let haystack = words(text);
    terms.iter().any(|t| haystack.contains(t))
}

pub async fn search_cases(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let terms = words(required_str(&body, "query")?);
    let jurisdiction = body["jurisdiction"].as_str();
    let limit = body["limit"].as_u64().unwrap_or(20) as usize;

    let hits: Vec<Value> = cases()
        .iter()
        .filter(|c| jurisdiction.is_none_or(|j| c["jurisdiction"] == j))
        .filter(|c| mentions_any(&terms, &format!("{} {}", c["name"], c["snippet"])))
        .take(limit)
        .map(summary)
        .collect();
    Ok(single_page(hits))
}

pub async fn get_case(Path(id): Path<String>) -> ApiResult {
    let case = cases()
        .into_iter()
        .find(|c| c["id"] == id.as_str())
        .ok_or_else(|| MockError::not_found("case", &id))?;
    Ok(Json(json!({
        "id": case["id"], "name": case["name"], "citation": case["citation"],
        "court": case["court"], "jurisdiction": case["jurisdiction"],
        "decided_on": case["decided_on"], "judges": case["judges"],
        "opinion_text": format!("Opinion in {}.", case["name"].as_str().unwrap_or_default()),
        "cited_by_count": case["cited_by_count"],
    })))
}

#[derive(Debug, Deserialize)]
pub struct StatuteParams {
    q: Option<String>,
    jurisdiction: Option<String>,
    limit: Option<usize>,
}

pub async fn search_statutes(Query(params): Query<StatuteParams>) -> ApiResult {
    let q = params
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| MockError::BadRequest("query parameter `q` is required".into()))?;
    let terms = words(&q);
    let hits: Vec<Value> = statutes()
        .into_iter()
        .filter(|s| params.jurisdiction.as_deref().is_none_or(|j| s["jurisdiction"] == j))
        .filter(|s| mentions_any(&terms, &format!("{} {}", s["title"], s["text"])))
        .take(params.limit.unwrap_or(20))
        .collect();
    Ok(single_page(hits))
}

pub async fn verify_citations(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let corpus = cases();
    let results: Vec<Value> = required_array(&body, "citations")?
        .iter()
        .map(|citation| {
            let text = citation.as_str().unwrap_or_default();
            match corpus.iter().find(|c| c["citation"] == text) {
                Some(case) => json!({
                    "citation": text, "valid": true,
                    "treatment": case["treatment"], "case_id": case["id"],
                }),
                None => json!({ "citation": text, "valid": false, "treatment": "unknown", "case_id": null }),
            }
        })
        .collect();
    Ok(Json(json!({ "results": results })))
}
