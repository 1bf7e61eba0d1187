//! Format conversion, OCR, privilege screening and voice.

use axum::Json;
use serde_json::{json, Value};

use super::{decoded_len, object, required_array, required_str, single_page, ApiResult, JsonBody};
use crate::error::MockError;
use crate::store::new_id;

const FORMATS: [&str; 6] = ["pdf", "docx", "html", "markdown", "txt", "rtf"];
const AUDIO_FORMATS: [&str; 5] = ["wav", "mp3", "ogg", "flac", "webm"];
const PRIVILEGE_MARKERS: [(&str, &str); 3] = [
    ("attorney", "attorney_client"),
    ("counsel", "attorney_client"),
    ("work product", "work_product"),
];

fn known<'a>(body: &'a Value, field: &str, allowed: &[&str]) -> Result<&'a str, MockError> {
    let value = required_str(body, field)?;
    if allowed.contains(&value) {
        Ok(value)
    } else {
        Err(MockError::Unprocessable(format!("unsupported {field} `{value}`")))
    }
}

pub async fn list_formats() -> Json<Value> {
    let data = FORMATS
        .iter()
        .map(|source| {
            let targets: Vec<&str> = FORMATS.iter().copied().filter(|t| t != source).collect();
            json!({"source": source, "targets": targets})
        })
        .collect();
    single_page(data)
}

pub async fn convert(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let content = required_str(&body, "content")?;
    let source = known(&body, "source_format", &FORMATS)?;
    let target = known(&body, "target_format", &FORMATS)?;
    if source == target {
        return Err(MockError::Unprocessable("source and target formats are the same".into()));
    }
    Ok(Json(json!({
        "content": content,
        "format": target,
        "page_count": 1,
        "size_bytes": decoded_len(content),
    })))
}

pub async fn extract_text(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    if body["document"].is_string() == body["document_url"].is_string() {
        return Err(MockError::Unprocessable(
            "exactly one of `document` and `document_url` is required".into(),
        ));
    }
    let language = body["languages"][0].as_str().unwrap_or("en");
    Ok(Json(json!({
        "id": new_id("ocr"),
        "pages": [{"number": 1, "text": "Recognised text", "confidence": 0.95}],
        "language": language,
    })))
}

fn assess(text: &str) -> Value {
    let lower = text.to_lowercase();
    let mut types: Vec<&str> = Vec::new();
    let mut spans = Vec::new();
    for (marker, kind) in PRIVILEGE_MARKERS {
        for (start, _) in lower.match_indices(marker) {
            spans.push(json!({"start": start, "end": start + marker.len(), "label": kind}));
            if !types.contains(&kind) {
                types.push(kind);
            }
        }
    }
    let privileged = !types.is_empty();
    let (confidence, rationale) = if privileged {
        (0.9, "mentions legal counsel")
    } else {
        (0.75, "no privilege markers")
    };
    json!({
        "privileged": privileged,
        "privilege_types": types,
        "confidence": confidence,
        "rationale": rationale,
        "flagged_spans": spans,
    })
}

pub async fn detect_privilege(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    Ok(Json(assess(required_str(&body, "text")?)))
}

pub async fn detect_privilege_batch(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let results = required_array(&body, "documents")?
        .iter()
        .map(|doc| required_str(doc, "text").map(assess))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(json!({ "results": results })))
}

pub async fn transcribe(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    required_str(&body, "audio")?;
    known(&body, "format", &AUDIO_FORMATS)?;
    let speaker = body["diarize"].as_bool().unwrap_or(false).then_some("A");
    Ok(Json(json!({
        "id": new_id("tr"),
        "text": "Transcribed audio.",
        "language": body["language"].as_str().unwrap_or("en"),
        "duration_seconds": 1.5,
        "segments": [{"start": 0.0, "end": 1.5, "text": "Transcribed audio.", "speaker": speaker}],
    })))
}

pub async fn synthesize(payload: JsonBody) -> ApiResult {
    let body = object(payload)?;
    let text = required_str(&body, "text")?;
    required_str(&body, "voice")?;
    let format = known(&body, "format", &AUDIO_FORMATS)?;
    let speed = body["speed"].as_f64().unwrap_or(1.0);
    let duration = text.split_whitespace().count() as f64 * 0.4 / speed;
    Ok(Json(json!({
        "audio": "UklGRiQAAABXQVZF",
        "format": format,
        "duration_seconds": duration,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counsel_is_flagged() {
        let result = assess("Advice from Counsel attached");
        assert_eq!(result["privileged"], true);
        assert_eq!(result["flagged_spans"][0]["start"], 12);
        assert_eq!(result["privilege_types"], json!(["attorney_client"]));
    }
}
