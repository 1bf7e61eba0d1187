use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OcrOutput {
    Text,
    Hocr,
    Json,
}

/// Document to recognise, either inline (base64) or by URL. Exactly one of
/// `document` and `document_url` must be set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_url: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OcrOutput>,
}

impl OcrRequest {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            document: Some(STANDARD.encode(bytes)),
            document_url: None,
            languages: Vec::new(),
            output: None,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            document: None,
            document_url: Some(url.into()),
            languages: Vec::new(),
            output: None,
        }
    }

    /// ISO 639 language hint; may be given more than once.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.push(language.into());
        self
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        match (&self.document, &self.document_url) {
            (Some(_), None) | (None, Some(_)) => Ok(()),
            (Some(_), Some(_)) => Err(ApiError::InvalidRequest(
                "OCR request must not set both document and document_url".into(),
            )),
            (None, None) => Err(ApiError::InvalidRequest(
                "OCR request needs a document or a document_url".into(),
            )),
        }
    }
}

optional_setters!(OcrRequest {
    with_output => output: OcrOutput,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    pub number: u32,
    pub text: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    pub id: String,
    pub pages: Vec<OcrPage>,
    #[serde(default)]
    pub language: Option<String>,
}

impl OcrResult {
    /// Page texts joined with form feeds.
    pub fn full_text(&self) -> String {
        self.pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\u{c}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_source_is_required() {
        assert!(OcrRequest::from_bytes(b"%PDF").validate().is_ok());
        assert!(OcrRequest::from_url("https://files.example/scan.pdf").validate().is_ok());

        let mut both = OcrRequest::from_bytes(b"%PDF");
        both.document_url = Some("https://files.example/scan.pdf".into());
        assert!(matches!(both.validate(), Err(ApiError::InvalidRequest(_))));

        let mut neither = OcrRequest::from_url("x");
        neither.document_url = None;
        assert!(matches!(neither.validate(), Err(ApiError::InvalidRequest(_))));
    }

    #[test]
    fn full_text_joins_pages() {
        let result = OcrResult {
            id: "ocr_1".into(),
            pages: vec![
                OcrPage { number: 1, text: "AGREEMENT".into(), confidence: 0.98 },
                OcrPage { number: 2, text: "Signatures".into(), confidence: 0.91 },
            ],
            language: Some("en".into()),
        };
        assert_eq!(result.full_text(), "AGREEMENT\u{c}Signatures");
    }
}
