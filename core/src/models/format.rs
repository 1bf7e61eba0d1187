use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr, strum::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Html,
    Markdown,
    Txt,
    Rtf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PageSize {
    A4,
    Letter,
    Legal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_formatting: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
}

optional_setters!(ConversionOptions {
    with_preserve_formatting => preserve_formatting: bool,
    with_page_size => page_size: PageSize,
});

/// Document to convert; `content` is base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub content: String,
    pub source_format: DocumentFormat,
    pub target_format: DocumentFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ConversionOptions>,
}

impl ConvertRequest {
    pub fn new(content: impl Into<String>, source_format: DocumentFormat, target_format: DocumentFormat) -> Self {
        Self {
            content: content.into(),
            source_format,
            target_format,
            options: None,
        }
    }

    /// Base64-encode raw document bytes.
    pub fn from_bytes(bytes: &[u8], source_format: DocumentFormat, target_format: DocumentFormat) -> Self {
        Self::new(STANDARD.encode(bytes), source_format, target_format)
    }
}

optional_setters!(ConvertRequest {
    with_options => options: ConversionOptions,
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    pub content: String,
    pub format: DocumentFormat,
    #[serde(default)]
    pub page_count: Option<u32>,
    pub size_bytes: u64,
}

impl ConversionResult {
    pub fn decode_content(&self) -> Result<Vec<u8>, ApiError> {
        STANDARD
            .decode(&self.content)
            .map_err(|e| ApiError::Deserialization(format!("converted content is not base64: {e}")))
    }
}

/// Targets reachable from one source format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatSupport {
    pub source: DocumentFormat,
    pub targets: Vec<DocumentFormat>,
}
