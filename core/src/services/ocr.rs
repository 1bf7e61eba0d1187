use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::ocr::{OcrRequest, OcrResult};

/// Optical character recognition.
pub trait OcrApi {
    fn extract_text(&self, input: &OcrRequest) -> Result<OcrResult, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct OcrService<'a> {
    client: &'a ApiClient,
}

impl<'a> OcrService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl OcrApi for OcrService<'_> {
    fn extract_text(&self, input: &OcrRequest) -> Result<OcrResult, ApiError> {
        input.validate()?;
        self.client
            .send_json(HttpMethod::Post, &["v1", "ocr", "extract"], input, 200)
    }
}
