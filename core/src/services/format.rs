use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::format::{ConversionResult, ConvertRequest, FormatSupport};
use crate::models::Page;

/// Document format conversion.
pub trait FormatApi {
    fn convert(&self, input: &ConvertRequest) -> Result<ConversionResult, ApiError>;

    fn list_formats(&self) -> Result<Page<FormatSupport>, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct FormatService<'a> {
    client: &'a ApiClient,
}

impl<'a> FormatService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl FormatApi for FormatService<'_> {
    fn convert(&self, input: &ConvertRequest) -> Result<ConversionResult, ApiError> {
        self.client
            .send_json(HttpMethod::Post, &["v1", "format", "convert"], input, 200)
    }

    fn list_formats(&self) -> Result<Page<FormatSupport>, ApiError> {
        self.client.get(&["v1", "format", "formats"], &[])
    }
}
