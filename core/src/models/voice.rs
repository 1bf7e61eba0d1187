use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AudioFormat {
    Wav,
    Mp3,
    Ogg,
    Flac,
    Webm,
}

/// Audio to transcribe; `audio` is base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionRequest {
    pub audio: String,
    pub format: AudioFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diarize: Option<bool>,
}

impl TranscriptionRequest {
    pub fn from_bytes(bytes: &[u8], format: AudioFormat) -> Self {
        Self {
            audio: STANDARD.encode(bytes),
            format,
            language: None,
            diarize: None,
        }
    }
}

optional_setters!(TranscriptionRequest {
    with_language => language: String,
    with_diarize => diarize: bool,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
    #[serde(default)]
    pub speaker: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
    pub duration_seconds: f64,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: String,
    pub format: AudioFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, voice: impl Into<String>, format: AudioFormat) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
            format,
            speed: None,
        }
    }
}

optional_setters!(SpeechRequest {
    with_speed => speed: f32,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechResult {
    pub audio: String,
    pub format: AudioFormat,
    pub duration_seconds: f64,
}

impl SpeechResult {
    pub fn decode_audio(&self) -> Result<Vec<u8>, ApiError> {
        STANDARD
            .decode(&self.audio)
            .map_err(|e| ApiError::Deserialization(format!("speech audio is not base64: {e}")))
    }
}
