use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::models::voice::{SpeechRequest, SpeechResult, Transcription, TranscriptionRequest};

/// Speech-to-text and text-to-speech.
pub trait VoiceApi {
    fn transcribe(&self, input: &TranscriptionRequest) -> Result<Transcription, ApiError>;

    fn synthesize(&self, input: &SpeechRequest) -> Result<SpeechResult, ApiError>;
}

#[derive(Debug, Clone, Copy)]
pub struct VoiceService<'a> {
    client: &'a ApiClient,
}

impl<'a> VoiceService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }
}

impl VoiceApi for VoiceService<'_> {
    fn transcribe(&self, input: &TranscriptionRequest) -> Result<Transcription, ApiError> {
        self.client
            .send_json(HttpMethod::Post, &["v1", "voice", "transcriptions"], input, 200)
    }

    fn synthesize(&self, input: &SpeechRequest) -> Result<SpeechResult, ApiError> {
        if let Some(speed) = input.speed {
            if !(0.25..=4.0).contains(&speed) {
                return Err(ApiError::InvalidRequest(format!("speech speed {speed} outside 0.25..=4.0")));
            }
        }
        self.client
            .send_json(HttpMethod::Post, &["v1", "voice", "speech"], input, 200)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::voice::AudioFormat;
    use crate::services::test_support::{client_returning, client_without_calls};

    #[test]
    fn transcription_with_speakers() {
        let client = client_returning(
            |req| req.url == "http://api.test/v1/voice/transcriptions",
            200,
            r#"{"id":"tr_1","text":"Objection.","language":"en","duration_seconds":1.2,
                "segments":[{"start":0.0,"end":1.2,"text":"Objection.","speaker":"A"}]}"#,
        );
        let transcription = client
            .voice()
            .transcribe(&TranscriptionRequest::from_bytes(b"RIFF", AudioFormat::Wav).with_diarize(true))
            .unwrap();
        assert_eq!(transcription.segments[0].speaker.as_deref(), Some("A"));
    }

    #[test]
    fn out_of_range_speed_is_rejected() {
        let client = client_without_calls();
        let req = SpeechRequest::new("Hello", "alloy", AudioFormat::Mp3).with_speed(9.0f32);
        assert!(matches!(client.voice().synthesize(&req), Err(ApiError::InvalidRequest(_))));
    }
}
