//! Speech-to-text over a Whisper-compatible transcription endpoint

use std::time::Duration;

use crate::config::SttConfig;
use crate::error::ListenError;

#[derive(serde::Deserialize)]
struct TranscriptionResponse {
    text: String,
}

/// Transcribes WAV audio to text
pub struct SpeechToText {
    client: reqwest::Client,
    url: String,
    model: String,
    language: String,
    api_key: Option<String>,
}

impl SpeechToText {
    pub fn new(config: &SttConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()
                .unwrap_or_default(),
            url: config.url.clone(),
            model: config.model.clone(),
            language: config.language.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Transcribe one phrase
    ///
    /// # Errors
    ///
    /// `ServiceUnavailable` on network failure, timeout or a non-success
    /// status; `UnrecognizedSpeech` when the service heard no words
    pub async fn transcribe(&self, wav: Vec<u8>) -> Result<String, ListenError> {
        tracing::debug!(audio_bytes = wav.len(), "starting transcription");

        let part = reqwest::multipart::Part::bytes(wav)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| {
                tracing::error!(error = %e, "invalid upload mime type");
                ListenError::ServiceUnavailable
            })?;

        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", self.language.clone())
            .text("response_format", "json");

        let mut request = self.client.post(&self.url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "transcription request failed");
            ListenError::ServiceUnavailable
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "transcription API error");
            return Err(ListenError::ServiceUnavailable);
        }

        let result: TranscriptionResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse transcription response");
            ListenError::ServiceUnavailable
        })?;

        let text = result.text.trim();
        if text.is_empty() {
            return Err(ListenError::UnrecognizedSpeech);
        }

        tracing::info!("transcription complete");
        Ok(text.to_string())
    }
}
