//! Speech synthesis adapter: one Google Cloud Text-to-Speech call per request.
//!
//! No chunking, streaming or caching of repeated text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod handlers;

const TTS_API_URL: &str = "https://texttospeech.googleapis.com/v1/text:synthesize";
/// High quality neural voice used when the caller does not pick one.
pub const DEFAULT_VOICE: &str = "en-US-Neural2-F";

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech synthesis is unavailable: no credential configured")]
    Unavailable,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TTS API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid audio payload: {0}")]
    Decode(String),
}

/// `"en-US-Neural2-F"` → `"en-US"`: the first two hyphen-separated segments.
pub fn language_code(voice: &str) -> String {
    voice.split('-').take(2).collect::<Vec<_>>().join("-")
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: String,
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

impl<'a> SynthesizeRequest<'a> {
    fn mp3(text: &'a str, voice: &'a str) -> Self {
        Self {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: language_code(voice),
                name: voice,
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        }
    }
}

#[derive(Clone)]
pub enum SpeechClient {
    Unavailable,
    Ready { client: Client, api_key: String },
}

impl SpeechClient {
    pub fn new(api_key: Option<String>) -> Self {
        match api_key {
            Some(api_key) => SpeechClient::Ready {
                client: Client::builder()
                    .timeout(std::time::Duration::from_secs(60))
                    .build()
                    .unwrap_or_else(|_| Client::new()),
                api_key,
            },
            None => {
                warn!("GOOGLE_TTS_API_KEY is missing; speech synthesis is unavailable");
                SpeechClient::Unavailable
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SpeechClient::Ready { .. })
    }

    /// Returns MP3 bytes for `text` spoken by `voice`.
    pub async fn synthesize(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechError> {
        let SpeechClient::Ready { client, api_key } = self else {
            return Err(SpeechError::Unavailable);
        };

        let response = client
            .post(TTS_API_URL)
            .header("x-goog-api-key", api_key)
            .json(&SynthesizeRequest::mp3(text, voice))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("TTS API returned {status}: {message}");
            return Err(SpeechError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SynthesizeResponse = response.json().await?;
        let audio = decode_audio(&body.audio_content)?;
        debug!("Synthesized {} bytes of audio with voice {voice}", audio.len());
        Ok(audio)
    }
}

fn decode_audio(encoded: &str) -> Result<Vec<u8>, SpeechError> {
    if encoded.is_empty() {
        return Err(SpeechError::Decode("empty audioContent".to_string()));
    }
    STANDARD
        .decode(encoded)
        .map_err(|e| SpeechError::Decode(e.to_string()))
}
