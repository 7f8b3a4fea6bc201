//! Audio (text-to-speech) handler.
//!
//! Speech is produced by the text endpoint with the `openai-audio` model.
//! Local playback of the result is handled separately by
//! [`crate::playback::AudioPlayer`].

use crate::schemas::RespondAudioArgs;
use crate::upstream::{self, content_type, get_checked, read_bytes, require_prompt};
use mcpollinations_common::config::Config;
use mcpollinations_common::error::Error;
use serde::Serialize;
use tracing::{info, instrument};

/// Model tag sent with every speech request.
pub const AUDIO_MODEL: &str = "openai-audio";

/// Default voice.
pub const DEFAULT_VOICE: &str = "alloy";

/// MIME type assumed when the upstream sends no `Content-Type`.
pub const DEFAULT_MIME_TYPE: &str = "audio/mpeg";

/// Voices accepted by the upstream speech model.
pub const VOICES: [&str; 13] = [
    "alloy", "echo", "fable", "onyx", "nova", "shimmer", "coral", "verse", "ballad", "ash",
    "sage", "amuch", "dan",
];

/// Speech generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioParams {
    pub prompt: String,
    pub voice: String,
    pub seed: u64,
    pub voice_instructions: Option<String>,
}

impl From<RespondAudioArgs> for AudioParams {
    fn from(args: RespondAudioArgs) -> Self {
        Self {
            prompt: args.prompt,
            voice: args.voice.unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            seed: args.seed.unwrap_or_else(upstream::random_seed),
            voice_instructions: args.voice_instructions,
        }
    }
}

impl AudioParams {
    /// Text sent upstream: the instructions, a blank line, then the prompt.
    pub fn request_text(&self) -> String {
        match self.voice_instructions.as_deref() {
            Some(instructions) if !instructions.is_empty() => {
                format!("{}\n\n{}", instructions, self.prompt)
            }
            _ => self.prompt.clone(),
        }
    }
}

/// Effective parameters echoed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMetadata {
    pub prompt: String,
    pub voice: String,
    pub model: String,
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice_instructions: Option<String>,
}

/// Result of `respondAudio`.
#[derive(Debug, Clone)]
pub struct GeneratedAudio {
    /// Raw audio bytes as received
    pub data: Vec<u8>,
    pub mime_type: String,
    pub metadata: AudioMetadata,
}

/// Handler for the audio tools.
#[derive(Debug, Clone)]
pub struct AudioHandler {
    pub config: Config,
    pub http: reqwest::Client,
}

impl AudioHandler {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: Config, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn build_url(&self, params: &AudioParams) -> Result<String, Error> {
        let mut url =
            upstream::prompt_url(&self.config.text_base_url, "", &params.request_text())?;
        url.query_pairs_mut()
            .append_pair("model", AUDIO_MODEL)
            .append_pair("voice", &params.voice)
            .append_pair("seed", &params.seed.to_string());
        Ok(url.into())
    }

    /// Generate speech for the prompt.
    #[instrument(level = "info", name = "respond_audio", skip(self, params), fields(voice = %params.voice))]
    pub async fn respond_audio(&self, params: AudioParams) -> Result<GeneratedAudio, Error> {
        require_prompt(&params.prompt)?;

        let endpoint = self.build_url(&params)?;
        let response = get_checked(&self.http, &endpoint).await?;
        let mime_type = content_type(&response, DEFAULT_MIME_TYPE);
        let bytes = read_bytes(&endpoint, response).await?;

        info!(bytes = bytes.len(), mime_type = %mime_type, "Received audio data");

        Ok(GeneratedAudio {
            data: bytes,
            mime_type,
            metadata: AudioMetadata {
                prompt: params.prompt,
                voice: params.voice,
                model: AUDIO_MODEL.to_string(),
                seed: params.seed,
                voice_instructions: params.voice_instructions,
            },
        })
    }

    /// The fixed voice list. No network access.
    pub fn list_voices(&self) -> serde_json::Value {
        serde_json::json!({ "voices": VOICES })
    }
}
