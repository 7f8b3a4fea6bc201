//! Tool registry.
//!
//! Declares the seven tools the server advertises, their argument structs
//! and the JSON schemas derived from them. Optional arguments are `Option`s
//! here; defaults are applied when converting into handler parameters.

use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The tools exposed by the server, in advertised order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    GenerateImageUrl,
    GenerateImage,
    ListImageModels,
    RespondAudio,
    ListAudioVoices,
    RespondText,
    ListTextModels,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::GenerateImageUrl,
        ToolKind::GenerateImage,
        ToolKind::ListImageModels,
        ToolKind::RespondAudio,
        ToolKind::ListAudioVoices,
        ToolKind::RespondText,
        ToolKind::ListTextModels,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            ToolKind::GenerateImageUrl => "generateImageUrl",
            ToolKind::GenerateImage => "generateImage",
            ToolKind::ListImageModels => "listImageModels",
            ToolKind::RespondAudio => "respondAudio",
            ToolKind::ListAudioVoices => "listAudioVoices",
            ToolKind::RespondText => "respondText",
            ToolKind::ListTextModels => "listTextModels",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::GenerateImageUrl => "Generate an image URL from a text prompt",
            ToolKind::GenerateImage => {
                "Generate an image, return the base64-encoded data, and save to a file by default"
            }
            ToolKind::ListImageModels => "List available image models",
            ToolKind::RespondAudio => {
                "Generate an audio response to a text prompt and play it through the system"
            }
            ToolKind::ListAudioVoices => {
                "List all available audio voices for text-to-speech generation"
            }
            ToolKind::RespondText => "Respond with text to a prompt using the Pollinations Text API",
            ToolKind::ListTextModels => "List available text models",
        }
    }

    /// Prefix of the message returned when the tool call fails.
    pub fn error_prefix(self) -> &'static str {
        match self {
            ToolKind::GenerateImageUrl => "Error generating image URL",
            ToolKind::GenerateImage => "Error generating image",
            ToolKind::ListImageModels => "Error listing image models",
            ToolKind::RespondAudio => "Error generating audio",
            ToolKind::ListAudioVoices => "Error listing audio voices",
            ToolKind::RespondText => "Error generating text response",
            ToolKind::ListTextModels => "Error listing text models",
        }
    }

    /// JSON schema of the tool's arguments.
    pub fn input_schema(self) -> JsonObject {
        match self {
            ToolKind::GenerateImageUrl => schema_object::<GenerateImageUrlArgs>(),
            ToolKind::GenerateImage => schema_object::<GenerateImageArgs>(),
            ToolKind::RespondAudio => schema_object::<RespondAudioArgs>(),
            ToolKind::RespondText => schema_object::<RespondTextArgs>(),
            ToolKind::ListImageModels | ToolKind::ListAudioVoices | ToolKind::ListTextModels => {
                empty_object_schema()
            }
        }
    }

    /// The MCP descriptor advertised in `tools/list`.
    pub fn descriptor(self) -> Tool {
        Tool::new(self.name(), self.description(), Arc::new(self.input_schema()))
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a tool name is not registered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name() == name)
            .ok_or_else(|| UnknownTool(name.to_string()))
    }
}

/// Names of all tools, in advertised order.
pub const TOOL_NAMES: [&str; ToolKind::ALL.len()] = {
    let mut names = [""; ToolKind::ALL.len()];
    let mut i = 0;
    while i < names.len() {
        names[i] = ToolKind::ALL[i].name();
        i += 1;
    }
    names
};

/// Full ordered list of tool descriptors.
pub fn tool_descriptors() -> Vec<Tool> {
    ToolKind::ALL.into_iter().map(ToolKind::descriptor).collect()
}

fn schema_object<T: JsonSchema>() -> JsonObject {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(&schema) {
        Ok(serde_json::Value::Object(map)) => map,
        _ => empty_object_schema(),
    }
}

fn empty_object_schema() -> JsonObject {
    let mut map = JsonObject::new();
    map.insert("type".to_string(), serde_json::json!("object"));
    map.insert("properties".to_string(), serde_json::json!({}));
    map
}

/// Arguments of `generateImageUrl`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GenerateImageUrlArgs {
    /// The text description of the image to generate
    pub prompt: String,
    /// Model name to use for generation (default: "flux"). Available options: "flux", "turbo" - use listImageModels to see all models
    #[serde(default)]
    pub model: Option<String>,
    /// Seed for reproducible results (default: random)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Width of the generated image (default: 1024)
    #[serde(default)]
    pub width: Option<u32>,
    /// Height of the generated image (default: 1024)
    #[serde(default)]
    pub height: Option<u32>,
    /// Whether to enhance the prompt using an LLM before generating (default: true)
    #[serde(default)]
    pub enhance: Option<bool>,
    /// Whether to apply content filtering (default: false)
    #[serde(default)]
    pub safe: Option<bool>,
}

/// Arguments of `generateImage`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageArgs {
    /// The text description of the image to generate
    pub prompt: String,
    /// Model name to use for generation (default: "flux"). Available options: "flux", "turbo" - use listImageModels to see all models
    #[serde(default)]
    pub model: Option<String>,
    /// Seed for reproducible results (default: random)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Width of the generated image (default: 1024)
    #[serde(default)]
    pub width: Option<u32>,
    /// Height of the generated image (default: 1024)
    #[serde(default)]
    pub height: Option<u32>,
    /// Whether to enhance the prompt using an LLM before generating (default: true)
    #[serde(default)]
    pub enhance: Option<bool>,
    /// Whether to apply content filtering (default: false)
    #[serde(default)]
    pub safe: Option<bool>,
    /// Directory path where to save the image (default: "./mcpollinations-output")
    #[serde(default)]
    pub output_path: Option<String>,
    /// Name of the file to save (without extension, default: generated from prompt)
    #[serde(default)]
    pub file_name: Option<String>,
    /// Image format to save as (png, jpeg, jpg, webp - default: png)
    #[serde(default)]
    pub format: Option<String>,
}

/// Arguments of `respondAudio`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RespondAudioArgs {
    /// The text prompt to respond to with audio
    pub prompt: String,
    /// Voice to use for audio generation (default: "alloy"). Available options: "alloy", "echo", "fable", "onyx", "nova", "shimmer", "coral", "verse", "ballad", "ash", "sage", "amuch", "dan"
    #[serde(default)]
    pub voice: Option<String>,
    /// Seed for reproducible results (default: random)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Additional instructions for voice character/style, spoken context placed before the prompt
    #[serde(default)]
    pub voice_instructions: Option<String>,
}

/// Arguments of `respondText`.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RespondTextArgs {
    /// The text prompt to generate a response for
    pub prompt: String,
    /// Model to use for text generation (default: "openai"). Available options: "openai", "anthropic", "mistral", "llama", "gemini" - use listTextModels to see all models
    #[serde(default)]
    pub model: Option<String>,
    /// Seed for reproducible results (default: random)
    #[serde(default)]
    pub seed: Option<u64>,
}
