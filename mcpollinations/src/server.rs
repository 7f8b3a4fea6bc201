//! MCP server for the Pollinations tools.
//!
//! `PollinationsServer` advertises the seven tools from [`crate::schemas`] and
//! routes each call to the image, text or audio handler. Handler failures are
//! returned as `isError` results; only an unknown tool name is a protocol
//! error.

use crate::audio::{AudioHandler, AudioParams, GeneratedAudio};
use crate::image::{ImageGenerateParams, ImageHandler, ImageUrlParams};
use crate::playback::AudioPlayer;
use crate::schemas::{
    GenerateImageArgs, GenerateImageUrlArgs, RespondAudioArgs, RespondTextArgs, ToolKind,
    tool_descriptors,
};
use crate::text::{TextHandler, TextParams};
use mcpollinations_common::config::Config;
use mcpollinations_common::error::Error;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::{CallToolResult, Content, ErrorCode, JsonObject, ServerCapabilities, ServerInfo},
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

/// MCP server exposing Pollinations image, text and audio generation.
#[derive(Debug, Clone)]
pub struct PollinationsServer {
    image: ImageHandler,
    text: TextHandler,
    audio: AudioHandler,
    player: AudioPlayer,
}

impl PollinationsServer {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let player = AudioPlayer::from_config(&config);

        Self {
            image: ImageHandler::with_client(config.clone(), http.clone()),
            text: TextHandler::with_client(config.clone(), http.clone()),
            audio: AudioHandler::with_client(config, http),
            player,
        }
    }

    /// Replace the audio player.
    pub fn with_player(mut self, player: AudioPlayer) -> Self {
        self.player = player;
        self
    }

    /// Run a tool by name.
    ///
    /// Unknown names fail with `METHOD_NOT_FOUND`. Every other failure is
    /// reported in the returned [`CallToolResult`].
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let tool: ToolKind = name
            .parse()
            .map_err(|e: crate::schemas::UnknownTool| {
                McpError::new(ErrorCode::METHOD_NOT_FOUND, e.to_string(), None)
            })?;

        info!(tool = %tool, "Calling tool");

        match self.run(tool, arguments).await {
            Ok(content) => Ok(CallToolResult::success(content)),
            Err(e) => {
                warn!(tool = %tool, error = %e, "Tool call failed");
                Ok(CallToolResult::error(vec![Content::text(format!(
                    "{}: {}",
                    tool.error_prefix(),
                    e
                ))]))
            }
        }
    }

    async fn run(&self, tool: ToolKind, arguments: Option<JsonObject>) -> Result<Vec<Content>, Error> {
        match tool {
            ToolKind::GenerateImageUrl => {
                let params = ImageUrlParams::from(parse_args::<GenerateImageUrlArgs>(arguments)?);
                let result = self.image.image_url(&params)?;
                Ok(vec![json_content(&result)?])
            }
            ToolKind::GenerateImage => {
                let args = parse_args::<GenerateImageArgs>(arguments)?;
                let params = ImageGenerateParams::from_args(args, &self.image.config.output_dir);
                let image = self.image.generate_image(params).await?;

                let mut summary = format!(
                    "Generated image from prompt: \"{}\"\n\nImage metadata: {}",
                    image.metadata.prompt,
                    serde_json::to_string_pretty(&image.metadata)?
                );
                if let Some(path) = &image.file_path {
                    summary.push_str(&format!("\n\nImage saved to: {}", path.display()));
                }

                Ok(vec![
                    Content::image(image.data, image.mime_type),
                    Content::text(summary),
                ])
            }
            ToolKind::ListImageModels => Ok(vec![json_content(&self.image.list_models().await?)?]),
            ToolKind::RespondAudio => {
                let params = AudioParams::from(parse_args::<RespondAudioArgs>(arguments)?);
                let GeneratedAudio {
                    data,
                    mime_type,
                    metadata,
                } = self.audio.respond_audio(params).await?;

                let status = if self.player.is_enabled() {
                    self.player.spawn(data, &mime_type);
                    "Audio playback started."
                } else {
                    "Audio generated; playback is disabled."
                };

                Ok(vec![Content::text(format!(
                    "{}\n\nAudio metadata: {}",
                    status,
                    serde_json::to_string_pretty(&metadata)?
                ))])
            }
            ToolKind::ListAudioVoices => Ok(vec![json_content(&self.audio.list_voices())?]),
            ToolKind::RespondText => {
                let params = TextParams::from(parse_args::<RespondTextArgs>(arguments)?);
                Ok(vec![Content::text(self.text.respond_text(params).await?)])
            }
            ToolKind::ListTextModels => Ok(vec![json_content(&self.text.list_models().await?)?]),
        }
    }
}

/// Deserialize tool arguments; absent arguments are an empty object.
fn parse_args<T: DeserializeOwned>(arguments: Option<JsonObject>) -> Result<T, Error> {
    let value = serde_json::Value::Object(arguments.unwrap_or_default());
    serde_json::from_value(value).map_err(|e| Error::validation(format!("Invalid parameters: {}", e)))
}

fn json_content<T: Serialize>(value: &T) -> Result<Content, Error> {
    Ok(Content::text(serde_json::to_string_pretty(value)?))
}

impl ServerHandler for PollinationsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Generate images, text and speech with Pollinations. \
                 Use generateImageUrl or generateImage for images, respondText for text \
                 and respondAudio for speech. The list tools show available models and voices."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParams>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<rmcp::model::ListToolsResult, McpError>> + Send + '_
    {
        async move {
            Ok(rmcp::model::ListToolsResult {
                tools: tool_descriptors(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        params: rmcp::model::CallToolRequestParams,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move { self.dispatch(params.name.as_ref(), params.arguments).await }
    }
}
