//! MCPollinations MCP server library.
//!
//! Exposes the Pollinations image, text and audio APIs as MCP tools.

pub mod audio;
pub mod image;
pub mod playback;
pub mod schemas;
pub mod server;
pub mod text;
pub mod upstream;

pub use audio::{AudioHandler, AudioMetadata, AudioParams, GeneratedAudio};
pub use image::{
    GeneratedImage, ImageGenerateParams, ImageHandler, ImageMetadata, ImageUrlParams,
    ImageUrlResult,
};
pub use playback::{AudioPlayer, PlaybackError};
pub use schemas::{TOOL_NAMES, ToolKind, tool_descriptors};
pub use server::PollinationsServer;
pub use text::{TextHandler, TextParams};
