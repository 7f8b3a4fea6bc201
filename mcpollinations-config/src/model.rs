//! The MCP client configuration written by the generator.

use mcpollinations::{audio, image, text, TOOL_NAMES};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default output directory recorded in the configuration.
pub const DEFAULT_OUTPUT_DIR: &str = "~/mcpollinations-output";

/// Default path of the generated file.
pub const DEFAULT_CONFIG_PATH: &str = "./mcp.json";

/// The whole file: a single `mcpollinations` server entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct McpConfigFile {
    pub mcpollinations: ServerEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerEntry {
    pub command: String,
    pub args: Vec<String>,
    pub resources: Resources,
    #[serde(rename = "default_params")]
    pub default_params: DefaultParams,
    pub disabled: bool,
    pub always_allow: Vec<String>,
}

impl Default for ServerEntry {
    fn default() -> Self {
        Self {
            command: "mcpollinations".to_string(),
            args: vec!["--transport".to_string(), "stdio".to_string()],
            resources: Resources::default(),
            default_params: DefaultParams::default(),
            disabled: false,
            always_allow: TOOL_NAMES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    pub output_dir: String,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DefaultParams {
    pub image: ImageDefaults,
    pub text: TextDefaults,
    pub audio: AudioDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDefaults {
    pub model: String,
    pub width: u32,
    pub height: u32,
    pub safe: bool,
    pub enhance: bool,
}

impl Default for ImageDefaults {
    fn default() -> Self {
        Self {
            model: image::DEFAULT_MODEL.to_string(),
            width: image::DEFAULT_SIZE,
            height: image::DEFAULT_SIZE,
            safe: false,
            enhance: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextDefaults {
    pub model: String,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            model: text::DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioDefaults {
    pub voice: String,
}

impl Default for AudioDefaults {
    fn default() -> Self {
        Self {
            voice: audio::DEFAULT_VOICE.to_string(),
        }
    }
}

impl McpConfigFile {
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Write the configuration as pretty JSON, replacing any existing file.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let json = self.to_pretty_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
