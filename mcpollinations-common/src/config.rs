//! Configuration module for loading environment variables and settings.

use crate::error::ConfigError;
use std::path::PathBuf;

/// Default base URL of the Pollinations image API.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.pollinations.ai";

/// Default base URL of the Pollinations text and audio API.
pub const DEFAULT_TEXT_BASE_URL: &str = "https://text.pollinations.ai";

/// Default directory for saved images.
pub const DEFAULT_OUTPUT_DIR: &str = "./mcpollinations-output";

/// Default HTTP port for the network transports.
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL for image generation and image model listing
    pub image_base_url: String,
    /// Base URL for text/audio generation and text model listing
    pub text_base_url: String,
    /// Directory used by `generateImage` when the caller gives no `outputPath`
    pub output_dir: String,
    /// Explicit audio player command (e.g. `mpv --no-video`)
    pub audio_player: Option<String>,
    /// Whether `respondAudio` plays the generated audio locally
    pub playback_enabled: bool,
    /// HTTP server port
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            text_base_url: DEFAULT_TEXT_BASE_URL.to_string(),
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            audio_player: None,
            playback_enabled: true,
            port: DEFAULT_PORT,
        }
    }
}

impl Config {
    /// Load configuration from environment variables and .env file.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` if `PORT` or
    /// `MCPOLLINATIONS_DISABLE_PLAYBACK` cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let image_base_url = var("POLLINATIONS_IMAGE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.image_base_url);

        let text_base_url = var("POLLINATIONS_TEXT_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.text_base_url);

        let output_dir = var("MCPOLLINATIONS_OUTPUT_DIR").unwrap_or(defaults.output_dir);

        let audio_player = var("MCPOLLINATIONS_AUDIO_PLAYER");

        let playback_enabled = match var("MCPOLLINATIONS_DISABLE_PLAYBACK") {
            Some(value) => !parse_bool("MCPOLLINATIONS_DISABLE_PLAYBACK", &value)?,
            None => defaults.playback_enabled,
        };

        let port = match var("PORT") {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_value("PORT", format!("'{}' is not a port", value)))?,
            None => defaults.port,
        };

        Ok(Self {
            image_base_url,
            text_base_url,
            output_dir,
            audio_player,
            playback_enabled,
            port,
        })
    }

    /// Endpoint listing the available image models.
    pub fn image_models_endpoint(&self) -> String {
        format!("{}/models", self.image_base_url)
    }

    /// Endpoint listing the available text models.
    pub fn text_models_endpoint(&self) -> String {
        format!("{}/models", self.text_base_url)
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid_value(
            name,
            format!("'{}' is not a boolean", other),
        )),
    }
}

/// Expand a leading `~` to the current user's home directory.
///
/// Paths without a leading `~`, and all paths when no home directory can be
/// determined, are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\') => rest,
        _ => return PathBuf::from(path),
    };

    match dirs::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(path),
    }
}
