//! Image generation handler.
//!
//! `generateImageUrl` only builds a URL; `generateImage` fetches it, returns
//! the bytes base64-encoded and saves a copy under the output directory.

use crate::schemas::{GenerateImageArgs, GenerateImageUrlArgs};
use crate::upstream::{self, content_type, get_checked, read_bytes, read_json, require_prompt};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use mcpollinations_common::config::{Config, expand_home};
use mcpollinations_common::error::Error;
use rand::Rng;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, instrument, warn};

/// Default image model.
pub const DEFAULT_MODEL: &str = "flux";

/// Default width and height in pixels.
pub const DEFAULT_SIZE: u32 = 1024;

/// Formats accepted for saved images.
pub const VALID_FORMATS: &[&str] = &["png", "jpeg", "jpg", "webp"];

/// Format used when none, or an unsupported one, is requested.
pub const DEFAULT_FORMAT: &str = "png";

/// MIME type assumed when the upstream sends no `Content-Type`.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Number of prompt characters used in generated file names.
const FILE_STEM_PROMPT_CHARS: usize = 20;

/// Parameters of an image URL, with all defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUrlParams {
    pub prompt: String,
    pub model: String,
    pub seed: u64,
    pub width: u32,
    pub height: u32,
    pub enhance: bool,
    pub safe: bool,
}

impl ImageUrlParams {
    /// Parameters with default settings and the given seed.
    pub fn new(prompt: impl Into<String>, seed: u64) -> Self {
        Self {
            prompt: prompt.into(),
            model: DEFAULT_MODEL.to_string(),
            seed,
            width: DEFAULT_SIZE,
            height: DEFAULT_SIZE,
            enhance: true,
            safe: false,
        }
    }
}

impl From<GenerateImageUrlArgs> for ImageUrlParams {
    fn from(args: GenerateImageUrlArgs) -> Self {
        Self {
            prompt: args.prompt,
            model: args.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            seed: args.seed.unwrap_or_else(upstream::random_seed),
            width: args.width.unwrap_or(DEFAULT_SIZE),
            height: args.height.unwrap_or(DEFAULT_SIZE),
            enhance: args.enhance.unwrap_or(true),
            safe: args.safe.unwrap_or(false),
        }
    }
}

/// Parameters of `generateImage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageGenerateParams {
    pub image: ImageUrlParams,
    /// Target directory; a leading `~` is expanded.
    pub output_path: String,
    /// File name without extension; empty means derive from the prompt.
    pub file_name: String,
    pub format: String,
}

impl ImageGenerateParams {
    /// Convert tool arguments, falling back to `default_output` for the directory.
    pub fn from_args(args: GenerateImageArgs, default_output: &str) -> Self {
        let image = ImageUrlParams::from(GenerateImageUrlArgs {
            prompt: args.prompt,
            model: args.model,
            seed: args.seed,
            width: args.width,
            height: args.height,
            enhance: args.enhance,
            safe: args.safe,
        });

        Self {
            image,
            output_path: args
                .output_path
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| default_output.to_string()),
            file_name: args.file_name.unwrap_or_default(),
            format: args.format.unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
        }
    }
}

/// Effective parameters echoed back to the caller.
///
/// `private` and `nologo` are always `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageMetadata {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub model: String,
    pub seed: u64,
    pub enhance: bool,
    pub private: bool,
    pub nologo: bool,
    pub safe: bool,
}

impl From<&ImageUrlParams> for ImageMetadata {
    fn from(params: &ImageUrlParams) -> Self {
        Self {
            prompt: params.prompt.clone(),
            width: params.width,
            height: params.height,
            model: params.model.clone(),
            seed: params.seed,
            enhance: params.enhance,
            private: true,
            nologo: true,
            safe: params.safe,
        }
    }
}

/// Result of `generateImageUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUrlResult {
    pub image_url: String,
    #[serde(flatten)]
    pub metadata: ImageMetadata,
}

/// Result of `generateImage`.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Base64-encoded image bytes
    pub data: String,
    pub mime_type: String,
    pub metadata: ImageMetadata,
    /// Where the image was saved; `None` if saving failed
    pub file_path: Option<PathBuf>,
}

/// Handler for the image tools.
#[derive(Debug, Clone)]
pub struct ImageHandler {
    pub config: Config,
    pub http: reqwest::Client,
}

impl ImageHandler {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: Config, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Build the image URL for the given parameters. Performs no I/O.
    ///
    /// The query always carries `nologo=true` and `private=true`;
    /// `enhance=true` is only present when enhancement is requested.
    pub fn image_url(&self, params: &ImageUrlParams) -> Result<ImageUrlResult, Error> {
        require_prompt(&params.prompt)?;

        let mut url = upstream::prompt_url(&self.config.image_base_url, "/prompt", &params.prompt)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("model", &params.model);
            query.append_pair("seed", &params.seed.to_string());
            if params.width > 0 {
                query.append_pair("width", &params.width.to_string());
            }
            if params.height > 0 {
                query.append_pair("height", &params.height.to_string());
            }
            if params.enhance {
                query.append_pair("enhance", "true");
            }
            query.append_pair("nologo", "true");
            query.append_pair("private", "true");
            query.append_pair("safe", if params.safe { "true" } else { "false" });
        }

        Ok(ImageUrlResult {
            image_url: url.into(),
            metadata: ImageMetadata::from(params),
        })
    }

    /// Generate an image, returning its bytes and saving a copy to disk.
    ///
    /// Saving is best-effort: filesystem errors are logged and leave
    /// `file_path` empty.
    #[instrument(level = "info", name = "generate_image", skip(self, params), fields(model = %params.image.model))]
    pub async fn generate_image(&self, params: ImageGenerateParams) -> Result<GeneratedImage, Error> {
        let url_result = self.image_url(&params.image)?;
        let endpoint = url_result.image_url.as_str();

        let response = get_checked(&self.http, endpoint).await?;
        let mime_type = content_type(&response, DEFAULT_MIME_TYPE);
        let bytes = read_bytes(endpoint, response).await?;

        info!(bytes = bytes.len(), mime_type = %mime_type, "Received image data");

        let extension = resolve_format(&params.format);
        let stem = match sanitize_file_name(&params.file_name) {
            Some(name) => name,
            None => default_file_stem(
                &params.image.prompt,
                chrono::Utc::now().timestamp_millis(),
                rand::thread_rng().gen_range(0..10_000),
            ),
        };
        let directory = expand_home(&params.output_path);

        let file_path = match save_unique(&directory, &stem, extension, &bytes).await {
            Ok(path) => {
                info!(path = %path.display(), "Saved image to local file");
                Some(path)
            }
            Err(e) => {
                warn!(directory = %directory.display(), error = %e, "Failed to save image");
                None
            }
        };

        Ok(GeneratedImage {
            data: BASE64.encode(&bytes),
            mime_type,
            metadata: url_result.metadata,
            file_path,
        })
    }

    /// List image models, returning the upstream JSON unchanged.
    #[instrument(level = "info", name = "list_image_models", skip(self))]
    pub async fn list_models(&self) -> Result<serde_json::Value, Error> {
        let endpoint = self.config.image_models_endpoint();
        let response = get_checked(&self.http, &endpoint).await?;
        read_json(&endpoint, response).await
    }
}

/// Map a requested format onto a supported extension.
///
/// Unsupported formats fall back to PNG with a warning rather than failing.
pub fn resolve_format(format: &str) -> &'static str {
    let wanted = format.trim().to_ascii_lowercase();
    match VALID_FORMATS.iter().find(|f| **f == wanted) {
        Some(valid) => *valid,
        None => {
            warn!(format = %format, "Invalid format, defaulting to 'png'");
            DEFAULT_FORMAT
        }
    }
}

/// File stem derived from the prompt: its first characters with anything
/// but ASCII letters and digits replaced by `_`, lowercased, followed by a
/// timestamp and a four-digit suffix.
pub fn default_file_stem(prompt: &str, timestamp_ms: i64, suffix: u16) -> String {
    let safe: String = prompt
        .chars()
        .take(FILE_STEM_PROMPT_CHARS)
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}_{:04}", safe, timestamp_ms, suffix % 10_000)
}

/// Keep only the final path component of a caller-supplied file name.
fn sanitize_file_name(file_name: &str) -> Option<String> {
    let trimmed = file_name.trim();
    if trimmed.is_empty() {
        return None;
    }
    Path::new(trimmed)
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
}

/// Write `bytes` to `<dir>/<stem>.<ext>` without overwriting anything.
///
/// Files are opened with create-exclusive semantics; on a collision the stem
/// gets `_1`, `_2`, ... appended until a free name is found.
pub async fn save_unique(
    directory: &Path,
    stem: &str,
    extension: &str,
    bytes: &[u8],
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(directory).await?;

    let mut counter: u64 = 0;
    loop {
        let file_name = match counter {
            0 => format!("{}.{}", stem, extension),
            n => format!("{}_{}.{}", stem, n, extension),
        };
        let path = directory.join(file_name);

        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(mut file) => {
                file.write_all(bytes).await?;
                file.flush().await?;
                return Ok(path);
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "File exists, trying next suffix");
                counter += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
