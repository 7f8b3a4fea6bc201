//! Text generation handler.

use crate::schemas::RespondTextArgs;
use crate::upstream::{self, get_checked, read_json, require_prompt};
use mcpollinations_common::config::Config;
use mcpollinations_common::error::Error;
use serde_json::{Value, json};
use tracing::{info, instrument};

/// Default text model.
pub const DEFAULT_MODEL: &str = "openai";

/// Text generation parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextParams {
    pub prompt: String,
    pub model: String,
    pub seed: u64,
}

impl From<RespondTextArgs> for TextParams {
    fn from(args: RespondTextArgs) -> Self {
        Self {
            prompt: args.prompt,
            model: args.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            seed: args.seed.unwrap_or_else(upstream::random_seed),
        }
    }
}

/// Handler for the text tools.
#[derive(Debug, Clone)]
pub struct TextHandler {
    pub config: Config,
    pub http: reqwest::Client,
}

impl TextHandler {
    pub fn new(config: Config) -> Self {
        Self::with_client(config, reqwest::Client::new())
    }

    pub fn with_client(config: Config, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    pub fn build_url(&self, params: &TextParams) -> Result<String, Error> {
        let mut url = upstream::prompt_url(&self.config.text_base_url, "", &params.prompt)?;
        {
            let mut query = url.query_pairs_mut();
            if !params.model.is_empty() {
                query.append_pair("model", &params.model);
            }
            query.append_pair("seed", &params.seed.to_string());
        }
        Ok(url.into())
    }

    /// Generate a text response. The upstream body is returned as-is.
    #[instrument(level = "info", name = "respond_text", skip(self, params), fields(model = %params.model))]
    pub async fn respond_text(&self, params: TextParams) -> Result<String, Error> {
        require_prompt(&params.prompt)?;

        let endpoint = self.build_url(&params)?;
        let response = get_checked(&self.http, &endpoint).await?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            Error::upstream(&endpoint, status, format!("Failed to read response body: {}", e))
        })?;

        info!(chars = text.len(), "Received text response");
        Ok(text)
    }

    /// List text models, wrapped as `{"models": ...}`.
    #[instrument(level = "info", name = "list_text_models", skip(self))]
    pub async fn list_models(&self) -> Result<Value, Error> {
        let endpoint = self.config.text_models_endpoint();
        let response = get_checked(&self.http, &endpoint).await?;
        let models = read_json(&endpoint, response).await?;
        Ok(json!({ "models": models }))
    }
}
