//! Shared plumbing for talking to the Pollinations HTTP API.
//!
//! Every tool performs at most one GET; these helpers build the request URL,
//! turn non-success statuses into [`Error::Upstream`] and read the
//! `Content-Type` header.

use mcpollinations_common::error::{ConfigError, Error};
use rand::Rng;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, Url};
use tracing::debug;

/// Upper bound (exclusive) for randomly drawn seeds.
pub const MAX_RANDOM_SEED: u64 = 1_000_000;

/// Draw a seed for a request that did not specify one.
pub fn random_seed() -> u64 {
    rand::thread_rng().gen_range(0..MAX_RANDOM_SEED)
}

/// Build `<base><prefix>/<percent-encoded text>` as a URL without a query.
pub fn prompt_url(base: &str, prefix: &str, text: &str) -> Result<Url, Error> {
    let raw = format!(
        "{}{}/{}",
        base.trim_end_matches('/'),
        prefix,
        urlencoding::encode(text)
    );
    Url::parse(&raw).map_err(|e| {
        Error::from(ConfigError::invalid_value(
            "base URL",
            format!("'{}' does not form a valid URL: {}", base, e),
        ))
    })
}

/// Issue a GET and fail with [`Error::Upstream`] unless the status is 2xx.
pub async fn get_checked(http: &Client, url: &str) -> Result<Response, Error> {
    debug!(url = %url, "Calling Pollinations API");

    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| Error::upstream(url, 0, format!("Request failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Unknown status");
        let body = response.text().await.unwrap_or_default();
        let message = match body.trim() {
            "" => reason.to_string(),
            detail => format!("{}: {}", reason, detail),
        };
        return Err(Error::upstream(url, status.as_u16(), message));
    }

    Ok(response)
}

/// Read the full body of a successful response.
pub async fn read_bytes(url: &str, response: Response) -> Result<Vec<u8>, Error> {
    let status = response.status().as_u16();
    let bytes = response.bytes().await.map_err(|e| {
        Error::upstream(url, status, format!("Failed to read response body: {}", e))
    })?;
    Ok(bytes.to_vec())
}

/// Parse a successful response body as JSON.
pub async fn read_json(url: &str, response: Response) -> Result<serde_json::Value, Error> {
    let status = response.status().as_u16();
    response.json().await.map_err(|e| {
        Error::upstream(url, status, format!("Failed to parse response: {}", e))
    })
}

/// The response MIME type, or `default` when the header is absent.
pub fn content_type(response: &Response, default: &str) -> String {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Reject missing or blank prompts before any request is made.
pub fn require_prompt(prompt: &str) -> Result<(), Error> {
    if prompt.trim().is_empty() {
        return Err(Error::validation("Prompt is required and must be a string"));
    }
    Ok(())
}
