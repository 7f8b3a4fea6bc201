//! Output format tests.
//!
//! Successful tool calls return non-empty text or image content; JSON results
//! are pretty-printed documents a client can parse back.

use rmcp::model::{CallToolResult, Content, RawContent};

/// Check that every content block in a result is well formed.
pub fn validate_tool_result(result: &CallToolResult) -> Result<(), String> {
    if result.content.is_empty() {
        return Err("Result should have content".to_string());
    }

    for content in &result.content {
        validate_content(content)?;
    }

    Ok(())
}

/// Check a single content block.
pub fn validate_content(content: &Content) -> Result<(), String> {
    match &content.raw {
        RawContent::Text(text_content) => {
            if text_content.text.is_empty() {
                return Err("Text content should not be empty".to_string());
            }
            Ok(())
        }
        RawContent::Image(image_content) => {
            if image_content.data.is_empty() {
                return Err("Image content should have data".to_string());
            }
            if !image_content.mime_type.starts_with("image/") {
                return Err(format!(
                    "Image content should have image/* mime type, got: {}",
                    image_content.mime_type
                ));
            }
            Ok(())
        }
        _ => Err("Only text and image content is produced".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input_validation::{arguments, first_text, offline_server};
    use serde_json::{Value, json};

    #[test]
    fn test_content_validation() {
        assert!(validate_content(&Content::text("ok")).is_ok());
        assert!(validate_content(&Content::text("")).is_err());
        assert!(validate_content(&Content::image("aGk=", "image/png")).is_ok());
        assert!(validate_content(&Content::image("aGk=", "audio/mpeg")).is_err());
        assert!(validate_tool_result(&CallToolResult::success(vec![])).is_err());
    }

    #[tokio::test]
    async fn image_url_result_is_pretty_json() {
        let result = offline_server()
            .dispatch(
                "generateImageUrl",
                arguments(json!({"prompt": "lighthouse", "seed": 1, "enhance": false})),
            )
            .await
            .unwrap();
        assert!(validate_tool_result(&result).is_ok());
        assert_eq!(result.content.len(), 1);

        let text = first_text(&result);
        assert!(text.contains("\n  \"imageUrl\": "), "not pretty printed: {text}");

        let body: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body["prompt"], "lighthouse");
        assert_eq!(body["enhance"], false);
        assert_eq!(body["private"], true);
        assert_eq!(body["nologo"], true);
        assert!(!body["imageUrl"].as_str().unwrap().contains("enhance="));
    }

    #[tokio::test]
    async fn voices_result_is_pretty_json() {
        let result = offline_server().dispatch("listAudioVoices", None).await.unwrap();
        assert!(validate_tool_result(&result).is_ok());

        let body: Value = serde_json::from_str(&first_text(&result)).unwrap();
        assert_eq!(body["voices"][0], "alloy");
    }

    #[tokio::test]
    async fn error_results_are_single_text_blocks() {
        let result = offline_server().dispatch("listImageModels", None).await.unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(validate_tool_result(&result).is_ok());
        assert_eq!(result.content.len(), 1);
        assert!(first_text(&result).starts_with("Error listing image models: Upstream error"));
    }
}
