//! Input parameter validation tests.
//!
//! Invalid tool arguments produce an `isError` result naming the failed
//! operation. Only unknown tool names are protocol errors. None of these
//! calls reach the network: the upstream URLs point at a closed port, so any
//! request would surface as an upstream error instead of a validation error.

use mcpollinations::{AudioPlayer, PollinationsServer};
use mcpollinations_common::Config;
use rmcp::model::{CallToolResult, JsonObject};
use serde_json::Value;

/// Server whose upstream URLs point at a closed local port.
pub fn offline_server() -> PollinationsServer {
    let config = Config {
        image_base_url: "http://127.0.0.1:9".to_string(),
        text_base_url: "http://127.0.0.1:9".to_string(),
        ..Config::default()
    };
    PollinationsServer::new(config).with_player(AudioPlayer::disabled())
}

/// Text of the first content block.
pub fn first_text(result: &CallToolResult) -> String {
    result
        .content
        .first()
        .and_then(|c| c.as_text())
        .map(|t| t.text.clone())
        .unwrap_or_default()
}

pub fn arguments(value: Value) -> Option<JsonObject> {
    value.as_object().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use serde_json::json;

    #[tokio::test]
    async fn unknown_tool_is_protocol_error() {
        let err = offline_server()
            .dispatch("generateVideo", arguments(json!({"prompt": "x"})))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn prompt_errors_name_the_operation() {
        let cases = [
            ("generateImageUrl", "Error generating image URL: "),
            ("generateImage", "Error generating image: "),
            ("respondAudio", "Error generating audio: "),
            ("respondText", "Error generating text response: "),
        ];

        for (tool, prefix) in cases {
            let result = offline_server()
                .dispatch(tool, arguments(json!({"prompt": "  "})))
                .await
                .unwrap();
            assert_eq!(result.is_error, Some(true), "{tool}");
            let text = first_text(&result);
            assert!(text.starts_with(prefix), "{tool}: {text}");
            assert!(text.contains("Validation error"), "{tool}: {text}");
        }
    }

    #[tokio::test]
    async fn wrongly_typed_options_are_rejected() {
        let cases = [
            ("generateImageUrl", json!({"prompt": "cat", "width": "wide"})),
            ("generateImageUrl", json!({"prompt": "cat", "seed": -1})),
            ("generateImage", json!({"prompt": "cat", "enhance": "yes"})),
            ("respondAudio", json!({"prompt": "hi", "voice": 3})),
            ("respondText", json!({"prompt": "hi", "seed": "abc"})),
        ];

        for (tool, args) in cases {
            let result = offline_server().dispatch(tool, arguments(args.clone())).await.unwrap();
            assert_eq!(result.is_error, Some(true), "{tool} accepted {args}");
            assert!(first_text(&result).contains("Invalid parameters"));
        }
    }

    #[tokio::test]
    async fn list_tools_ignore_arguments() {
        let result = offline_server()
            .dispatch("listAudioVoices", arguments(json!({"unexpected": true})))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn non_string_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            prop::collection::vec(any::<u8>(), 0..4).prop_map(|v| json!(v)),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Prompts that are not strings never reach the upstream service.
        #[test]
        fn non_string_prompts_are_rejected(prompt in non_string_value(), tool_index in 0usize..4) {
            let tool = ["generateImageUrl", "generateImage", "respondAudio", "respondText"][tool_index];
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let result = runtime
                .block_on(offline_server().dispatch(tool, arguments(json!({"prompt": prompt}))))
                .unwrap();

            prop_assert_eq!(result.is_error, Some(true));
            prop_assert!(first_text(&result).contains("Invalid parameters"));
        }

        /// Blank prompts of any length are validation errors.
        #[test]
        fn blank_prompts_are_rejected(prompt in "[ \t\n]{0,10}") {
            let runtime = tokio::runtime::Runtime::new().unwrap();
            let result = runtime
                .block_on(offline_server().dispatch("respondText", arguments(json!({"prompt": prompt}))))
                .unwrap();

            prop_assert_eq!(result.is_error, Some(true));
            prop_assert!(first_text(&result).contains("Prompt is required"));
        }
    }
}
