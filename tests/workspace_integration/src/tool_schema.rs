//! Tool schema validity tests.
//!
//! Every advertised tool has a name, a description and an object schema that
//! lists its required parameters.

use serde_json::Value;

/// Check that a JSON schema describes an object with a properties map.
pub fn validate_json_schema(schema: &Value) -> Result<(), String> {
    let obj = schema
        .as_object()
        .ok_or_else(|| "Schema must be an object".to_string())?;

    match obj.get("type") {
        Some(type_val) if type_val == "object" => {}
        other => return Err(format!("Expected type 'object', got {:?}", other)),
    }

    match obj.get("properties") {
        Some(properties) if properties.is_object() => {}
        _ => return Err("Properties must be an object".to_string()),
    }

    if let Some(required) = obj.get("required") {
        let properties = &obj["properties"];
        let names = required
            .as_array()
            .ok_or_else(|| "Required must be an array".to_string())?;
        for name in names {
            let name = name.as_str().ok_or("Required entries must be strings")?;
            if properties.get(name).is_none() {
                return Err(format!("Required property '{}' is not declared", name));
            }
        }
    }

    Ok(())
}

/// Check that a tool has a name, a description and a valid input schema.
pub fn validate_tool(tool: &rmcp::model::Tool) -> Result<(), String> {
    if tool.name.is_empty() {
        return Err("Tool name cannot be empty".to_string());
    }

    if tool.description.as_deref().is_none_or(str::is_empty) {
        return Err(format!("Tool '{}' must have a description", tool.name));
    }

    let schema_value = serde_json::to_value(&*tool.input_schema)
        .map_err(|e| format!("Failed to serialize schema: {}", e))?;
    validate_json_schema(&schema_value).map_err(|e| format!("Tool '{}': {}", tool.name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpollinations::{TOOL_NAMES, ToolKind, tool_descriptors};
    use std::sync::Arc;

    fn schema_of(name: &str) -> Value {
        let tool = tool_descriptors()
            .into_iter()
            .find(|t| t.name == name)
            .unwrap_or_else(|| panic!("tool {name} not registered"));
        serde_json::to_value(&*tool.input_schema).unwrap()
    }

    #[test]
    fn test_json_schema_validation() {
        let valid = serde_json::json!({
            "type": "object",
            "properties": {"prompt": {"type": "string"}},
            "required": ["prompt"]
        });
        assert!(validate_json_schema(&valid).is_ok());

        assert!(validate_json_schema(&serde_json::json!({"type": "string"})).is_err());

        let undeclared = serde_json::json!({
            "type": "object",
            "properties": {},
            "required": ["prompt"]
        });
        assert!(validate_json_schema(&undeclared).is_err());
    }

    #[test]
    fn test_tool_validation_rejects_missing_description() {
        let schema = serde_json::json!({"type": "object", "properties": {}});
        let tool = rmcp::model::Tool::new(
            "listThings",
            "",
            Arc::new(schema.as_object().cloned().unwrap_or_default()),
        );
        assert!(validate_tool(&tool).is_err());
    }

    #[test]
    fn every_registered_tool_is_valid() {
        let tools = tool_descriptors();
        assert_eq!(tools.len(), 7);
        for tool in &tools {
            assert!(validate_tool(tool).is_ok(), "{:?}", validate_tool(tool));
        }
    }

    #[test]
    fn tools_are_registered_in_order() {
        let names: Vec<String> = tool_descriptors().iter().map(|t| t.name.to_string()).collect();
        assert_eq!(names, TOOL_NAMES);
    }

    #[test]
    fn generation_tools_require_prompt() {
        for name in ["generateImageUrl", "generateImage", "respondAudio", "respondText"] {
            let schema = schema_of(name);
            assert_eq!(schema["required"], serde_json::json!(["prompt"]), "{name}");
            assert!(schema["properties"]["prompt"]["description"].is_string());
        }
    }

    #[test]
    fn list_tools_take_no_parameters() {
        for name in ["listImageModels", "listAudioVoices", "listTextModels"] {
            let schema = schema_of(name);
            assert!(schema["properties"].as_object().unwrap().is_empty(), "{name}");
            assert!(schema.get("required").is_none());
        }
    }

    #[test]
    fn generate_image_exposes_file_options() {
        let schema = schema_of("generateImage");
        for property in ["outputPath", "fileName", "format", "width", "height", "enhance", "safe"] {
            assert!(
                schema["properties"].get(property).is_some(),
                "generateImage should declare {property}"
            );
        }
    }

    #[test]
    fn tool_kinds_match_descriptor_names() {
        for (kind, tool) in ToolKind::ALL.iter().zip(tool_descriptors()) {
            assert_eq!(kind.name(), tool.name);
        }
    }
}

#[cfg(test)]
mod property_tests {
    use mcpollinations::{TOOL_NAMES, ToolKind};
    use proptest::prelude::*;

    proptest! {
        /// Names outside the registry never resolve to a tool.
        #[test]
        fn unknown_names_are_rejected(name in "[a-zA-Z_]{1,24}") {
            prop_assume!(!TOOL_NAMES.contains(&name.as_str()));
            prop_assert!(name.parse::<ToolKind>().is_err());
        }

        /// Lookup is exact: case changes do not match.
        #[test]
        fn lookup_is_case_sensitive(index in 0usize..7) {
            let upper = TOOL_NAMES[index].to_uppercase();
            prop_assert!(upper.parse::<ToolKind>().is_err());
        }
    }
}
