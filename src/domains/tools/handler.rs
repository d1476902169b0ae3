//! The tool handler contract.

use async_trait::async_trait;
use rmcp::model::{Content, JsonObject};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::descriptor::ToolDescriptor;
use super::error::ToolError;

/// Contract implemented by every tool.
///
/// A handler binds a unique name to a static descriptor and an invoke
/// operation. `invoke` validates the tool-specific arguments first, then
/// resolves credentials, then performs exactly one upstream operation and
/// serializes its result. Handlers are built once at startup and never
/// mutated.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Unique, stable name the tool is registered under.
    fn name(&self) -> &'static str;

    /// Static descriptor advertised through ListTools.
    fn descriptor(&self) -> ToolDescriptor;

    /// Execute the tool against raw call arguments.
    async fn invoke(&self, args: JsonObject) -> Result<Vec<Content>, ToolError>;
}

/// Deserialize the tool-specific parameters from raw call arguments.
///
/// Unknown keys, including the reserved credential arguments, are
/// ignored; the first missing required field fails with an error naming it.
pub fn parse_params<P: DeserializeOwned>(args: &JsonObject) -> Result<P, ToolError> {
    serde_json::from_value(Value::Object(args.clone()))
        .map_err(|e| ToolError::invalid_arguments(e.to_string()))
}

/// Serialize a tool result into a single text content item.
///
/// Output is deterministic: pretty-printed JSON with two-space indentation
/// and stable key order, so identical results serialize identically.
pub fn json_content<T: Serialize>(payload: &T) -> Result<Vec<Content>, ToolError> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|e| ToolError::internal(format!("failed to serialize tool result: {e}")))?;
    Ok(vec![Content::text(text)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct DemoParams {
        symbol: String,
        #[serde(default)]
        months: Option<u32>,
    }

    fn args(value: Value) -> JsonObject {
        value.as_object().expect("test arguments").clone()
    }

    #[test]
    fn test_parse_params_ignores_reserved_keys() {
        let params: DemoParams = parse_params(&args(json!({
            "symbol": "AAPL",
            "__credentials__": { "api_key": "k", "user_id": "u" }
        })))
        .unwrap();
        assert_eq!(params.symbol, "AAPL");
        assert_eq!(params.months, None);
    }

    #[test]
    fn test_parse_params_names_the_missing_field() {
        let err = parse_params::<DemoParams>(&JsonObject::new()).unwrap_err();
        assert!(err.to_string().contains("symbol"), "got: {err}");
    }

    #[test]
    fn test_json_content_is_stable_across_calls() {
        let payload = json!({ "b": 2, "a": 1 });
        let first = json_content(&payload).unwrap();
        let second = json_content(&payload).unwrap();

        let text = |content: &Vec<Content>| match &content[0].raw {
            RawContent::Text(t) => t.text.clone(),
            other => panic!("expected text content, got {other:?}"),
        };
        assert_eq!(text(&first), text(&second));
        assert!(text(&first).contains("\n  "));
    }
}
