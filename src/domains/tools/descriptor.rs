//! Static tool descriptors.
//!
//! A descriptor is the name/description/input-schema triple advertised for
//! one tool. The schema starts from the tool's schemars-derived parameter
//! struct and is then extended with the reserved credential properties, so
//! every tool advertises the same credential surface without repeating it
//! in each parameter struct.

use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{JsonObject, Tool};
use schemars::JsonSchema;
use serde_json::{Value, json};

use super::credentials::{CREDENTIALS_ARG, CredentialKeys, SERVER_CREDENTIALS_ARG, TOKEN_ARG};

/// Static schema data for one tool. Immutable once created.
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    name: &'static str,
    description: &'static str,
    input_schema: Arc<JsonObject>,
}

impl ToolDescriptor {
    /// Create a descriptor whose input schema is derived from `P`.
    pub fn new<P: JsonSchema + 'static>(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            input_schema: cached_schema_for_type::<P>(),
        }
    }

    /// Advertise the reserved credential arguments on top of the domain
    /// schema. A flat identifier property is only added when the domain
    /// schema does not already define one.
    pub fn with_credential_args(mut self, keys: &CredentialKeys) -> Self {
        let mut schema = (*self.input_schema).clone();
        let properties = schema
            .entry("properties".to_string())
            .or_insert_with(|| Value::Object(JsonObject::new()));

        if let Some(properties) = properties.as_object_mut() {
            properties.insert(
                CREDENTIALS_ARG.to_string(),
                credentials_object_schema("Credentials object", keys),
            );
            properties.insert(
                SERVER_CREDENTIALS_ARG.to_string(),
                credentials_object_schema("Server-supplied credentials object", keys),
            );
            properties.insert(
                TOKEN_ARG.to_string(),
                json!({
                    "type": "string",
                    "description": format!("{} secret for direct authentication", keys.secret),
                }),
            );
            if !properties.contains_key(keys.identifier) {
                properties.insert(
                    keys.identifier.to_string(),
                    json!({
                        "type": "string",
                        "description": format!(
                            "{} (if not provided in a credentials object)",
                            keys.identifier
                        ),
                    }),
                );
            }
        }

        self.input_schema = Arc::new(schema);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn input_schema(&self) -> &Arc<JsonObject> {
        &self.input_schema
    }

    /// Convert into the wire-level tool model.
    pub fn to_tool(&self) -> Tool {
        Tool {
            name: self.name.into(),
            description: Some(self.description.into()),
            input_schema: self.input_schema.clone(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

fn credentials_object_schema(label: &str, keys: &CredentialKeys) -> Value {
    json!({
        "type": "object",
        "description": format!("{} containing {} and {}", label, keys.secret, keys.identifier),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, JsonSchema)]
    struct DemoParams {
        /// Ticker symbol.
        #[allow(dead_code)]
        symbol: String,
    }

    const KEYS: CredentialKeys = CredentialKeys::new("api_key", "user_id");

    #[test]
    fn test_descriptor_keeps_domain_schema() {
        let descriptor = ToolDescriptor::new::<DemoParams>("demo", "A demo tool");
        assert_eq!(descriptor.name(), "demo");

        let schema = descriptor.input_schema();
        let properties = schema["properties"].as_object().unwrap();
        assert!(properties.contains_key("symbol"));

        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "symbol"));
    }

    #[test]
    fn test_credential_args_are_advertised_but_never_required() {
        let descriptor = ToolDescriptor::new::<DemoParams>("demo", "A demo tool")
            .with_credential_args(&KEYS);

        let schema = descriptor.input_schema();
        let properties = schema["properties"].as_object().unwrap();
        for key in [CREDENTIALS_ARG, SERVER_CREDENTIALS_ARG, TOKEN_ARG, "user_id"] {
            assert!(properties.contains_key(key), "missing property {key}");
        }

        let required = schema["required"].as_array().unwrap();
        assert!(!required.iter().any(|v| v == CREDENTIALS_ARG));
        assert!(!required.iter().any(|v| v == TOKEN_ARG));
    }

    #[test]
    fn test_to_tool_carries_the_augmented_schema() {
        let descriptor = ToolDescriptor::new::<DemoParams>("demo", "A demo tool")
            .with_credential_args(&KEYS);
        let tool = descriptor.to_tool();

        assert_eq!(tool.name.as_ref(), "demo");
        assert_eq!(tool.description.as_deref(), Some("A demo tool"));
        assert!(tool.input_schema["properties"]
            .as_object()
            .unwrap()
            .contains_key(CREDENTIALS_ARG));
    }
}
