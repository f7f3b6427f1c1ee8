//! Tool registry: name-to-handler mapping with schema validation.

use super::{Tool, ToolDefinition};
use crate::error::{Result, SnakkError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Registry of available tools, keyed by name.
///
/// Registration happens once at startup; the registry is immutable during a
/// turn. Dispatch itself is side-effect-free, side effects are whatever the
/// registered handlers perform.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry pre-loaded with the built-in tools.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for tool in super::builtin_tools() {
            registry
                .register(tool)
                .expect("built-in tool names are unique");
        }
        registry
    }

    /// Register a tool. Fails if the name is already taken.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.tools.contains_key(&name) {
            return Err(SnakkError::DuplicateTool(name));
        }
        debug!("Registered tool: {}", name);
        self.tools.insert(name, tool);
        Ok(())
    }

    /// Validate arguments and execute the named tool.
    ///
    /// Handler failures surface as `ToolFailed` rather than panicking, so
    /// callers can convert them into model-visible text and continue.
    pub async fn invoke(&self, name: &str, args: &Value) -> Result<String> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| SnakkError::UnknownTool(name.to_string()))?;

        validate_args(name, &tool.parameters(), args)?;

        info!("Invoking tool: {} with args: {}", name, args);
        tool.execute(args.clone()).await.map_err(|e| match e {
            err @ SnakkError::ToolFailed { .. } => err,
            other => SnakkError::ToolFailed {
                tool: name.to_string(),
                message: other.to_string(),
            },
        })
    }

    /// Wire-facing definitions for every registered tool, sorted by name so
    /// the model sees a stable listing.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        let mut defs: Vec<ToolDefinition> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Names of all registered tools.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate an argument object against a tool's declared schema.
///
/// Checks that the payload is an object, that every `required` field is
/// present, and that declared property types match. Nested schemas are not
/// descended into; tools validate deeper structure themselves.
fn validate_args(tool: &str, schema: &Value, args: &Value) -> Result<()> {
    let invalid = |reason: String| SnakkError::InvalidArguments {
        tool: tool.to_string(),
        reason,
    };

    let obj = args
        .as_object()
        .ok_or_else(|| invalid("arguments must be a JSON object".to_string()))?;

    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for field in required.iter().filter_map(|f| f.as_str()) {
            if !obj.contains_key(field) {
                return Err(invalid(format!("missing required field '{}'", field)));
            }
        }
    }

    if let Some(props) = schema.get("properties").and_then(|p| p.as_object()) {
        for (field, value) in obj {
            let Some(expected) = props.get(field).and_then(|p| p.get("type")).and_then(|t| t.as_str())
            else {
                continue;
            };

            let matches = match expected {
                "string" => value.is_string(),
                "number" => value.is_number(),
                "integer" => value.is_i64() || value.is_u64(),
                "boolean" => value.is_boolean(),
                "array" => value.is_array(),
                "object" => value.is_object(),
                _ => true,
            };

            if !matches {
                return Err(invalid(format!(
                    "field '{}' should be of type {}",
                    field, expected
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{AddTool, WeatherTool};
    use serde_json::json;

    #[test]
    fn test_register_duplicate_fails() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(AddTool)).unwrap();

        let err = registry.register(Arc::new(AddTool)).unwrap_err();
        assert!(matches!(err, SnakkError::DuplicateTool(name) if name == "add"));
    }

    #[tokio::test]
    async fn test_invoke_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.invoke("nope", &json!({})).await.unwrap_err();
        assert!(matches!(err, SnakkError::UnknownTool(name) if name == "nope"));
    }

    #[tokio::test]
    async fn test_invoke_validates_required_fields() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(AddTool)).unwrap();

        let err = registry.invoke("add", &json!({"a": 3})).await.unwrap_err();
        assert!(matches!(err, SnakkError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_invoke_validates_types() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(AddTool)).unwrap();

        let err = registry
            .invoke("add", &json!({"a": "three", "b": 4}))
            .await
            .unwrap_err();
        assert!(matches!(err, SnakkError::InvalidArguments { .. }));
    }

    #[tokio::test]
    async fn test_invoke_executes_handler() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(AddTool)).unwrap();

        let result = registry.invoke("add", &json!({"a": 3, "b": 4})).await.unwrap();
        assert_eq!(result, "7");
    }

    #[test]
    fn test_definitions_sorted_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(WeatherTool)).unwrap();
        registry.register(Arc::new(AddTool)).unwrap();

        let defs = registry.definitions();
        assert_eq!(defs[0].name, "add");
        assert_eq!(defs[1].name, "get_weather");
    }

    #[test]
    fn test_with_builtins() {
        let registry = ToolRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            vec!["add", "divide", "get_weather", "multiply", "web_search"]
        );
    }
}
