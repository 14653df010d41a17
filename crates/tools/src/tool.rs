use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use kaggle_core::Failure;

/// Describes a tool's interface for agent consumption.
/// Maps directly onto the MCP tool listing format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name (e.g., "search_kaggle_datasets")
    pub name: String,
    /// Human-readable description for the calling agent
    pub description: String,
    /// JSON Schema describing the expected input
    pub input_schema: Value,
}

/// The primary extension point: all tools implement this trait.
///
/// Tools are object-safe, Send + Sync, and async. `execute` returns the
/// success payload or a classified failure whose message is safe to hand
/// back to the caller.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's definition (name, description, JSON Schema).
    fn definition(&self) -> ToolDefinition;

    /// Run the tool against the given JSON input.
    async fn execute(&self, input: Value) -> Result<Value, Failure>;
}

impl fmt::Display for ToolDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_roundtrips_through_json() {
        let def = ToolDefinition {
            name: "test_tool".to_string(),
            description: "A test tool".to_string(),
            input_schema: serde_json::json!({"type": "object"}),
        };
        let json = serde_json::to_string(&def).unwrap();
        let roundtrip: ToolDefinition = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.name, "test_tool");
        assert_eq!(roundtrip.input_schema["type"], "object");
    }

    #[test]
    fn definition_display_names_the_tool() {
        let def = ToolDefinition {
            name: "t".to_string(),
            description: "d".to_string(),
            input_schema: serde_json::json!({}),
        };
        assert_eq!(def.to_string(), "t(d)");
    }
}
