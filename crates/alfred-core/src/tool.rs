//! Agent tool trait, static tool metadata and the tool registry

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::sync::Arc;

use crate::{Error, Result};

/// One declared input of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolInput {
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: String,
    pub description: String,
}

impl ToolInput {
    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input_type: "string".to_string(),
            description: description.into(),
        }
    }
}

/// Static metadata an orchestrator needs to bind to a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub inputs: Vec<ToolInput>,
    pub output_type: String,
}

impl ToolSpec {
    /// JSON schema describing the tool arguments
    ///
    /// Every declared input is required.
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        for input in &self.inputs {
            properties.insert(
                input.name.clone(),
                json!({
                    "type": input.input_type,
                    "description": input.description,
                }),
            );
        }

        let required: Vec<&str> = self.inputs.iter().map(|i| i.name.as_str()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

/// Trait for capabilities an agent can invoke by name
///
/// Implementations take JSON arguments matching `spec().parameters_schema()`
/// and produce a single string result.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Static metadata of the tool
    fn spec(&self) -> &ToolSpec;

    /// Invoke the tool with JSON arguments
    async fn call(&self, arguments: Value) -> Result<String>;

    fn name(&self) -> &str {
        &self.spec().name
    }
}

/// Extract a string argument from tool arguments
///
/// A bare JSON string is accepted as the value of a single-input tool.
pub fn string_argument<'a>(arguments: &'a Value, name: &str) -> Result<&'a str> {
    let value = match arguments {
        Value::String(s) => return Ok(s.as_str()),
        Value::Object(map) => map
            .get(name)
            .ok_or_else(|| Error::Query(format!("missing argument '{}'", name)))?,
        other => {
            return Err(Error::Query(format!(
                "expected an object with a '{}' argument, got {}",
                name, other
            )));
        }
    };

    value
        .as_str()
        .ok_or_else(|| Error::Query(format!("argument '{}' must be a string, got {}", name, value)))
}

/// Registry of tools available to an agent, in registration order
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.retain(|t| t.name() != tool.name());
        self.tools.push(tool);
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Declared specs of every registered tool
    pub fn specs(&self) -> Vec<&ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Dispatch a call to the named tool
    pub async fn call(&self, name: &str, arguments: Value) -> Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::ToolNotFound(name.to_string()))?;
        tool.call(arguments).await
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
