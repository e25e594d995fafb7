//! OpenAI chat-completions client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

use alfred_core::{
    ChatMessage, ChatRole, Error, GenerationConfig, LLMProvider, Result, ToolCall, ToolSpec,
};

use crate::config::OpenAIConfig;

/// OpenAI chat-completions client
pub struct OpenAIClient {
    config: OpenAIConfig,
    client: Client,
}

#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: ChatRole,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction,
}

#[derive(Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: WireMessage,
}

fn function_kind() -> String {
    "function".to_string()
}

impl WireMessage {
    fn from_message(message: &ChatMessage) -> Self {
        Self {
            role: message.role,
            content: message.content.clone(),
            tool_calls: message
                .tool_calls
                .iter()
                .map(|call| WireToolCall {
                    id: call.id.clone(),
                    kind: function_kind(),
                    function: WireFunctionCall {
                        name: call.name.clone(),
                        arguments: call.arguments.to_string(),
                    },
                })
                .collect(),
            tool_call_id: message.tool_call_id.clone(),
        }
    }

    fn into_message(self) -> ChatMessage {
        let tool_calls = self
            .tool_calls
            .into_iter()
            .map(|call| {
                // Unparseable arguments are handed to the tool verbatim
                let arguments = serde_json::from_str(&call.function.arguments)
                    .unwrap_or(Value::String(call.function.arguments));
                ToolCall {
                    id: call.id,
                    name: call.function.name,
                    arguments,
                }
            })
            .collect();

        ChatMessage {
            role: self.role,
            content: self.content,
            tool_calls,
            tool_call_id: self.tool_call_id,
        }
    }
}

impl WireTool {
    fn from_spec(spec: &ToolSpec) -> Self {
        Self {
            kind: "function",
            function: WireFunction {
                name: spec.name.clone(),
                description: spec.description.clone(),
                parameters: spec.parameters_schema(),
            },
        }
    }
}

impl OpenAIClient {
    /// Create a new OpenAI client from configuration
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Create a new OpenAI client from environment variables
    pub fn from_env() -> Result<Self> {
        let config = OpenAIConfig::from_env()?;
        Self::new(config)
    }

    /// Set the model to use for generation
    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.config.model = model_id.into();
        self
    }

    pub(crate) fn build_request<'a>(
        messages: &[ChatMessage],
        tools: &[&ToolSpec],
        config: &'a GenerationConfig,
    ) -> ChatRequest<'a> {
        ChatRequest {
            model: &config.model_id,
            messages: messages.iter().map(WireMessage::from_message).collect(),
            tools: tools.iter().map(|spec| WireTool::from_spec(spec)).collect(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }

    pub(crate) fn parse_response(body: &str) -> Result<ChatMessage> {
        let response: ChatResponse =
            serde_json::from_str(body).map_err(|e| Error::Serialization(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::LLMProvider(format!("Empty response from OpenAI API: {}", body)))?;

        Ok(choice.message.into_message())
    }

    /// Perform the actual chat completion request
    async fn perform_chat(
        &self,
        messages: &[ChatMessage],
        tools: &[&ToolSpec],
        config: &GenerationConfig,
    ) -> Result<ChatMessage> {
        let request_body = Self::build_request(messages, tools, config);
        let url = self.config.chat_completions_url();

        debug!(model = %config.model_id, messages = messages.len(), tools = tools.len(), "chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication("OpenAI rejected the API key".to_string()));
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(%status, "chat completion failed");
            return Err(Error::LLMProvider(format!(
                "OpenAI API request failed with status {}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Self::parse_response(&body)
    }
}

#[async_trait]
impl LLMProvider for OpenAIClient {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        tools: &[&ToolSpec],
        config: &GenerationConfig,
    ) -> Result<ChatMessage> {
        match timeout(config.timeout, self.perform_chat(messages, tools, config)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Timeout("Request timed out".to_string())),
        }
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alfred_core::ToolInput;
    use serde_json::json;

    fn lookup_spec() -> ToolSpec {
        ToolSpec {
            name: "guest_info_retriever".to_string(),
            description: "Retrieves information about a guest by name or relation.".to_string(),
            inputs: vec![ToolInput::string("query", "Guest name or relation")],
            output_type: "string".to_string(),
        }
    }

    #[test]
    fn test_request_wire_format() {
        let spec = lookup_spec();
        let config = GenerationConfig {
            temperature: None,
            max_tokens: 64,
            ..Default::default()
        };
        let messages = vec![
            ChatMessage::system("You are Alfred."),
            ChatMessage::assistant_tool_calls(
                None,
                vec![ToolCall {
                    id: "call_1".to_string(),
                    name: "guest_info_retriever".to_string(),
                    arguments: json!({"query": "Ada"}),
                }],
            ),
            ChatMessage::tool_result("call_1", "Name: Ada Lovelace"),
        ];

        let request = OpenAIClient::build_request(&messages, &[&spec], &config);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "model": "gpt-4o-mini",
                "max_tokens": 64,
                "messages": [
                    {"role": "system", "content": "You are Alfred."},
                    {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_1",
                            "type": "function",
                            "function": {"name": "guest_info_retriever", "arguments": "{\"query\":\"Ada\"}"}
                        }]
                    },
                    {"role": "tool", "content": "Name: Ada Lovelace", "tool_call_id": "call_1"}
                ],
                "tools": [{
                    "type": "function",
                    "function": {
                        "name": "guest_info_retriever",
                        "description": "Retrieves information about a guest by name or relation.",
                        "parameters": {
                            "type": "object",
                            "properties": {"query": {"type": "string", "description": "Guest name or relation"}},
                            "required": ["query"]
                        }
                    }
                }]
            })
        );
    }

    #[test]
    fn test_parse_tool_call_response() {
        let body = r#"{
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "finish_reason": "tool_calls",
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "guest_info_retriever", "arguments": "{\"query\": \"Ada Lovelace\"}"}
                    }]
                }
            }]
        }"#;

        let message = OpenAIClient::parse_response(body).unwrap();
        assert_eq!(message.role, ChatRole::Assistant);
        assert_eq!(
            message.tool_calls,
            vec![ToolCall {
                id: "call_abc".to_string(),
                name: "guest_info_retriever".to_string(),
                arguments: json!({"query": "Ada Lovelace"}),
            }]
        );
    }

    #[test]
    fn test_parse_text_response() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "content": "Ada is your best friend."}}]}"#;

        let message = OpenAIClient::parse_response(body).unwrap();
        assert!(!message.has_tool_calls());
        assert_eq!(message.content.as_deref(), Some("Ada is your best friend."));
    }

    #[test]
    fn test_unparseable_arguments_kept_verbatim() {
        let body = r#"{"choices": [{"message": {"role": "assistant", "tool_calls": [{"id": "c", "function": {"name": "guest_info_retriever", "arguments": "Ada Lovelace"}}]}}]}"#;

        let message = OpenAIClient::parse_response(body).unwrap();
        assert_eq!(message.tool_calls[0].arguments, json!("Ada Lovelace"));
    }

    #[test]
    fn test_empty_choices() {
        let result = OpenAIClient::parse_response(r#"{"choices": []}"#);
        assert!(matches!(result, Err(Error::LLMProvider(_))));
    }
}
