//! OpenAI-compatible chat-completion gateway.

use super::{ModelGateway, ModelReply, OutputSchema};
use crate::conversation::{Message, Role, ToolCallRequest};
use crate::error::{Result, SnakkError};
use crate::tools::ToolDefinition;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    ChatCompletionTool, ChatCompletionToolType, CreateChatCompletionRequestArgs, FunctionCall,
    FunctionObject, ResponseFormat, ResponseFormatJsonSchema,
};
use async_openai::Client;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default timeout for API requests (5 minutes), to prevent hung calls.
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Gateway backed by the OpenAI chat completions API.
pub struct OpenAiGateway {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAiGateway {
    /// Create a gateway for the given model.
    pub fn new(model: &str) -> Self {
        Self::with_timeout(model, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a gateway with a custom request timeout.
    pub fn with_timeout(model: &str, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client: Client::with_config(OpenAIConfig::default()).with_http_client(http_client),
            model: model.to_string(),
            temperature: None,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

#[async_trait]
impl ModelGateway for OpenAiGateway {
    #[instrument(skip_all, fields(model = %self.model, messages = messages.len()))]
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        output_schema: Option<&OutputSchema>,
    ) -> Result<ModelReply> {
        let request_messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>>>()?;

        let mut builder = CreateChatCompletionRequestArgs::default();
        builder.model(&self.model).messages(request_messages);

        if !tools.is_empty() {
            builder.tools(tools.iter().map(to_chat_completion_tool).collect::<Vec<_>>());
        }

        if let Some(temperature) = self.temperature {
            builder.temperature(temperature);
        }

        if let Some(output) = output_schema {
            builder.response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: output.name.clone(),
                    description: None,
                    schema: Some(output.schema.clone()),
                    strict: Some(true),
                },
            });
        }

        let request = builder
            .build()
            .map_err(|e| SnakkError::Upstream(format!("failed to build request: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| SnakkError::Upstream(e.to_string()))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SnakkError::MalformedReply("response carried no choices".to_string()))?;

        // Tool call branch first: an assistant turn with calls is non-terminal.
        if let Some(tool_calls) = choice.message.tool_calls {
            if !tool_calls.is_empty() {
                let calls = tool_calls
                    .into_iter()
                    .map(to_tool_call_request)
                    .collect::<Result<Vec<_>>>()?;
                debug!("Model requested {} tool call(s)", calls.len());
                return Ok(ModelReply::ToolCalls(calls));
            }
        }

        let content = choice.message.content.unwrap_or_default();

        if output_schema.is_some() {
            let value = serde_json::from_str(&content).map_err(|e| {
                SnakkError::MalformedReply(format!("structured reply is not valid JSON: {}", e))
            })?;
            return Ok(ModelReply::Structured(value));
        }

        Ok(ModelReply::Text(content))
    }
}

/// Convert a conversation message into the API request shape.
fn to_request_message(message: &Message) -> Result<ChatCompletionRequestMessage> {
    let agent_err = |e: async_openai::error::OpenAIError| {
        SnakkError::Upstream(format!("failed to build request message: {}", e))
    };

    match message.role {
        Role::System => Ok(ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map_err(agent_err)?
            .into()),

        Role::User => Ok(ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.clone())
            .build()
            .map_err(agent_err)?
            .into()),

        Role::Assistant => {
            let mut builder = ChatCompletionRequestAssistantMessageArgs::default();
            if !message.content.is_empty() {
                builder.content(message.content.clone());
            }
            if message.has_tool_calls() {
                builder.tool_calls(
                    message
                        .tool_calls
                        .iter()
                        .map(to_message_tool_call)
                        .collect::<Vec<_>>(),
                );
            }
            Ok(builder.build().map_err(agent_err)?.into())
        }

        Role::Tool => Ok(ChatCompletionRequestToolMessageArgs::default()
            .tool_call_id(message.tool_call_id.clone().unwrap_or_default())
            .content(message.content.clone())
            .build()
            .map_err(agent_err)?
            .into()),
    }
}

fn to_message_tool_call(call: &ToolCallRequest) -> ChatCompletionMessageToolCall {
    ChatCompletionMessageToolCall {
        id: call.id.clone(),
        r#type: ChatCompletionToolType::Function,
        function: FunctionCall {
            name: call.name.clone(),
            arguments: call.arguments.to_string(),
        },
    }
}

fn to_chat_completion_tool(def: &ToolDefinition) -> ChatCompletionTool {
    ChatCompletionTool {
        r#type: ChatCompletionToolType::Function,
        function: FunctionObject {
            name: def.name.clone(),
            description: Some(def.description.clone()),
            parameters: Some(def.parameters.clone()),
            strict: None,
        },
    }
}

/// Convert an API tool call into the loop's request shape.
///
/// The API ships arguments as a JSON string; a payload that does not parse
/// is a malformed reply, not a tool error.
fn to_tool_call_request(call: ChatCompletionMessageToolCall) -> Result<ToolCallRequest> {
    let arguments = serde_json::from_str(&call.function.arguments).map_err(|e| {
        SnakkError::MalformedReply(format!(
            "tool call '{}' carried unparsable arguments: {}",
            call.function.name, e
        ))
    })?;

    Ok(ToolCallRequest {
        id: call.id,
        name: call.function.name,
        arguments,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_request_message_tool_role() {
        let msg = Message::tool("call_1", "7");
        let converted = to_request_message(&msg).unwrap();
        assert!(matches!(
            converted,
            ChatCompletionRequestMessage::Tool(_)
        ));
    }

    #[test]
    fn test_to_tool_call_request_parses_arguments() {
        let call = ChatCompletionMessageToolCall {
            id: "call_1".to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: "add".to_string(),
                arguments: r#"{"a": 3, "b": 4}"#.to_string(),
            },
        };

        let request = to_tool_call_request(call).unwrap();
        assert_eq!(request.name, "add");
        assert_eq!(request.arguments, json!({"a": 3, "b": 4}));
    }

    #[test]
    fn test_to_tool_call_request_rejects_bad_json() {
        let call = ChatCompletionMessageToolCall {
            id: "call_1".to_string(),
            r#type: ChatCompletionToolType::Function,
            function: FunctionCall {
                name: "add".to_string(),
                arguments: "{not json".to_string(),
            },
        };

        let err = to_tool_call_request(call).unwrap_err();
        assert!(matches!(err, SnakkError::MalformedReply(_)));
    }
}
