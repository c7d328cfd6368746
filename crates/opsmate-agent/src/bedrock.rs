//! Bedrock Converse implementation of the chat backend, with tool calling.

use async_trait::async_trait;
use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock, Tool, ToolConfiguration,
    ToolInputSchema, ToolResultBlock, ToolResultContentBlock, ToolSpecification, ToolUseBlock,
};
use aws_smithy_types::{Document, Number};
use tracing::debug;

use opsmate_core::OutcomeStatus;

use crate::error::{AgentError, Result};
use crate::model::{AgentMessage, ChatBackend, ModelReply, ToolCall};
use crate::tools::ToolSpecDef;

pub struct BedrockBackend {
    client: aws_sdk_bedrockruntime::Client,
    model_id: String,
}

impl BedrockBackend {
    pub fn new(client: aws_sdk_bedrockruntime::Client, model_id: impl Into<String>) -> Self {
        BedrockBackend {
            client,
            model_id: model_id.into(),
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[async_trait]
impl ChatBackend for BedrockBackend {
    async fn converse(
        &self,
        system: &str,
        transcript: &[AgentMessage],
        tools: &[ToolSpecDef],
    ) -> Result<ModelReply> {
        let messages = transcript
            .iter()
            .map(to_bedrock_message)
            .collect::<Result<Vec<_>>>()?;

        let tool_config = to_tool_configuration(tools)?;

        debug!(model_id = %self.model_id, turns = messages.len(), "invoking converse");

        let response = self
            .client
            .converse()
            .model_id(&self.model_id)
            .system(SystemContentBlock::Text(system.to_string()))
            .set_messages(Some(messages))
            .tool_config(tool_config)
            .send()
            .await
            .map_err(|e| AgentError::Model(e.into_service_error().to_string()))?;

        let output = response
            .output()
            .and_then(|o| o.as_message().ok())
            .ok_or_else(|| AgentError::ResponseParse("no message in response".into()))?;

        let mut text_parts: Vec<&str> = Vec::new();
        let mut tool_calls: Vec<ToolCall> = Vec::new();
        for block in output.content() {
            match block {
                ContentBlock::Text(t) => text_parts.push(t.as_str()),
                ContentBlock::ToolUse(tool_use) => tool_calls.push(ToolCall {
                    id: tool_use.tool_use_id().to_string(),
                    name: tool_use.name().to_string(),
                    input: document_to_json(tool_use.input()),
                }),
                _ => {}
            }
        }

        Ok(ModelReply {
            text: text_parts.join(""),
            tool_calls,
        })
    }
}

fn to_bedrock_message(message: &AgentMessage) -> Result<Message> {
    let (role, content) = match message {
        AgentMessage::User { text } => (
            ConversationRole::User,
            vec![ContentBlock::Text(text.clone())],
        ),
        AgentMessage::Assistant { text, tool_calls } => {
            let mut blocks = Vec::new();
            if !text.is_empty() {
                blocks.push(ContentBlock::Text(text.clone()));
            }
            for call in tool_calls {
                let block = ToolUseBlock::builder()
                    .tool_use_id(&call.id)
                    .name(&call.name)
                    .input(json_to_document(&call.input))
                    .build()
                    .map_err(|e| AgentError::Model(e.to_string()))?;
                blocks.push(ContentBlock::ToolUse(block));
            }
            (ConversationRole::Assistant, blocks)
        }
        // Tool results travel back on a user-role message per the Converse
        // protocol.
        AgentMessage::ToolResults { results } => {
            let mut blocks = Vec::new();
            for result in results {
                let payload = serde_json::json!({
                    "status": match result.outcome.status {
                        OutcomeStatus::Success => "success",
                        OutcomeStatus::Error => "error",
                    },
                    "message": result.outcome.message,
                });
                let block = ToolResultBlock::builder()
                    .tool_use_id(&result.id)
                    .content(ToolResultContentBlock::Json(json_to_document(&payload)))
                    .build()
                    .map_err(|e| AgentError::Model(e.to_string()))?;
                blocks.push(ContentBlock::ToolResult(block));
            }
            (ConversationRole::User, blocks)
        }
    };

    Message::builder()
        .role(role)
        .set_content(Some(content))
        .build()
        .map_err(|e| AgentError::Model(e.to_string()))
}

fn to_tool_configuration(tools: &[ToolSpecDef]) -> Result<ToolConfiguration> {
    let mut builder = ToolConfiguration::builder();
    for tool in tools {
        let spec = ToolSpecification::builder()
            .name(tool.name)
            .description(tool.description)
            .input_schema(ToolInputSchema::Json(json_to_document(&tool.schema)))
            .build()
            .map_err(|e| AgentError::Model(e.to_string()))?;
        builder = builder.tools(Tool::ToolSpec(spec));
    }
    builder
        .build()
        .map_err(|e| AgentError::Model(e.to_string()))
}

/// Convert `serde_json::Value` into the smithy `Document` the Converse API
/// expects for tool schemas and inputs.
pub fn json_to_document(value: &serde_json::Value) -> Document {
    match value {
        serde_json::Value::Null => Document::Null,
        serde_json::Value::Bool(b) => Document::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Document::Number(Number::PosInt(u))
            } else if let Some(i) = n.as_i64() {
                Document::Number(Number::NegInt(i))
            } else {
                Document::Number(Number::Float(n.as_f64().unwrap_or(0.0)))
            }
        }
        serde_json::Value::String(s) => Document::String(s.clone()),
        serde_json::Value::Array(items) => {
            Document::Array(items.iter().map(json_to_document).collect())
        }
        serde_json::Value::Object(map) => Document::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), json_to_document(v)))
                .collect(),
        ),
    }
}

/// Convert a smithy `Document` (tool-use input) back into `serde_json::Value`.
pub fn document_to_json(doc: &Document) -> serde_json::Value {
    match doc {
        Document::Null => serde_json::Value::Null,
        Document::Bool(b) => serde_json::Value::Bool(*b),
        Document::Number(Number::PosInt(u)) => serde_json::json!(u),
        Document::Number(Number::NegInt(i)) => serde_json::json!(i),
        Document::Number(Number::Float(f)) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Document::String(s) => serde_json::Value::String(s.clone()),
        Document::Array(items) => {
            serde_json::Value::Array(items.iter().map(document_to_json).collect())
        }
        Document::Object(map) => serde_json::Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), document_to_json(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_round_trip_preserves_structure() {
        let value = serde_json::json!({
            "aws_cli_command": "ec2 describe-instances",
            "count": 3,
            "flags": ["--output", "json"],
            "nested": {"ok": true, "ratio": 0.5},
            "none": null,
        });
        let round_tripped = document_to_json(&json_to_document(&value));
        assert_eq!(round_tripped, value);
    }

    #[test]
    fn negative_numbers_survive_conversion() {
        let value = serde_json::json!({"offset": -42});
        assert_eq!(document_to_json(&json_to_document(&value)), value);
    }

    #[test]
    fn tool_configuration_builds_from_specs() {
        let config = to_tool_configuration(&crate::tools::tool_specs()).unwrap();
        assert_eq!(config.tools().len(), 5);
    }

    #[test]
    fn assistant_message_with_tool_call_converts() {
        let message = AgentMessage::Assistant {
            text: "running it".into(),
            tool_calls: vec![ToolCall {
                id: "t1".into(),
                name: "aws_cli_get_tool".into(),
                input: serde_json::json!({"aws_cli_command": "s3 ls"}),
            }],
        };
        let converted = to_bedrock_message(&message).unwrap();
        assert_eq!(*converted.role(), ConversationRole::Assistant);
        assert_eq!(converted.content().len(), 2);
    }
}
