use async_trait::async_trait;

use opsmate_core::CommandOutcome;

use crate::error::Result;
use crate::tools::ToolSpecDef;

/// One tool invocation requested by the model.
#[derive(Debug, Clone)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub input: serde_json::Value,
}

/// Outcome of a tool invocation, keyed back to the requesting call.
#[derive(Debug, Clone)]
pub struct ToolResult {
    pub id: String,
    pub outcome: CommandOutcome,
}

/// A single entry in the transcript sent to the model.
#[derive(Debug, Clone)]
pub enum AgentMessage {
    User { text: String },
    Assistant { text: String, tool_calls: Vec<ToolCall> },
    ToolResults { results: Vec<ToolResult> },
}

/// What the model produced for one round: free text, plus any tool calls it
/// wants executed. An empty `tool_calls` means the text is the final answer.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub text: String,
    pub tool_calls: Vec<ToolCall>,
}

/// The reasoning backend seam. The production implementation is
/// [`crate::bedrock::BedrockBackend`]; tests inject scripted replies.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn converse(
        &self,
        system: &str,
        transcript: &[AgentMessage],
        tools: &[ToolSpecDef],
    ) -> Result<ModelReply>;
}
