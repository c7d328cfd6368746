use std::sync::Arc;

use tracing::{info, warn};

use opsmate_core::{CliExecutor, CommandOutcome, ToolKind};

use crate::error::{AgentError, Result};
use crate::memory::ConversationMemory;
use crate::model::{AgentMessage, ChatBackend, ToolResult};
use crate::prompt::SYSTEM_PROMPT;
use crate::tools;

/// Upper bound on model/tool rounds for a single question. The original had
/// no bound; a confused model could loop on tool calls forever.
pub const MAX_TOOL_ROUNDS: usize = 8;

/// Conversational dispatcher: forwards a question plus the caller's recent
/// history to the chat backend and drives the resulting tool loop.
///
/// The dispatcher enforces the mechanical guardrails itself — the policy
/// layer filters each command, and at most one resource creation is executed
/// per request. Everything else (confirmation prompts, secret hygiene) is
/// instruction-level and delegated to the model via the system prompt.
pub struct Dispatcher {
    backend: Arc<dyn ChatBackend>,
    executor: CliExecutor,
    memory: ConversationMemory,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Dispatcher {
            backend,
            executor: CliExecutor,
            memory: ConversationMemory::default(),
        }
    }

    /// Answer one question on behalf of the caller owning `profile`.
    ///
    /// All tool executions inside this call run under that profile. The
    /// completed exchange is recorded in the caller's history window.
    pub async fn ask(&self, query: &str, profile: &str) -> Result<String> {
        let specs = tools::tool_specs();

        let mut transcript: Vec<AgentMessage> = Vec::new();
        for exchange in self.memory.history(profile) {
            transcript.push(AgentMessage::User {
                text: exchange.query,
            });
            transcript.push(AgentMessage::Assistant {
                text: exchange.reply,
                tool_calls: Vec::new(),
            });
        }
        transcript.push(AgentMessage::User {
            text: query.to_string(),
        });

        let mut creates_used = 0usize;

        for round in 0..MAX_TOOL_ROUNDS {
            let reply = self
                .backend
                .converse(SYSTEM_PROMPT, &transcript, &specs)
                .await?;

            if reply.tool_calls.is_empty() {
                info!(profile, rounds = round, "dispatch complete");
                self.memory.record(profile, query, &reply.text);
                return Ok(reply.text);
            }

            let mut results = Vec::with_capacity(reply.tool_calls.len());
            for call in &reply.tool_calls {
                let outcome = if ToolKind::from_name(&call.name) == Some(ToolKind::Create) {
                    creates_used += 1;
                    if creates_used > 1 {
                        warn!(profile, "second creation in one request refused");
                        CommandOutcome::error(
                            "only one resource creation is permitted per request; \
                             ask the user to create the next resource in a new request",
                        )
                    } else {
                        tools::dispatch(&self.executor, &call.name, &call.input, profile).await
                    }
                } else {
                    tools::dispatch(&self.executor, &call.name, &call.input, profile).await
                };
                results.push(ToolResult {
                    id: call.id.clone(),
                    outcome,
                });
            }

            transcript.push(AgentMessage::Assistant {
                text: reply.text,
                tool_calls: reply.tool_calls,
            });
            transcript.push(AgentMessage::ToolResults { results });
        }

        Err(AgentError::ToolLoopExceeded(MAX_TOOL_ROUNDS))
    }
}
