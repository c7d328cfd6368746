//! `opsmate-agent` — conversational dispatcher over the Bedrock Converse API.
//!
//! A question flows through the dispatcher into a bounded tool loop: the
//! model picks one of five AWS CLI tool variants, the command is
//! policy-checked and executed under the caller's profile by
//! `opsmate-core`, and the outcome is fed back until the model produces a
//! final text answer.
//!
//! The [`ChatBackend`] trait is the seam between the dispatcher and the
//! model; production uses [`BedrockBackend`], tests inject scripted replies.

pub mod bedrock;
pub mod dispatcher;
pub mod error;
pub mod memory;
pub mod model;
pub mod prompt;
pub mod tools;

pub use bedrock::BedrockBackend;
pub use dispatcher::Dispatcher;
pub use error::{AgentError, Result};
pub use memory::ConversationMemory;
pub use model::{AgentMessage, ChatBackend, ModelReply, ToolCall, ToolResult};
pub use tools::ToolSpecDef;
