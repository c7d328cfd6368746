use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("model invocation failed: {0}")]
    Model(String),

    #[error("malformed model response: {0}")]
    ResponseParse(String),

    #[error("tool loop exceeded {0} rounds without a final answer")]
    ToolLoopExceeded(usize),

    #[error(transparent)]
    Core(#[from] opsmate_core::OpsmateError),
}

pub type Result<T> = std::result::Result<T, AgentError>;
