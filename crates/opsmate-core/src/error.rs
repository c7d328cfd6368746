use thiserror::Error;

/// Error taxonomy for the credential lifecycle and command-execution
/// boundary.
///
/// Display strings double as the user-facing detail messages returned by the
/// HTTP layer, so the wording of the gate and role-binding variants is part
/// of the API contract.
#[derive(Debug, Error)]
pub enum OpsmateError {
    #[error("{0} parameter is required")]
    MissingField(&'static str),

    /// The session gate was invoked without a caller identity.
    #[error("User email required.")]
    MissingEmail,

    /// No role ARN is bound to the caller in either lookup table.
    #[error("Failed to generate session.")]
    NoRoleBinding,

    #[error("CLI not configured. Please configure the CLI before accessing this endpoint.")]
    NotConfigured,

    #[error("Session expired. CLI not configured. Please configure the CLI before accessing this endpoint.")]
    SessionExpired,

    #[error("role directory lookup failed: {0}")]
    Directory(String),

    #[error("role assumption failed: {0}")]
    AssumeRole(String),

    /// A tool-produced command was refused by the policy layer.
    #[error("command rejected: {0}")]
    CommandRejected(String),

    #[error("failed to spawn '{command}': {message}")]
    SpawnFailed { command: String, message: String },

    #[error("profile configuration failed: {0}")]
    ProfileWrite(String),
}

pub type Result<T> = std::result::Result<T, OpsmateError>;
