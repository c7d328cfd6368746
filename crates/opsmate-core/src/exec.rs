use serde::{Deserialize, Serialize};
use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::{OpsmateError, Result};
use crate::policy::{self, ToolKind};

/// Result of one CLI invocation, returned to the reasoning layer as data.
/// A non-zero exit is an `error` outcome, not a transport failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandOutcome {
    pub status: OutcomeStatus,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    Success,
    Error,
}

impl CommandOutcome {
    pub fn success(message: impl Into<String>) -> Self {
        CommandOutcome {
            status: OutcomeStatus::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        CommandOutcome {
            status: OutcomeStatus::Error,
            message: message.into(),
        }
    }
}

/// Runs AWS CLI commands scoped to a caller's profile.
///
/// Commands are tokenized and spawned as argv directly — nothing passes
/// through a shell, so reasoning-layer output cannot smuggle in shell
/// metacharacters. Profile selection is appended here from the request
/// context; the policy layer has already rejected any `--profile` token in
/// the command itself.
#[derive(Debug, Default)]
pub struct CliExecutor;

impl CliExecutor {
    /// Prepend `aws ` when the command lacks the expected invocation token.
    pub fn normalize(command: &str) -> String {
        let trimmed = command.trim();
        if trimmed == "aws" || trimmed.starts_with("aws ") {
            trimmed.to_string()
        } else {
            format!("aws {trimmed}")
        }
    }

    /// Tokenize, policy-check, and run a command under `profile`.
    ///
    /// `additional_args` (get variant only) are concatenated before
    /// tokenization. Policy violations and malformed quoting surface as
    /// [`OpsmateError::CommandRejected`]; spawn failures as
    /// [`OpsmateError::SpawnFailed`]. No timeout is enforced — a hung CLI
    /// process blocks the calling request.
    pub async fn run(
        &self,
        kind: ToolKind,
        command: &str,
        additional_args: Option<&str>,
        profile: &str,
    ) -> Result<CommandOutcome> {
        let mut text = Self::normalize(command);
        if let Some(args) = additional_args {
            if !args.trim().is_empty() {
                text.push(' ');
                text.push_str(args.trim());
            }
        }

        let argv = shlex::split(&text).ok_or_else(|| {
            OpsmateError::CommandRejected("unbalanced quoting in command".into())
        })?;
        policy::check(kind, &argv)?;

        debug!(command = %text, profile, "executing CLI command");

        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .arg("--profile")
            .arg(profile)
            .output()
            .await
            .map_err(|e| OpsmateError::SpawnFailed {
                command: argv[0].clone(),
                message: e.to_string(),
            })?;

        Ok(Self::classify(output))
    }

    /// Map process output to an outcome: exit 0 yields `success` carrying
    /// stdout, anything else yields `error` carrying stderr.
    fn classify(output: std::process::Output) -> CommandOutcome {
        if output.status.success() {
            CommandOutcome::success(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            warn!(code = output.status.code(), "CLI command exited non-zero");
            CommandOutcome::error(String::from_utf8_lossy(&output.stderr).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_prefixes_bare_commands() {
        assert_eq!(
            CliExecutor::normalize("ec2 describe-instances"),
            "aws ec2 describe-instances"
        );
    }

    #[test]
    fn normalize_keeps_prefixed_commands() {
        assert_eq!(
            CliExecutor::normalize("aws ec2 describe-instances"),
            "aws ec2 describe-instances"
        );
    }

    #[test]
    fn normalize_does_not_match_prefix_substrings() {
        // "awsum" is not the aws invocation token.
        assert_eq!(CliExecutor::normalize("awsum foo"), "aws awsum foo");
    }

    #[cfg(unix)]
    fn finished(code: i32, stdout: &str, stderr: &str) -> std::process::Output {
        use std::os::unix::process::ExitStatusExt;
        std::process::Output {
            // Wait status encoding: exit code lives in the high byte.
            status: std::process::ExitStatus::from_raw(code << 8),
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        }
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_classifies_as_success_with_stdout() {
        let outcome = CliExecutor::classify(finished(0, "i-0abc123\n", ""));
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert_eq!(outcome.message, "i-0abc123\n");
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_classifies_as_error_with_stderr() {
        let outcome = CliExecutor::classify(finished(
            254,
            "partial output",
            "An error occurred (AccessDenied)\n",
        ));
        assert_eq!(outcome.status, OutcomeStatus::Error);
        assert_eq!(outcome.message, "An error occurred (AccessDenied)\n");
    }

    #[tokio::test]
    async fn policy_violation_is_rejected_before_spawn() {
        let exec = CliExecutor;
        let err = exec
            .run(ToolKind::Get, "ec2 terminate-instances", None, "p1")
            .await
            .unwrap_err();
        assert!(matches!(err, OpsmateError::CommandRejected(_)));
    }

    #[tokio::test]
    async fn unbalanced_quotes_are_rejected() {
        let exec = CliExecutor;
        let err = exec
            .run(
                ToolKind::Get,
                "ec2 describe-instances --filters 'Name=foo",
                None,
                "p1",
            )
            .await
            .unwrap_err();
        assert!(matches!(err, OpsmateError::CommandRejected(_)));
    }

    #[tokio::test]
    async fn additional_args_are_appended_before_policy_check() {
        let exec = CliExecutor;
        // additional_args may not smuggle a profile override either.
        let err = exec
            .run(
                ToolKind::Get,
                "ec2 describe-instances",
                Some("--profile other"),
                "p1",
            )
            .await
            .unwrap_err();
        assert!(err.to_string().contains("--profile"));
    }
}
