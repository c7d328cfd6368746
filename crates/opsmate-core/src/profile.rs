use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use crate::credentials::CredentialRecord;
use crate::error::{OpsmateError, Result};

/// Persists assumed credentials into a named AWS CLI profile so subsequent
/// `aws … --profile <caller>` invocations pick them up.
#[async_trait]
pub trait ProfileWriter: Send + Sync {
    async fn write(&self, profile: &str, record: &CredentialRecord, region: &str) -> Result<()>;
}

/// Writes profiles with `aws configure set`, one key per invocation, argv
/// only (no shell).
#[derive(Debug, Default)]
pub struct AwsCliProfileWriter;

impl AwsCliProfileWriter {
    async fn set(&self, profile: &str, key: &str, value: &str) -> Result<()> {
        let output = Command::new("aws")
            .args(["configure", "set", key, value, "--profile", profile])
            .output()
            .await
            .map_err(|e| OpsmateError::SpawnFailed {
                command: "aws".into(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(OpsmateError::ProfileWrite(format!(
                "aws configure set {key} failed: {stderr}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileWriter for AwsCliProfileWriter {
    async fn write(&self, profile: &str, record: &CredentialRecord, region: &str) -> Result<()> {
        self.set(profile, "aws_access_key_id", &record.access_key_id)
            .await?;
        self.set(profile, "aws_secret_access_key", &record.secret_access_key)
            .await?;
        self.set(profile, "aws_session_token", &record.session_token)
            .await?;
        self.set(profile, "region", region).await?;

        info!(profile, region, "CLI profile configured");
        Ok(())
    }
}
