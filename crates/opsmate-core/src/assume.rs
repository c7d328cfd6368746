use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::credentials::CredentialRecord;
use crate::directory::RoleDirectory;
use crate::error::{OpsmateError, Result};
use crate::identity::CallerIdentity;

/// Session name stamped on every STS AssumeRole call.
const ROLE_SESSION_NAME: &str = "opsmate-session";

/// Exchanges a caller's role binding for temporary credentials.
#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    /// Assume the role bound to `(identity, owner)` and return fresh
    /// credentials stamped with the issuance time.
    ///
    /// Fails with [`OpsmateError::NoRoleBinding`] when no binding exists.
    /// Lookup and exchange errors propagate; there is no retry.
    async fn assume(&self, identity: &CallerIdentity, owner: &str) -> Result<CredentialRecord>;
}

/// STS-backed [`CredentialIssuer`].
///
/// The connected-account path passes the caller's external ID to STS (the
/// trust policy on connected roles requires it); the member path does not.
pub struct StsIssuer {
    directory: Arc<dyn RoleDirectory>,
    sts: aws_sdk_sts::Client,
    session_duration_secs: i32,
}

impl StsIssuer {
    pub fn new(
        directory: Arc<dyn RoleDirectory>,
        sts: aws_sdk_sts::Client,
        session_duration_secs: i32,
    ) -> Self {
        StsIssuer {
            directory,
            sts,
            session_duration_secs,
        }
    }
}

#[async_trait]
impl CredentialIssuer for StsIssuer {
    async fn assume(&self, identity: &CallerIdentity, owner: &str) -> Result<CredentialRecord> {
        let role_arn = self
            .directory
            .role_arn(identity, owner)
            .await?
            .ok_or(OpsmateError::NoRoleBinding)?;

        let mut request = self
            .sts
            .assume_role()
            .role_arn(&role_arn)
            .role_session_name(ROLE_SESSION_NAME)
            .duration_seconds(self.session_duration_secs);

        if let CallerIdentity::Connected(external_id) = identity {
            request = request.external_id(external_id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| OpsmateError::AssumeRole(e.into_service_error().to_string()))?;

        let creds = response
            .credentials()
            .ok_or_else(|| OpsmateError::AssumeRole("no credentials in response".into()))?;

        info!(identity = %identity, role_arn, "assumed role");

        Ok(CredentialRecord {
            access_key_id: creds.access_key_id().to_string(),
            secret_access_key: creds.secret_access_key().to_string(),
            session_token: creds.session_token().to_string(),
            issued_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Directory stub returning a fixed binding set.
    struct FixedDirectory {
        arn: Option<String>,
    }

    #[async_trait]
    impl RoleDirectory for FixedDirectory {
        async fn role_arn(
            &self,
            _identity: &CallerIdentity,
            _owner: &str,
        ) -> Result<Option<String>> {
            Ok(self.arn.clone())
        }
    }

    /// Mirrors the real issuer's binding check without touching STS.
    struct StubIssuer {
        directory: FixedDirectory,
    }

    #[async_trait]
    impl CredentialIssuer for StubIssuer {
        async fn assume(
            &self,
            identity: &CallerIdentity,
            owner: &str,
        ) -> Result<CredentialRecord> {
            self.directory
                .role_arn(identity, owner)
                .await?
                .ok_or(OpsmateError::NoRoleBinding)?;
            Ok(CredentialRecord {
                access_key_id: "AKIASTUB".into(),
                secret_access_key: "secret".into(),
                session_token: "token".into(),
                issued_at: Utc::now(),
            })
        }
    }

    #[tokio::test]
    async fn missing_binding_fails_with_no_role_binding() {
        let issuer = StubIssuer {
            directory: FixedDirectory { arn: None },
        };
        let identity = CallerIdentity::parse("a@b.com");
        let err = issuer.assume(&identity, "o1").await.unwrap_err();
        assert!(matches!(err, OpsmateError::NoRoleBinding));
        assert_eq!(err.to_string(), "Failed to generate session.");
    }

    #[tokio::test]
    async fn present_binding_yields_stamped_record() {
        let issuer = StubIssuer {
            directory: FixedDirectory {
                arn: Some("arn:aws:iam::123456789012:role/acct".into()),
            },
        };
        let identity = CallerIdentity::parse("a@b.com");
        let before = Utc::now();
        let record = issuer.assume(&identity, "o1").await.unwrap();
        assert!(record.issued_at >= before);
        assert!(!record.access_key_id.is_empty());
    }
}
