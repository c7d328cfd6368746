use crate::credentials::CredentialStore;
use crate::error::{OpsmateError, Result};

/// Session gate: verify that a caller has a valid, non-expired session
/// before any command execution is reachable for their requests.
///
/// Checks run in order and stop at the first failure:
/// 1. identity present,
/// 2. a credential record exists,
/// 3. the record is not expired.
///
/// The gate performs no side effects.
pub fn require_configured(store: &CredentialStore, identity: Option<&str>) -> Result<()> {
    let identity = match identity {
        Some(id) if !id.is_empty() => id,
        _ => return Err(OpsmateError::MissingEmail),
    };
    if store.get(identity).is_none() {
        return Err(OpsmateError::NotConfigured);
    }
    if store.is_expired(identity) {
        return Err(OpsmateError::SessionExpired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::CredentialRecord;
    use chrono::{Duration, Utc};

    fn record(age_secs: i64) -> CredentialRecord {
        CredentialRecord {
            access_key_id: "AKIATEST".into(),
            secret_access_key: "secret".into(),
            session_token: "token".into(),
            issued_at: Utc::now() - Duration::seconds(age_secs),
        }
    }

    #[test]
    fn missing_identity_is_rejected_first() {
        let store = CredentialStore::new(3600);
        let err = require_configured(&store, None).unwrap_err();
        assert!(matches!(err, OpsmateError::MissingEmail));
        assert_eq!(err.to_string(), "User email required.");
        let err = require_configured(&store, Some("")).unwrap_err();
        assert!(matches!(err, OpsmateError::MissingEmail));
    }

    #[test]
    fn unknown_identity_is_not_configured() {
        let store = CredentialStore::new(3600);
        let err = require_configured(&store, Some("a@b.com")).unwrap_err();
        assert!(matches!(err, OpsmateError::NotConfigured));
    }

    #[test]
    fn expired_record_reports_session_expired() {
        let store = CredentialStore::new(3600);
        store.put("a@b.com", record(3600));
        let err = require_configured(&store, Some("a@b.com")).unwrap_err();
        assert!(matches!(err, OpsmateError::SessionExpired));
    }

    #[test]
    fn fresh_record_passes() {
        let store = CredentialStore::new(3600);
        store.put("a@b.com", record(0));
        assert!(require_configured(&store, Some("a@b.com")).is_ok());
    }

    #[test]
    fn configure_then_gate_round_trip() {
        // Mirrors the configure-cli → get-response sequence.
        let store = CredentialStore::new(3600);
        assert!(require_configured(&store, Some("x@y.com")).is_err());
        store.put("x@y.com", record(0));
        assert!(require_configured(&store, Some("x@y.com")).is_ok());
    }
}
