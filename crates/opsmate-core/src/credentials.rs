use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

/// Seconds subtracted from the hard TTL so a session is treated as expired
/// shortly before STS actually invalidates it.
pub const EXPIRY_SAFETY_MARGIN_SECS: i64 = 180;

/// Temporary AWS credentials for one caller, stamped at issuance.
#[derive(Debug, Clone)]
pub struct CredentialRecord {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: String,
    pub issued_at: DateTime<Utc>,
}

/// Process-lifetime cache of temporary credentials, keyed by caller
/// identifier.
///
/// The map is guarded by an `RwLock` so concurrent configure calls cannot
/// corrupt it; two simultaneous calls for the same caller may still both
/// reach STS, in which case the later write wins. Entries are overwritten on
/// re-issuance and never evicted.
pub struct CredentialStore {
    entries: RwLock<HashMap<String, CredentialRecord>>,
    ttl: Duration,
}

impl CredentialStore {
    /// Create a store whose records live for `ttl_secs` (the requested STS
    /// session duration).
    pub fn new(ttl_secs: i64) -> Self {
        CredentialStore {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    pub fn get(&self, identity: &str) -> Option<CredentialRecord> {
        self.entries
            .read()
            .expect("credential store lock poisoned")
            .get(identity)
            .cloned()
    }

    pub fn put(&self, identity: &str, record: CredentialRecord) {
        self.entries
            .write()
            .expect("credential store lock poisoned")
            .insert(identity.to_string(), record);
    }

    /// Whether the caller's cached session is expired. An absent entry
    /// counts as expired.
    pub fn is_expired(&self, identity: &str) -> bool {
        self.is_expired_at(identity, Utc::now())
    }

    /// Expiry check against an explicit clock value:
    /// expired iff `now >= issued_at + ttl - safety_margin`.
    pub fn is_expired_at(&self, identity: &str, now: DateTime<Utc>) -> bool {
        match self.get(identity) {
            None => true,
            Some(record) => {
                let deadline =
                    record.issued_at + self.ttl - Duration::seconds(EXPIRY_SAFETY_MARGIN_SECS);
                now >= deadline
            }
        }
    }

    /// A caller is configured when a record exists and is not expired.
    pub fn has_valid(&self, identity: &str) -> bool {
        !self.is_expired(identity)
    }
}
