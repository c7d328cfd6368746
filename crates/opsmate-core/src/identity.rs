use serde::{Deserialize, Serialize};

/// Length of the opaque external identifier issued for connected accounts.
const EXTERNAL_ID_LEN: usize = 36;

/// A caller identity, tagged by the account kind it belongs to.
///
/// Historically the two kinds were told apart by string shape everywhere a
/// lookup happened: a 36-character opaque identifier meant a connected
/// (non-member) account, anything else was treated as a member email. That
/// heuristic now lives only in [`CallerIdentity::parse`]; every consumer
/// matches on the tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "id")]
pub enum CallerIdentity {
    /// Connected external account, identified by a 36-character external ID.
    Connected(String),
    /// Member account, identified by email address.
    Member(String),
}

impl CallerIdentity {
    /// Classify a raw identifier.
    ///
    /// Exactly 36 characters ⇒ connected-account external ID; any other
    /// length ⇒ member email.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        if raw.chars().count() == EXTERNAL_ID_LEN {
            CallerIdentity::Connected(raw)
        } else {
            CallerIdentity::Member(raw)
        }
    }

    /// The raw identifier string.
    pub fn as_str(&self) -> &str {
        match self {
            CallerIdentity::Connected(id) | CallerIdentity::Member(id) => id,
        }
    }

    /// The AWS CLI profile name for this caller. The raw identifier doubles
    /// as the profile name, keeping one profile per caller.
    pub fn profile(&self) -> &str {
        self.as_str()
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, CallerIdentity::Connected(_))
    }
}

impl std::fmt::Display for CallerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
