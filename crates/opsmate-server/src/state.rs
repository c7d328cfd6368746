use std::sync::Arc;

use opsmate_agent::Dispatcher;
use opsmate_core::{CredentialIssuer, CredentialStore, ProfileWriter};

/// One dispatcher per reasoning backend route.
pub struct Backends {
    pub default: Dispatcher,
    pub sonnet: Dispatcher,
    pub haiku: Dispatcher,
}

/// Shared application state passed to all route handlers.
///
/// The issuer and profile writer sit behind trait objects so integration
/// tests can exercise the full HTTP surface without AWS or a local `aws`
/// binary.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CredentialStore>,
    pub issuer: Arc<dyn CredentialIssuer>,
    pub profile_writer: Arc<dyn ProfileWriter>,
    pub backends: Arc<Backends>,
    /// Region written into caller profiles.
    pub region: String,
}

impl AppState {
    pub fn new(
        store: Arc<CredentialStore>,
        issuer: Arc<dyn CredentialIssuer>,
        profile_writer: Arc<dyn ProfileWriter>,
        backends: Arc<Backends>,
        region: impl Into<String>,
    ) -> Self {
        AppState {
            store,
            issuer,
            profile_writer,
            backends,
            region: region.into(),
        }
    }
}
