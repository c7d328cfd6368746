//! `opsmate-core` — credential lifecycle and command-execution boundary.
//!
//! The service assumes per-caller IAM roles, caches the temporary
//! credentials with a TTL, and executes AWS CLI commands scoped to the
//! caller's profile. This crate owns everything with real invariants:
//!
//! - [`identity`] — tagged caller identity (connected vs. member accounts)
//! - [`credentials`] — concurrency-safe credential cache with expiry
//! - [`directory`] / [`assume`] — role-binding lookup and STS exchange
//! - [`gate`] — session gate guarding command execution
//! - [`policy`] / [`exec`] — verb allow-lists and shell-free execution
//! - [`profile`] — `aws configure set` profile writer

pub mod assume;
pub mod config;
pub mod credentials;
pub mod directory;
pub mod error;
pub mod exec;
pub mod gate;
pub mod identity;
pub mod policy;
pub mod profile;

pub use assume::{CredentialIssuer, StsIssuer};
pub use config::Config;
pub use credentials::{CredentialRecord, CredentialStore};
pub use directory::{DynamoRoleDirectory, RoleDirectory, RoleTables};
pub use error::{OpsmateError, Result};
pub use exec::{CliExecutor, CommandOutcome, OutcomeStatus};
pub use identity::CallerIdentity;
pub use policy::ToolKind;
pub use profile::{AwsCliProfileWriter, ProfileWriter};
