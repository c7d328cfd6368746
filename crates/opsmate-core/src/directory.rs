use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use crate::error::{OpsmateError, Result};
use crate::identity::CallerIdentity;

/// Read-only lookup of the IAM role ARN bound to a caller.
///
/// The backing store is owned by another system; this service only ever
/// reads from it.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Return the role ARN bound to `(identity, owner)`, or `None` if no
    /// binding exists.
    async fn role_arn(&self, identity: &CallerIdentity, owner: &str) -> Result<Option<String>>;
}

/// Names of the two DynamoDB tables holding role bindings, one per account
/// kind.
#[derive(Debug, Clone)]
pub struct RoleTables {
    /// Connected accounts, keyed by `externalId` + `owner`.
    pub connected: String,
    /// Member accounts, keyed by `email` + `owner`.
    pub member: String,
}

/// DynamoDB-backed [`RoleDirectory`].
pub struct DynamoRoleDirectory {
    client: aws_sdk_dynamodb::Client,
    tables: RoleTables,
}

impl DynamoRoleDirectory {
    pub fn new(client: aws_sdk_dynamodb::Client, tables: RoleTables) -> Self {
        DynamoRoleDirectory { client, tables }
    }
}

#[async_trait]
impl RoleDirectory for DynamoRoleDirectory {
    async fn role_arn(&self, identity: &CallerIdentity, owner: &str) -> Result<Option<String>> {
        // The partition key attribute differs between the two tables.
        let (table, key_attr) = match identity {
            CallerIdentity::Connected(_) => (self.tables.connected.as_str(), "externalId"),
            CallerIdentity::Member(_) => (self.tables.member.as_str(), "email"),
        };

        debug!(table, identity = %identity, "looking up role binding");

        let response = self
            .client
            .get_item()
            .table_name(table)
            .key(key_attr, AttributeValue::S(identity.as_str().to_string()))
            .key("owner", AttributeValue::S(owner.to_string()))
            .send()
            .await
            .map_err(|e| OpsmateError::Directory(e.into_service_error().to_string()))?;

        let arn = response
            .item()
            .and_then(|item| item.get("role_arn"))
            .and_then(|attr| attr.as_s().ok())
            .cloned();

        Ok(arn)
    }
}
