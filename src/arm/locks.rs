//! Management lock endpoints

use super::client::{with_filter, ArmClient, LOCKS_API_VERSION};
use super::models::ManagementLock;
use super::resource_id::ResourcePath;
use super::{decode, decode_all};
use anyhow::Result;

const LOCKS: &str = "providers/Microsoft.Authorization/locks";

/// The level a lock applies at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockScope {
    Subscription,
    ResourceGroup(String),
    Resource(ResourcePath),
}

impl LockScope {
    /// Subscription-relative path of the scope's lock collection
    fn collection_path(&self) -> String {
        match self {
            LockScope::Subscription => LOCKS.to_string(),
            LockScope::ResourceGroup(group) => format!("resourceGroups/{}/{}", group, LOCKS),
            LockScope::Resource(path) => format!("{}/{}", path.relative_path(), LOCKS),
        }
    }

    fn lock_url(&self, client: &ArmClient, name: &str) -> String {
        client.subscription_url(
            &format!("{}/{}", self.collection_path(), name),
            LOCKS_API_VERSION,
        )
    }
}

pub async fn get(client: &ArmClient, scope: &LockScope, name: &str) -> Result<ManagementLock> {
    decode(client.get(&scope.lock_url(client, name)).await?)
}

pub async fn create_or_update(
    client: &ArmClient,
    scope: &LockScope,
    name: &str,
    lock: &ManagementLock,
) -> Result<ManagementLock> {
    let url = scope.lock_url(client, name);
    decode(client.put(&url, &serde_json::to_value(lock)?).await?)
}

pub async fn delete(client: &ArmClient, scope: &LockScope, name: &str) -> Result<()> {
    client.delete(&scope.lock_url(client, name)).await?;
    Ok(())
}

pub async fn list(
    client: &ArmClient,
    scope: &LockScope,
    filter: Option<&str>,
) -> Result<Vec<ManagementLock>> {
    let url = client.subscription_url(&scope.collection_path(), LOCKS_API_VERSION);
    decode_all(client.list(&with_filter(&url, filter)).await?)
}
