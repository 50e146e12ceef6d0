//! Generic resource endpoints
//!
//! A resource is reached either by its full id or by its parts; both map to
//! the same URL shape so every call here takes a [`ResourceTarget`].

use super::client::{with_filter, ArmClient, RESOURCES_API_VERSION};
use super::models::GenericResource;
use super::resource_id::ResourcePath;
use super::{decode, decode_all};
use anyhow::Result;
use reqwest::Method;
use serde_json::{json, Value};

/// How a resource is addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceTarget {
    Id(String),
    Path(ResourcePath),
}

impl ResourceTarget {
    /// Request URL for this resource at the given API version
    pub fn url(&self, client: &ArmClient, api_version: &str) -> String {
        match self {
            ResourceTarget::Id(id) => client.url(id, api_version),
            ResourceTarget::Path(path) => client.subscription_url(&path.relative_path(), api_version),
        }
    }
}

/// List resources in the subscription matching an OData filter
pub async fn list(client: &ArmClient, filter: Option<&str>) -> Result<Vec<GenericResource>> {
    let url = client.subscription_url("resources", RESOURCES_API_VERSION);
    let items = client.list(&with_filter(&url, filter)).await?;
    decode_all(items)
}

pub async fn get(client: &ArmClient, target: &ResourceTarget, api_version: &str) -> Result<GenericResource> {
    decode(client.get(&target.url(client, api_version)).await?)
}

pub async fn delete(client: &ArmClient, target: &ResourceTarget, api_version: &str) -> Result<Value> {
    client
        .long_running(Method::DELETE, &target.url(client, api_version), None, false)
        .await
}

pub async fn create_or_update(
    client: &ArmClient,
    target: &ResourceTarget,
    api_version: &str,
    resource: &GenericResource,
) -> Result<Value> {
    let body = serde_json::to_value(resource)?;
    client
        .long_running(Method::PUT, &target.url(client, api_version), Some(&body), false)
        .await
}

/// Move resources out of `source_group` into the group identified by `target_group_id`
pub async fn move_resources(
    client: &ArmClient,
    source_group: &str,
    ids: &[String],
    target_group_id: &str,
) -> Result<Value> {
    let url = client.resource_group_url(source_group, "moveResources", RESOURCES_API_VERSION);
    let body = json!({
        "resources": ids,
        "targetResourceGroup": target_group_id,
    });
    client.long_running(Method::POST, &url, Some(&body), false).await
}
