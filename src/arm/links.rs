//! Resource link endpoints
//!
//! A link id is itself a full path
//! (`/subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}/providers/Microsoft.Resources/links/{link}`).

use super::client::{with_filter, ArmClient, LINKS_API_VERSION};
use super::models::{ResourceLink, ResourceLinkProperties};
use super::{decode, decode_all};
use anyhow::Result;
use serde_json::json;

const LINKS: &str = "providers/Microsoft.Resources/links";

pub async fn get(client: &ArmClient, link_id: &str) -> Result<ResourceLink> {
    decode(client.get(&client.url(link_id, LINKS_API_VERSION)).await?)
}

pub async fn create_or_update(
    client: &ArmClient,
    link_id: &str,
    properties: &ResourceLinkProperties,
) -> Result<ResourceLink> {
    let body = json!({ "properties": properties });
    decode(client.put(&client.url(link_id, LINKS_API_VERSION), &body).await?)
}

pub async fn list_at_subscription(
    client: &ArmClient,
    filter: Option<&str>,
) -> Result<Vec<ResourceLink>> {
    let url = client.subscription_url(LINKS, LINKS_API_VERSION);
    decode_all(client.list(&with_filter(&url, filter)).await?)
}

pub async fn list_at_source_scope(
    client: &ArmClient,
    scope: &str,
    filter: Option<&str>,
) -> Result<Vec<ResourceLink>> {
    let url = client.url(
        &format!("{}/{}", scope.trim_end_matches('/'), LINKS),
        LINKS_API_VERSION,
    );
    decode_all(client.list(&with_filter(&url, filter)).await?)
}
