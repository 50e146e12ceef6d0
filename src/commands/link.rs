//! Resource link commands

use super::present;
use crate::arm::client::ArmClient;
use crate::arm::links;
use crate::arm::models::{ResourceLink, ResourceLinkProperties};
use anyhow::Result;

pub async fn create_resource_link(
    client: &ArmClient,
    link_id: &str,
    target_id: &str,
    notes: Option<&str>,
) -> Result<ResourceLink> {
    let properties = ResourceLinkProperties {
        target_id: target_id.to_string(),
        notes: notes.map(str::to_string),
        source_id: None,
    };
    tracing::info!("Linking {} to {}", link_id, target_id);
    links::create_or_update(client, link_id, &properties).await
}

/// Replace the target and/or notes of an existing link
pub async fn update_resource_link(
    client: &ArmClient,
    link_id: &str,
    target_id: Option<&str>,
    notes: Option<&str>,
) -> Result<ResourceLink> {
    let current = links::get(client, link_id).await?;
    let properties = ResourceLinkProperties {
        target_id: target_id
            .map(str::to_string)
            .unwrap_or(current.properties.target_id),
        notes: notes.map(str::to_string).or(current.properties.notes),
        source_id: None,
    };
    links::create_or_update(client, link_id, &properties).await
}

/// Links under `scope`, or every link in the subscription
pub async fn list_resource_links(
    client: &ArmClient,
    scope: Option<&str>,
    filter: Option<&str>,
) -> Result<Vec<ResourceLink>> {
    match present(scope) {
        Some(scope) => links::list_at_source_scope(client, scope, present(filter)).await,
        None => links::list_at_subscription(client, present(filter)).await,
    }
}
