//! Resource group endpoints

use super::client::{with_filter, ArmClient, RESOURCES_API_VERSION};
use super::models::{ExportTemplateResult, ResourceGroup};
use super::{decode, decode_all};
use anyhow::Result;
use reqwest::Method;
use serde_json::json;

/// List resource groups, optionally narrowed by an OData filter
pub async fn list(client: &ArmClient, filter: Option<&str>) -> Result<Vec<ResourceGroup>> {
    let url = client.subscription_url("resourcegroups", RESOURCES_API_VERSION);
    let items = client.list(&with_filter(&url, filter)).await?;
    decode_all(items)
}

/// Get a single resource group
pub async fn get(client: &ArmClient, name: &str) -> Result<ResourceGroup> {
    let url = client.resource_group_url(name, "", RESOURCES_API_VERSION);
    decode(client.get(&url).await?)
}

/// Create or update a resource group
pub async fn create_or_update(
    client: &ArmClient,
    name: &str,
    group: &ResourceGroup,
) -> Result<ResourceGroup> {
    let url = client.resource_group_url(name, "", RESOURCES_API_VERSION);
    decode(client.put(&url, &serde_json::to_value(group)?).await?)
}

/// Capture the given resources of a group (`*` for all) as a template
pub async fn export_template(
    client: &ArmClient,
    name: &str,
    resources: &[&str],
    options: Option<&str>,
) -> Result<ExportTemplateResult> {
    let url = client.resource_group_url(name, "exportTemplate", RESOURCES_API_VERSION);
    let mut body = json!({ "resources": resources });
    if let Some(options) = options {
        body["options"] = json!(options);
    }
    let response = client
        .long_running(Method::POST, &url, Some(&body), false)
        .await?;
    decode(response)
}
