//! Resource group commands

use super::{exported_template, present, TagFilter};
use crate::arm::client::ArmClient;
use crate::arm::models::{ResourceGroup, Tags};
use crate::arm::resource_groups;
use anyhow::Result;
use serde_json::Value;

/// OData filter for a `key[=value]` tag on resource groups
pub fn tag_filter(tag: &TagFilter) -> String {
    let mut filters = vec![format!("tagname eq '{}'", tag.name)];
    if !tag.value.is_empty() {
        filters.push(format!("tagvalue eq '{}'", tag.value));
    }
    filters.join(" and ")
}

/// List resource groups, optionally filtered by a tag in `key[=value]` format
pub async fn list_resource_groups(client: &ArmClient, tag: Option<&str>) -> Result<Vec<ResourceGroup>> {
    let filter = present(tag).map(|t| tag_filter(&TagFilter::parse(t)));
    resource_groups::list(client, filter.as_deref()).await
}

pub async fn create_resource_group(
    client: &ArmClient,
    name: &str,
    location: &str,
    tags: Option<Tags>,
) -> Result<ResourceGroup> {
    tracing::info!("Creating resource group {} in {}", name, location);
    let group = ResourceGroup {
        location: location.to_string(),
        tags,
        ..Default::default()
    };
    resource_groups::create_or_update(client, name, &group).await
}

/// Export options string for the export-template call
pub fn export_options(include_comments: bool, include_parameter_default_value: bool) -> Option<String> {
    let mut options = Vec::new();
    if include_comments {
        options.push("IncludeComments");
    }
    if include_parameter_default_value {
        options.push("IncludeParameterDefaultValue");
    }
    if options.is_empty() {
        None
    } else {
        Some(options.join(","))
    }
}

/// Capture a resource group as a template
pub async fn export_group_as_template(
    client: &ArmClient,
    name: &str,
    include_comments: bool,
    include_parameter_default_value: bool,
) -> Result<Value> {
    let options = export_options(include_comments, include_parameter_default_value);
    let result = resource_groups::export_template(client, name, &["*"], options.as_deref()).await?;
    Ok(exported_template(result)?)
}
