//! Generic resource commands
//!
//! Resolves an API version for a resource (from its id or from its provider's
//! declared resource types), then forwards get / delete / update / tag.
//! Also covers listing with OData filters, moving resources between groups,
//! and the provider and feature commands.

use super::{present, TagFilter};
use crate::arm::client::ArmClient;
use crate::arm::models::{GenericResource, Provider, Tags};
use crate::arm::resource_id::{
    is_valid_resource_id, resource_group_scope, ResourceId, ResourcePath, ResourceType,
};
use crate::arm::resources::{self, ResourceTarget};
use crate::arm::{features, providers, resource_groups};
use crate::error::CliError;
use anyhow::Result;
use serde_json::Value;

/// Resource addressing as given on the command line
#[derive(Debug, Clone, Default)]
pub struct ResourceArgs {
    pub resource_group: Option<String>,
    pub namespace: Option<String>,
    pub parent: Option<String>,
    pub resource_type: Option<String>,
    pub name: Option<String>,
    pub id: Option<String>,
    pub api_version: Option<String>,
}

/// Pick the version to use: first non-preview entry, else the first entry
pub fn choose_api_version(versions: &[String]) -> Option<&String> {
    versions
        .iter()
        .find(|v| !v.to_lowercase().contains("preview"))
        .or_else(|| versions.first())
}

/// Find the API version for `resource_type` (or the parent's first type) in a provider
pub fn pick_api_version(
    provider: &Provider,
    parent: Option<&str>,
    resource_type: &str,
) -> Result<String, CliError> {
    // A child resource uses its parent's api-version
    let lookup = match present(parent) {
        Some(parent) => parent.split('/').next().unwrap_or(parent),
        None => resource_type,
    };

    let matches: Vec<_> = provider
        .resource_types
        .iter()
        .filter(|t| t.resource_type.eq_ignore_ascii_case(lookup))
        .collect();

    if matches.is_empty() {
        return Err(CliError::usage(format!("Resource type {} not found.", lookup)));
    }

    match matches.as_slice() {
        [only] => choose_api_version(&only.api_versions).cloned().ok_or_else(|| {
            CliError::usage(format!(
                "API version is required and could not be resolved for resource {}",
                resource_type
            ))
        }),
        _ => Err(CliError::usage(format!(
            "API version is required and could not be resolved for resource {}",
            resource_type
        ))),
    }
}

/// Look up the provider and resolve an API version from explicit parts
pub async fn resolve_api_version(
    client: &ArmClient,
    namespace: &str,
    parent: Option<&str>,
    resource_type: &str,
) -> Result<String> {
    let provider = providers::get(client, namespace).await?;
    let version = pick_api_version(&provider, parent, resource_type)?;
    tracing::debug!("Resolved api-version {} for {}/{}", version, namespace, resource_type);
    Ok(version)
}

/// Resolve an API version from a full resource id
pub async fn resolve_api_version_by_id(client: &ArmClient, id: &str) -> Result<String> {
    let lookup = ResourceId::parse(id)?.version_lookup()?;
    resolve_api_version(
        client,
        &lookup.namespace,
        lookup.parent.as_deref(),
        &lookup.resource_type,
    )
    .await
}

fn required(value: Option<String>, message: &str) -> Result<String, CliError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CliError::usage(message))
}

/// Turn command-line parts into a typed path, splitting an embedded namespace
pub fn resource_path(args: &ResourceArgs) -> Result<ResourcePath, CliError> {
    let mut namespace = args.namespace.clone().filter(|n| !n.is_empty());
    let mut resource_type = args.resource_type.clone();
    let parent = args.parent.clone().filter(|p| !p.is_empty());

    // Commands like `vm show` print types as `Namespace/type`
    if let Some(rt) = present(args.resource_type.as_deref()) {
        if namespace.is_none() && parent.is_none() {
            let parsed = ResourceType::parse(rt);
            if parsed.namespace.is_some() {
                namespace = parsed.namespace;
                resource_type = Some(parsed.resource_type);
            }
        }
    }

    let resource_group = required(args.resource_group.clone(), "--resource-group/-g is required.")?;
    let resource_type = required(resource_type, "--resource-type is required")?;
    let name = required(args.name.clone(), "--name/-n is required")?;
    let namespace = required(namespace, "--namespace is required")?;

    Ok(ResourcePath {
        resource_group,
        namespace,
        parent,
        resource_type,
        name,
    })
}

/// A resource with its API version settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub target: ResourceTarget,
    pub api_version: String,
}

impl ResolvedResource {
    pub async fn resolve(client: &ArmClient, args: &ResourceArgs) -> Result<Self> {
        let api_version = present(args.api_version.as_deref()).map(str::to_string);

        if let Some(id) = present(args.id.as_deref()) {
            let api_version = match api_version {
                Some(v) => v,
                None => resolve_api_version_by_id(client, id).await?,
            };
            return Ok(Self {
                target: ResourceTarget::Id(id.to_string()),
                api_version,
            });
        }

        let path = resource_path(args)?;
        let api_version = match api_version {
            Some(v) => v,
            None => {
                resolve_api_version(
                    client,
                    &path.namespace,
                    path.parent.as_deref(),
                    &path.resource_type,
                )
                .await?
            }
        };

        Ok(Self {
            target: ResourceTarget::Path(path),
            api_version,
        })
    }

    pub async fn get(&self, client: &ArmClient) -> Result<GenericResource> {
        resources::get(client, &self.target, &self.api_version).await
    }

    pub async fn delete(&self, client: &ArmClient) -> Result<Value> {
        tracing::info!("Deleting resource {:?}", self.target);
        resources::delete(client, &self.target, &self.api_version).await
    }

    pub async fn update(&self, client: &ArmClient, resource: &GenericResource) -> Result<Value> {
        resources::create_or_update(client, &self.target, &self.api_version, resource).await
    }

    /// Replace the tags on an existing resource; empty tags clear them
    pub async fn tag(&self, client: &ArmClient, tags: Tags) -> Result<Value> {
        let current = self.get(client).await?;
        let parameters = GenericResource {
            location: current.location,
            tags: Some(tags),
            plan: current.plan,
            properties: current.properties,
            kind: current.kind,
            managed_by: current.managed_by,
            sku: current.sku,
            identity: current.identity,
            ..Default::default()
        };
        self.update(client, &parameters).await
    }
}

pub async fn show_resource(client: &ArmClient, args: &ResourceArgs) -> Result<GenericResource> {
    ResolvedResource::resolve(client, args).await?.get(client).await
}

pub async fn delete_resource(client: &ArmClient, args: &ResourceArgs) -> Result<Value> {
    ResolvedResource::resolve(client, args).await?.delete(client).await
}

/// Merge `properties` (a JSON object) into the resource's properties and write it back
pub async fn update_resource(client: &ArmClient, args: &ResourceArgs, properties: Value) -> Result<Value> {
    let resource = ResolvedResource::resolve(client, args).await?;
    let mut current = resource.get(client).await?;

    let Value::Object(changes) = properties else {
        return Err(CliError::usage("--properties must be a JSON object").into());
    };

    let mut merged = match current.properties.take() {
        Some(Value::Object(map)) => map,
        _ => serde_json::Map::new(),
    };
    merged.extend(changes);
    current.properties = Some(Value::Object(merged));

    resource.update(client, &current).await
}

pub async fn tag_resource(client: &ArmClient, args: &ResourceArgs, tags: Tags) -> Result<Value> {
    ResolvedResource::resolve(client, args).await?.tag(client, tags).await
}

// =============================================================================
// Listing
// =============================================================================

/// Filters for `resource list`
#[derive(Debug, Clone, Default)]
pub struct ResourceFilter {
    pub resource_group: Option<String>,
    pub namespace: Option<String>,
    pub resource_type: Option<String>,
    pub name: Option<String>,
    pub tag: Option<TagFilter>,
    pub location: Option<String>,
}

impl ResourceFilter {
    /// Build the conjunctive OData filter
    pub fn to_odata(&self) -> Result<String, CliError> {
        let mut filters = Vec::new();

        if let Some(group) = present(self.resource_group.as_deref()) {
            filters.push(format!("resourceGroup eq '{}'", group));
        }
        let name = present(self.name.as_deref());
        if let Some(name) = name {
            filters.push(format!("name eq '{}'", name));
        }
        let location = present(self.location.as_deref());
        if let Some(location) = location {
            filters.push(format!("location eq '{}'", location));
        }

        let namespace = present(self.namespace.as_deref());
        match (present(self.resource_type.as_deref()), namespace) {
            (Some(rt), Some(ns)) => filters.push(format!("resourceType eq '{}/{}'", ns, rt)),
            (Some(rt), None) => {
                let parsed = ResourceType::parse(rt);
                let type_head = parsed.resource_type.split('/').next().unwrap_or_default();
                if parsed.namespace.map_or(true, |ns| ns.is_empty()) || type_head.is_empty() {
                    return Err(CliError::usage(
                        "Malformed resource-type: --resource-type=<namespace>/<resource-type> expected.",
                    ));
                }
                filters.push(format!("resourceType eq '{}'", rt));
            }
            (None, Some(_)) => {
                return Err(CliError::usage("--namespace also requires --resource-type"));
            }
            (None, None) => {}
        }

        if let Some(tag) = &self.tag {
            if name.is_some() || location.is_some() {
                return Err(CliError::usage("you cannot use the tag filter with other filters"));
            }
            if let Some(prefix) = tag.name.strip_suffix('*') {
                filters.push(format!("startswith(tagname, '{}')", prefix));
            } else if !tag.name.is_empty() {
                filters.push(format!("tagname eq '{}'", tag.name));
                if !tag.value.is_empty() {
                    filters.push(format!("tagvalue eq '{}'", tag.value));
                }
            }
        }

        Ok(filters.join(" and "))
    }
}

pub async fn list_resources(client: &ArmClient, filter: &ResourceFilter) -> Result<Vec<GenericResource>> {
    if let Some(group) = present(filter.resource_group.as_deref()) {
        // Fails with a clear error when the group does not exist
        resource_groups::get(client, group).await?;
    }

    let odata = filter.to_odata()?;
    resources::list(client, present(Some(odata.as_str()))).await
}

// =============================================================================
// Move
// =============================================================================

/// Check that every id is valid and that they share one subscription and group
pub fn validate_move(ids: &[String]) -> Result<Vec<ResourceId>, CliError> {
    let mut parsed = Vec::with_capacity(ids.len());
    for id in ids {
        if !is_valid_resource_id(id) {
            return Err(CliError::usage(format!(
                "Invalid id \"{}\", as it has no group or subscription field",
                id
            )));
        }
        parsed.push(ResourceId::parse(id)?);
    }

    let Some(first) = parsed.first() else {
        return Err(CliError::usage("--ids is required"));
    };

    if parsed.iter().any(|r| r.subscription != first.subscription) {
        return Err(CliError::usage("All resources should be under the same subscription"));
    }
    if parsed.iter().any(|r| r.resource_group != first.resource_group) {
        return Err(CliError::usage("All resources should be under the same group"));
    }

    Ok(parsed)
}

/// Move resources to another group, possibly in another subscription
pub async fn move_resource(
    client: &ArmClient,
    ids: &[String],
    destination_group: &str,
    destination_subscription_id: Option<&str>,
) -> Result<Value> {
    let parsed = validate_move(ids)?;
    let source_group = parsed[0].resource_group.clone().unwrap_or_default();

    let subscription = present(destination_subscription_id).unwrap_or(client.subscription_id.as_str());
    let target = resource_group_scope(subscription, Some(destination_group));

    tracing::info!("Moving {} resources from {} to {}", ids.len(), source_group, target);
    resources::move_resources(client, &source_group, ids, &target).await
}

// =============================================================================
// Providers and features
// =============================================================================

pub async fn register_provider(client: &ArmClient, namespace: &str) -> Result<Provider> {
    update_provider(client, namespace, true).await
}

pub async fn unregister_provider(client: &ArmClient, namespace: &str) -> Result<Provider> {
    update_provider(client, namespace, false).await
}

async fn update_provider(client: &ArmClient, namespace: &str, registering: bool) -> Result<Provider> {
    let provider = if registering {
        providers::register(client, namespace).await?
    } else {
        providers::unregister(client, namespace).await?
    };

    // Normal for providers with many regions; let the user know
    let action = if registering { "Registering" } else { "Unregistering" };
    tracing::warn!("{} {} is still on-going", action, namespace);
    eprintln!(
        "{} is still on-going. You can monitor using 'azrm provider list' ({})",
        action, namespace
    );

    Ok(provider)
}

pub async fn list_providers(client: &ArmClient) -> Result<Vec<Provider>> {
    providers::list(client).await
}

/// Namespaces of every provider
pub async fn provider_namespaces(client: &ArmClient) -> Result<Vec<String>> {
    Ok(providers::list(client)
        .await?
        .into_iter()
        .map(|p| p.namespace)
        .collect())
}

/// `namespace/type` for every resource type of every provider
pub async fn resource_type_names(client: &ArmClient) -> Result<Vec<String>> {
    Ok(providers::list(client)
        .await?
        .iter()
        .flat_map(|p| {
            p.resource_types
                .iter()
                .map(move |t| format!("{}/{}", p.namespace, t.resource_type))
        })
        .collect())
}

pub async fn list_features(client: &ArmClient, namespace: Option<&str>) -> Result<Vec<Value>> {
    features::list(client, present(namespace)).await
}
