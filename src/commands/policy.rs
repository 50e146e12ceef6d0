//! Policy assignment and definition commands

use super::{load_json_arg, present};
use crate::arm::client::ArmClient;
use crate::arm::models::{
    PolicyAssignment, PolicyAssignmentProperties, PolicyDefinition, PolicyDefinitionProperties,
};
use crate::arm::policy;
use crate::arm::resource_id::{resource_group_scope, ResourceId, ResourcePath};
use crate::error::CliError;
use anyhow::Result;

/// Assignment scope from an explicit scope or a resource group.
///
/// Supplying both is an error.
pub fn build_policy_scope(
    subscription_id: &str,
    resource_group: Option<&str>,
    scope: Option<&str>,
) -> Result<String, CliError> {
    match (present(scope), present(resource_group)) {
        (Some(_), Some(group)) => Err(CliError::usage(format!(
            "Resource group '{}' is redundant because 'scope' is supplied",
            group
        ))),
        (Some(scope), None) => Ok(scope.to_string()),
        (None, group) => Ok(resource_group_scope(subscription_id, group)),
    }
}

/// A definition id is used as-is; a bare name is looked up
pub async fn resolve_policy_id(client: &ArmClient, policy: &str) -> Result<String> {
    if policy.starts_with('/') {
        return Ok(policy.to_string());
    }
    let definition = policy::get_definition(client, policy).await?;
    definition
        .id
        .ok_or_else(|| anyhow::anyhow!("Policy definition '{}' has no id", policy))
}

pub async fn create_policy_assignment(
    client: &ArmClient,
    policy: &str,
    name: Option<&str>,
    display_name: Option<&str>,
    resource_group: Option<&str>,
    scope: Option<&str>,
) -> Result<PolicyAssignment> {
    let scope = build_policy_scope(&client.subscription_id, resource_group, scope)?;
    let policy_id = resolve_policy_id(client, policy).await?;
    let name = present(name)
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let assignment = PolicyAssignment {
        properties: PolicyAssignmentProperties {
            display_name: display_name.map(str::to_string),
            policy_definition_id: Some(policy_id),
            scope: Some(scope.clone()),
        },
        ..Default::default()
    };

    tracing::info!("Assigning policy {} at {}", name, scope);
    policy::create_assignment(client, &scope, &name, &assignment).await
}

pub async fn delete_policy_assignment(
    client: &ArmClient,
    name: &str,
    resource_group: Option<&str>,
    scope: Option<&str>,
) -> Result<()> {
    let scope = build_policy_scope(&client.subscription_id, resource_group, scope)?;
    policy::delete_assignment(client, &scope, name).await
}

pub async fn show_policy_assignment(
    client: &ArmClient,
    name: &str,
    resource_group: Option<&str>,
    scope: Option<&str>,
) -> Result<PolicyAssignment> {
    let scope = build_policy_scope(&client.subscription_id, resource_group, scope)?;
    policy::get_assignment(client, &scope, name).await
}

/// Where `policy assignment list` looks
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentListScope {
    Subscription,
    ResourceGroup(String),
    Resource { scope: String, path: ResourcePath },
}

impl AssignmentListScope {
    /// Interpret `--resource-group` / `--scope` for listing.
    ///
    /// A scope naming a resource is listed at that resource; a subscription or
    /// resource group scope is reduced to the matching level.
    pub fn from_args(
        subscription_id: &str,
        resource_group: Option<&str>,
        scope: Option<&str>,
    ) -> Result<Self, CliError> {
        let mut group = present(resource_group).map(str::to_string);

        if let Some(scope) = present(scope) {
            if let Some(path) = resource_scope(scope) {
                if let Some(group) = group {
                    return Err(CliError::usage(format!(
                        "Resource group '{}' is redundant because 'scope' is supplied",
                        group
                    )));
                }
                return Ok(AssignmentListScope::Resource {
                    scope: scope.to_string(),
                    path,
                });
            }

            let parts: Vec<&str> = scope.trim_matches('/').split('/').collect();
            match parts.as_slice() {
                [_, _, _, rg] => group = Some(rg.to_string()),
                [_, sub] => {
                    if !sub.eq_ignore_ascii_case(subscription_id) {
                        return Err(CliError::usage("Please use current active subscription's id"));
                    }
                }
                _ => {
                    return Err(CliError::usage(format!(
                        "Invalid scope '{}', it should point to a resource group or a resource",
                        scope
                    )))
                }
            }
        }

        Ok(match group {
            Some(group) => AssignmentListScope::ResourceGroup(group),
            None => AssignmentListScope::Subscription,
        })
    }

    /// Scope string assignments must carry under strict matching
    pub fn strict_scope(&self, subscription_id: &str) -> String {
        match self {
            AssignmentListScope::Subscription => resource_group_scope(subscription_id, None),
            AssignmentListScope::ResourceGroup(group) => {
                resource_group_scope(subscription_id, Some(group))
            }
            AssignmentListScope::Resource { scope, .. } => scope.clone(),
        }
    }
}

/// The resource a scope string names, if it names one
fn resource_scope(scope: &str) -> Option<ResourcePath> {
    let id = ResourceId::parse(scope).ok()?;
    if !id.is_resource() {
        return None;
    }
    let resource_group = id.resource_group.clone()?;
    let namespace = id.namespace.clone()?;
    let resource_type = id.resource_type.clone()?;
    let name = id.name.clone()?;

    Some(match id.child() {
        Some(child) => ResourcePath {
            resource_group,
            namespace,
            parent: Some(format!("{}/{}", resource_type, name)),
            resource_type: child.resource_type.clone(),
            name: child.name.clone(),
        },
        None => ResourcePath {
            resource_group,
            namespace,
            parent: None,
            resource_type,
            name,
        },
    })
}

/// Keep assignments whose scope equals `scope`, ignoring case
pub fn filter_strict(assignments: Vec<PolicyAssignment>, scope: &str) -> Vec<PolicyAssignment> {
    assignments
        .into_iter()
        .filter(|a| {
            a.properties
                .scope
                .as_deref()
                .is_some_and(|s| s.eq_ignore_ascii_case(scope))
        })
        .collect()
}

pub async fn list_policy_assignment(
    client: &ArmClient,
    disable_scope_strict_match: bool,
    resource_group: Option<&str>,
    scope: Option<&str>,
) -> Result<Vec<PolicyAssignment>> {
    let list_scope = AssignmentListScope::from_args(&client.subscription_id, resource_group, scope)?;

    let assignments = match &list_scope {
        AssignmentListScope::Subscription => policy::list_assignments(client).await?,
        AssignmentListScope::ResourceGroup(group) => {
            policy::list_assignments_for_resource_group(client, group).await?
        }
        AssignmentListScope::Resource { path, .. } => {
            policy::list_assignments_for_resource(client, path).await?
        }
    };

    if disable_scope_strict_match {
        return Ok(assignments);
    }
    Ok(filter_strict(
        assignments,
        &list_scope.strict_scope(&client.subscription_id),
    ))
}

// =============================================================================
// Definitions
// =============================================================================

pub async fn create_policy_definition(
    client: &ArmClient,
    name: &str,
    rules: &str,
    display_name: Option<&str>,
    description: Option<&str>,
) -> Result<PolicyDefinition> {
    let definition = PolicyDefinition {
        properties: PolicyDefinitionProperties {
            policy_rule: Some(load_json_arg(rules)?),
            description: description.map(str::to_string),
            display_name: display_name.map(str::to_string),
        },
        ..Default::default()
    };
    policy::create_or_update_definition(client, name, &definition).await
}

/// Update only the given fields of an existing definition
pub async fn update_policy_definition(
    client: &ArmClient,
    name: &str,
    rules: Option<&str>,
    display_name: Option<&str>,
    description: Option<&str>,
) -> Result<PolicyDefinition> {
    let rules = rules.map(load_json_arg).transpose()?;
    let current = policy::get_definition(client, name).await?;

    let definition = PolicyDefinition {
        properties: PolicyDefinitionProperties {
            policy_rule: rules.or(current.properties.policy_rule),
            description: description
                .map(str::to_string)
                .or(current.properties.description),
            display_name: display_name
                .map(str::to_string)
                .or(current.properties.display_name),
        },
        ..Default::default()
    };
    policy::create_or_update_definition(client, name, &definition).await
}

pub async fn list_policy_definitions(client: &ArmClient) -> Result<Vec<PolicyDefinition>> {
    policy::list_definitions(client).await
}

/// Names of every policy definition, for shell completion
pub async fn policy_completion_list(client: &ArmClient) -> Result<Vec<String>> {
    Ok(policy::list_definitions(client)
        .await?
        .into_iter()
        .filter_map(|d| d.name)
        .collect())
}

/// Names of every policy assignment, for shell completion
pub async fn policy_assignment_completion_list(client: &ArmClient) -> Result<Vec<String>> {
    Ok(policy::list_assignments(client)
        .await?
        .into_iter()
        .filter_map(|a| a.name)
        .collect())
}
