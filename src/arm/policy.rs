//! Policy assignment and definition endpoints

use super::client::{ArmClient, POLICY_API_VERSION};
use super::models::{PolicyAssignment, PolicyDefinition};
use super::resource_id::ResourcePath;
use super::{decode, decode_all};
use anyhow::Result;

const ASSIGNMENTS: &str = "providers/Microsoft.Authorization/policyAssignments";
const DEFINITIONS: &str = "providers/Microsoft.Authorization/policyDefinitions";

fn assignment_url(client: &ArmClient, scope: &str, name: &str) -> String {
    client.url(
        &format!("{}/{}/{}", scope.trim_end_matches('/'), ASSIGNMENTS, name),
        POLICY_API_VERSION,
    )
}

// =============================================================================
// Assignments
// =============================================================================

pub async fn create_assignment(
    client: &ArmClient,
    scope: &str,
    name: &str,
    assignment: &PolicyAssignment,
) -> Result<PolicyAssignment> {
    let url = assignment_url(client, scope, name);
    decode(client.put(&url, &serde_json::to_value(assignment)?).await?)
}

pub async fn delete_assignment(client: &ArmClient, scope: &str, name: &str) -> Result<()> {
    client.delete(&assignment_url(client, scope, name)).await?;
    Ok(())
}

pub async fn get_assignment(client: &ArmClient, scope: &str, name: &str) -> Result<PolicyAssignment> {
    decode(client.get(&assignment_url(client, scope, name)).await?)
}

/// Every assignment visible in the subscription
pub async fn list_assignments(client: &ArmClient) -> Result<Vec<PolicyAssignment>> {
    let url = client.subscription_url(ASSIGNMENTS, POLICY_API_VERSION);
    decode_all(client.list(&url).await?)
}

pub async fn list_assignments_for_resource_group(
    client: &ArmClient,
    resource_group: &str,
) -> Result<Vec<PolicyAssignment>> {
    let url = client.resource_group_url(resource_group, ASSIGNMENTS, POLICY_API_VERSION);
    decode_all(client.list(&url).await?)
}

pub async fn list_assignments_for_resource(
    client: &ArmClient,
    resource: &ResourcePath,
) -> Result<Vec<PolicyAssignment>> {
    let url = client.subscription_url(
        &format!("{}/{}", resource.relative_path(), ASSIGNMENTS),
        POLICY_API_VERSION,
    );
    decode_all(client.list(&url).await?)
}

// =============================================================================
// Definitions
// =============================================================================

pub async fn get_definition(client: &ArmClient, name: &str) -> Result<PolicyDefinition> {
    let url = client.subscription_url(&format!("{}/{}", DEFINITIONS, name), POLICY_API_VERSION);
    decode(client.get(&url).await?)
}

pub async fn create_or_update_definition(
    client: &ArmClient,
    name: &str,
    definition: &PolicyDefinition,
) -> Result<PolicyDefinition> {
    let url = client.subscription_url(&format!("{}/{}", DEFINITIONS, name), POLICY_API_VERSION);
    decode(client.put(&url, &serde_json::to_value(definition)?).await?)
}

pub async fn list_definitions(client: &ArmClient) -> Result<Vec<PolicyDefinition>> {
    let url = client.subscription_url(DEFINITIONS, POLICY_API_VERSION);
    decode_all(client.list(&url).await?)
}
