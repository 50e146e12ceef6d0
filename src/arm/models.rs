//! Wire models for the Resource Manager API
//!
//! Only the fields this tool reads or writes are typed; open-ended payloads
//! (`properties`, templates, policy rules) stay as `serde_json::Value`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub type Tags = BTreeMap<String, String>;

/// Resource group
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceGroup {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

/// Any ARM resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Tags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<Value>,
    /// Top-level fields not modelled above (`zones`, `etag`, `extendedLocation`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resource provider registration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[serde(default)]
    pub id: Option<String>,
    pub namespace: String,
    #[serde(default)]
    pub registration_state: Option<String>,
    #[serde(default)]
    pub resource_types: Vec<ProviderResourceType>,
}

/// One resource type offered by a provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResourceType {
    pub resource_type: String,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub api_versions: Vec<String>,
}

/// Deployment mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentMode {
    #[default]
    Incremental,
    Complete,
}

/// Link to a template hosted elsewhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLink {
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_version: Option<String>,
}

/// Body of a deployment or validation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_link: Option<TemplateLink>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    pub mode: DeploymentMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub properties: DeploymentProperties,
}

/// Error detail as returned by ARM
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub details: Vec<ErrorDetail>,
}

/// `{"error": {...}}` envelope used by failed calls
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

/// Result of a template export
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportTemplateResult {
    #[serde(default)]
    pub template: Option<Value>,
    /// Export can answer 200 and still carry an error here
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

/// Policy assignment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAssignment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub properties: PolicyAssignmentProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyAssignmentProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_definition_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// Policy definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub properties: PolicyDefinitionProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDefinitionProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_rule: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Lock level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockLevel {
    CanNotDelete,
    ReadOnly,
    NotSpecified,
}

impl std::str::FromStr for LockLevel {
    type Err = crate::error::CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CanNotDelete" => Ok(LockLevel::CanNotDelete),
            "ReadOnly" => Ok(LockLevel::ReadOnly),
            _ => Err(crate::error::CliError::usage(
                "--lock-type must be one of \"ReadOnly\" or \"CanNotDelete\"",
            )),
        }
    }
}

/// Management lock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementLock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub lock_type: Option<String>,
    pub properties: ManagementLockProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagementLockProperties {
    pub level: LockLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Resource link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLink {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub properties: ResourceLinkProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLinkProperties {
    pub target_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generic_resource_uses_wire_names() {
        let resource = GenericResource {
            location: Some("westus".to_string()),
            managed_by: Some("/subscriptions/x".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&resource).unwrap();
        assert_eq!(value, json!({"location": "westus", "managedBy": "/subscriptions/x"}));
    }

    #[test]
    fn test_generic_resource_keeps_unmodelled_fields() {
        let body = json!({
            "name": "vm1",
            "location": "westus",
            "zones": ["1"],
            "etag": "W/\"abc\"",
            "extendedLocation": {"name": "edge", "type": "EdgeZone"}
        });
        let resource: GenericResource = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(resource.extra.len(), 3);
        assert_eq!(serde_json::to_value(&resource).unwrap(), body);
    }

    #[test]
    fn test_provider_parses_resource_types() {
        let provider: Provider = serde_json::from_value(json!({
            "namespace": "Microsoft.Web",
            "registrationState": "Registered",
            "resourceTypes": [
                {"resourceType": "sites", "apiVersions": ["2016-08-01", "2015-08-01"]}
            ]
        }))
        .unwrap();
        assert_eq!(provider.resource_types[0].resource_type, "sites");
        assert_eq!(provider.resource_types[0].api_versions.len(), 2);
    }

    #[test]
    fn test_lock_level_parse() {
        assert_eq!("ReadOnly".parse::<LockLevel>().unwrap(), LockLevel::ReadOnly);
        let err = "readonly".parse::<LockLevel>().unwrap_err();
        assert!(err.to_string().contains("--lock-type must be one of"));
        let err = "NotSpecified".parse::<LockLevel>().unwrap_err();
        assert!(err.to_string().contains("--lock-type must be one of"));
    }

    #[test]
    fn test_lock_level_not_specified_from_wire() {
        let lock: ManagementLock = serde_json::from_value(json!({
            "name": "l1",
            "properties": {"level": "NotSpecified"}
        }))
        .unwrap();
        assert_eq!(lock.properties.level, LockLevel::NotSpecified);
    }

    #[test]
    fn test_deployment_properties_shape() {
        let props = DeploymentProperties {
            template: None,
            template_link: Some(TemplateLink {
                uri: "https://example.com/t.json".to_string(),
                content_version: None,
            }),
            parameters: Some(json!({"a": {"value": 1}})),
            mode: DeploymentMode::Complete,
        };
        let value = serde_json::to_value(Deployment { properties: props }).unwrap();
        assert_eq!(value["properties"]["mode"], "Complete");
        assert_eq!(value["properties"]["templateLink"]["uri"], "https://example.com/t.json");
        assert!(value["properties"].get("template").is_none());
    }
}
