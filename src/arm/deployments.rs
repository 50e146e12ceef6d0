//! Template deployment endpoints

use super::client::{ArmClient, RESOURCES_API_VERSION};
use super::decode;
use super::models::{Deployment, DeploymentProperties, ExportTemplateResult};
use anyhow::Result;
use reqwest::Method;
use serde_json::Value;

fn deployment_path(name: &str) -> String {
    format!("providers/Microsoft.Resources/deployments/{}", name)
}

/// Start (and unless `no_wait`, wait for) a deployment
pub async fn create_or_update(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    properties: &DeploymentProperties,
    no_wait: bool,
) -> Result<Value> {
    let url = client.resource_group_url(resource_group, &deployment_path(name), RESOURCES_API_VERSION);
    let body = serde_json::to_value(Deployment {
        properties: properties.clone(),
    })?;
    client.long_running(Method::PUT, &url, Some(&body), no_wait).await
}

/// Ask the service whether a deployment would be accepted
pub async fn validate(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    properties: &DeploymentProperties,
) -> Result<Value> {
    let url = client.resource_group_url(
        resource_group,
        &format!("{}/validate", deployment_path(name)),
        RESOURCES_API_VERSION,
    );
    let body = serde_json::to_value(Deployment {
        properties: properties.clone(),
    })?;
    client.post(&url, Some(&body)).await
}

pub async fn export_template(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
) -> Result<ExportTemplateResult> {
    let url = client.resource_group_url(
        resource_group,
        &format!("{}/exportTemplate", deployment_path(name)),
        RESOURCES_API_VERSION,
    );
    decode(client.post(&url, None).await?)
}

pub async fn get_operation(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    operation_id: &str,
) -> Result<Value> {
    let url = client.resource_group_url(
        resource_group,
        &format!("{}/operations/{}", deployment_path(name), operation_id),
        RESOURCES_API_VERSION,
    );
    client.get(&url).await
}
