//! Resource provider endpoints

use super::client::{ArmClient, RESOURCES_API_VERSION};
use super::models::Provider;
use super::{decode, decode_all};
use anyhow::Result;

/// Get a provider with its resource types and API versions
pub async fn get(client: &ArmClient, namespace: &str) -> Result<Provider> {
    let url = client.subscription_url(&format!("providers/{}", namespace), RESOURCES_API_VERSION);
    decode(client.get(&url).await?)
}

/// List all providers visible to the subscription
pub async fn list(client: &ArmClient) -> Result<Vec<Provider>> {
    let url = client.subscription_url("providers", RESOURCES_API_VERSION);
    decode_all(client.list(&url).await?)
}

pub async fn register(client: &ArmClient, namespace: &str) -> Result<Provider> {
    let url = client.subscription_url(
        &format!("providers/{}/register", namespace),
        RESOURCES_API_VERSION,
    );
    decode(client.post(&url, None).await?)
}

pub async fn unregister(client: &ArmClient, namespace: &str) -> Result<Provider> {
    let url = client.subscription_url(
        &format!("providers/{}/unregister", namespace),
        RESOURCES_API_VERSION,
    );
    decode(client.post(&url, None).await?)
}
