//! Preview feature endpoints

use super::client::{ArmClient, FEATURES_API_VERSION};
use anyhow::Result;
use serde_json::Value;

/// List features of one provider, or of every provider when `namespace` is `None`
pub async fn list(client: &ArmClient, namespace: Option<&str>) -> Result<Vec<Value>> {
    let path = match namespace {
        Some(ns) => format!("providers/Microsoft.Features/providers/{}/features", ns),
        None => "providers/Microsoft.Features/features".to_string(),
    };
    client
        .list(&client.subscription_url(&path, FEATURES_API_VERSION))
        .await
}
