//! Azure Authentication
//!
//! Obtains bearer tokens for the Resource Manager audience from, in order:
//! a token in `AZURE_ACCESS_TOKEN`, a service principal described by
//! `AZURE_TENANT_ID` / `AZURE_CLIENT_ID` / `AZURE_CLIENT_SECRET`, or the
//! Azure CLI (`az account get-access-token`).

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Resource Manager token audience
pub const ARM_RESOURCE: &str = "https://management.azure.com/";

/// Default Azure AD authority
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// Refresh tokens this many seconds before they actually expire
const TOKEN_EXPIRY_BUFFER_SECS: i64 = 60;

/// Used when the token source does not report an expiry (30 minutes)
const DEFAULT_TOKEN_TTL_SECS: i64 = 30 * 60;

/// Where tokens come from
#[derive(Clone)]
pub enum TokenSource {
    /// A pre-acquired bearer token
    Static(String),
    /// OAuth2 client-credentials flow
    ServicePrincipal {
        authority: String,
        tenant_id: String,
        client_id: String,
        client_secret: String,
    },
    /// `az account get-access-token`
    AzureCli,
}

impl std::fmt::Debug for TokenSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print secrets
        match self {
            TokenSource::Static(_) => write!(f, "Static(***)"),
            TokenSource::ServicePrincipal { tenant_id, client_id, .. } => write!(
                f,
                "ServicePrincipal {{ tenant_id: {}, client_id: {} }}",
                tenant_id, client_id
            ),
            TokenSource::AzureCli => write!(f, "AzureCli"),
        }
    }
}

impl TokenSource {
    /// Pick a token source from the environment
    pub fn from_env() -> Self {
        if let Ok(token) = std::env::var("AZURE_ACCESS_TOKEN") {
            if !token.trim().is_empty() {
                return TokenSource::Static(token.trim().to_string());
            }
        }

        let tenant = std::env::var("AZURE_TENANT_ID").ok();
        let client = std::env::var("AZURE_CLIENT_ID").ok();
        let secret = std::env::var("AZURE_CLIENT_SECRET").ok();
        if let (Some(tenant_id), Some(client_id), Some(client_secret)) = (tenant, client, secret) {
            let authority = std::env::var("AZURE_AUTHORITY_HOST")
                .unwrap_or_else(|_| DEFAULT_AUTHORITY.to_string());
            return TokenSource::ServicePrincipal {
                authority,
                tenant_id,
                client_id,
                client_secret,
            };
        }

        TokenSource::AzureCli
    }
}

/// Azure credentials holder with token caching
#[derive(Clone, Debug)]
pub struct ArmCredentials {
    source: TokenSource,
    http: reqwest::Client,
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

#[derive(Clone, Debug)]
struct CachedToken {
    token: String,
    /// When this token expires (with buffer applied)
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CliTokenResponse {
    access_token: String,
    /// Epoch seconds, reported by newer CLI versions
    #[serde(default, rename = "expires_on")]
    expires_on: Option<i64>,
}

impl ArmCredentials {
    pub fn new(source: TokenSource) -> Self {
        Self {
            source,
            http: reqwest::Client::new(),
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Credentials that always hand out the given token
    pub fn from_token(token: &str) -> Self {
        Self::new(TokenSource::Static(token.to_string()))
    }

    /// Get an access token for API calls
    pub async fn get_token(&self) -> Result<String> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = cache.as_ref() {
                if cached.is_valid() {
                    return Ok(cached.token.clone());
                }
                tracing::debug!("Cached token expired, fetching new token");
            }
        }

        let (token, expires_at) = match &self.source {
            TokenSource::Static(token) => (
                token.clone(),
                Utc::now() + Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            ),
            TokenSource::ServicePrincipal {
                authority,
                tenant_id,
                client_id,
                client_secret,
            } => {
                self.client_credentials(authority, tenant_id, client_id, client_secret)
                    .await?
            }
            TokenSource::AzureCli => azure_cli_token().await?,
        };

        let expires_at = expires_at - Duration::seconds(TOKEN_EXPIRY_BUFFER_SECS);

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token.clone(),
                expires_at,
            });
        }

        tracing::debug!("New token cached, expires at {}", expires_at);

        Ok(token)
    }

    async fn client_credentials(
        &self,
        authority: &str,
        tenant_id: &str,
        client_id: &str,
        client_secret: &str,
    ) -> Result<(String, DateTime<Utc>)> {
        let url = format!(
            "{}/{}/oauth2/v2.0/token",
            authority.trim_end_matches('/'),
            tenant_id
        );
        let scope = format!("{}.default", ARM_RESOURCE);
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("scope", scope.as_str()),
        ];

        tracing::debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .form(&form)
            .send()
            .await
            .context("Failed to reach the Azure AD token endpoint")?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Token request failed: {}", status);
            return Err(anyhow::anyhow!(
                "Service principal authentication failed: {}",
                status
            ));
        }

        let token: OAuthTokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        let ttl = token.expires_in.unwrap_or(DEFAULT_TOKEN_TTL_SECS);

        Ok((token.access_token, Utc::now() + Duration::seconds(ttl)))
    }
}

async fn azure_cli_token() -> Result<(String, DateTime<Utc>)> {
    tracing::info!("Executing: az account get-access-token --resource {}", ARM_RESOURCE);

    let output = tokio::process::Command::new("az")
        .args([
            "account",
            "get-access-token",
            "--resource",
            ARM_RESOURCE,
            "--output",
            "json",
        ])
        .output()
        .await
        .context("Failed to run 'az'. Install the Azure CLI or set AZURE_ACCESS_TOKEN")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        tracing::warn!("az account get-access-token failed: {}", stderr.trim());
        return Err(anyhow::anyhow!(
            "Failed to get an access token from the Azure CLI. Run 'az login'"
        ));
    }

    let token: CliTokenResponse =
        serde_json::from_slice(&output.stdout).context("Failed to parse Azure CLI token")?;

    let expires_at = token
        .expires_on
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or_else(|| Utc::now() + Duration::seconds(DEFAULT_TOKEN_TTL_SECS));

    Ok((token.access_token, expires_at))
}

/// Azure CLI configuration directory
pub fn get_azure_config_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("AZURE_CONFIG_DIR") {
        return Some(PathBuf::from(path));
    }
    dirs::home_dir().map(|p| p.join(".azure"))
}

/// Validate a subscription id (a GUID)
pub fn validate_subscription_id(subscription: &str) -> bool {
    uuid::Uuid::parse_str(subscription).is_ok()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureProfile {
    #[serde(default)]
    subscriptions: Vec<ProfileSubscription>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileSubscription {
    id: String,
    #[serde(default)]
    is_default: bool,
}

/// Pick the default subscription out of an `azureProfile.json` document
fn default_subscription_from_profile(content: &str) -> Option<String> {
    // The CLI writes this file with a UTF-8 BOM
    let content = content.trim_start_matches('\u{feff}');
    let profile: AzureProfile = serde_json::from_str(content).ok()?;
    profile
        .subscriptions
        .into_iter()
        .find(|s| s.is_default)
        .map(|s| s.id)
        .filter(|id| validate_subscription_id(id))
}

/// Read the default subscription from the environment or the Azure CLI profile
pub fn get_default_subscription() -> Option<String> {
    if let Ok(subscription) = std::env::var("AZURE_SUBSCRIPTION_ID") {
        if validate_subscription_id(&subscription) {
            return Some(subscription);
        }
        tracing::warn!("Invalid subscription id format in AZURE_SUBSCRIPTION_ID");
    }

    let profile_path = get_azure_config_dir()?.join("azureProfile.json");
    let content = std::fs::read_to_string(profile_path).ok()?;
    default_subscription_from_profile(&content)
}
