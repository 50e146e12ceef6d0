//! Resource Manager client
//!
//! Main client for the management API, combining authentication, HTTP
//! functionality and URL construction. Constructed once and passed to every
//! operation.

use super::auth::ArmCredentials;
use super::http::{ArmHttpClient, ArmResponse};
use crate::error::CliError;
use anyhow::{Context, Result};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

/// Public cloud management endpoint
pub const DEFAULT_ENDPOINT: &str = "https://management.azure.com";

/// API version used for resource, group, deployment and provider calls
pub const RESOURCES_API_VERSION: &str = "2016-09-01";
/// API version used for policy calls
pub const POLICY_API_VERSION: &str = "2016-12-01";
/// API version used for management lock calls
pub const LOCKS_API_VERSION: &str = "2016-09-01";
/// API version used for resource link calls
pub const LINKS_API_VERSION: &str = "2016-09-01";
/// API version used for preview feature calls
pub const FEATURES_API_VERSION: &str = "2015-12-01";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
/// One hour at the default interval
const DEFAULT_MAX_POLLS: u32 = 720;

/// Main management client
#[derive(Clone, Debug)]
pub struct ArmClient {
    pub credentials: ArmCredentials,
    pub http: ArmHttpClient,
    pub endpoint: String,
    pub subscription_id: String,
    pub poll_interval: Duration,
    pub max_polls: u32,
}

impl ArmClient {
    /// Create a new client
    pub fn new(subscription_id: &str, endpoint: &str, credentials: ArmCredentials) -> Result<Self> {
        let parsed = url::Url::parse(endpoint)
            .with_context(|| format!("Invalid management endpoint '{}'", endpoint))?;
        if parsed.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Invalid management endpoint '{}'", endpoint));
        }

        Ok(Self {
            credentials,
            http: ArmHttpClient::new()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        })
    }

    /// Cap the number of status polls for one long-running operation
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    /// Override the long-running operation poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Get the current access token
    pub async fn get_token(&self) -> Result<String> {
        self.credentials.get_token().await
    }

    /// Make a GET request
    pub async fn get(&self, url: &str) -> Result<Value> {
        let token = self.get_token().await?;
        self.http.get(url, &token).await
    }

    /// Make a PUT request
    pub async fn put(&self, url: &str, body: &Value) -> Result<Value> {
        let token = self.get_token().await?;
        self.http.put(url, &token, body).await
    }

    /// Make a POST request
    pub async fn post(&self, url: &str, body: Option<&Value>) -> Result<Value> {
        let token = self.get_token().await?;
        self.http.post(url, &token, body).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str) -> Result<Value> {
        let token = self.get_token().await?;
        self.http.delete(url, &token).await
    }

    /// Fetch every page of a list call (`value` + `nextLink`)
    pub async fn list(&self, url: &str) -> Result<Vec<Value>> {
        let mut items = Vec::new();
        let mut next = Some(url.to_string());

        while let Some(page_url) = next {
            let page = self.get(&page_url).await?;

            if let Some(values) = page.get("value").and_then(|v| v.as_array()) {
                items.extend(values.iter().cloned());
            }

            next = page
                .get("nextLink")
                .and_then(|v| v.as_str())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string());
        }

        Ok(items)
    }

    /// Send a request that may complete asynchronously.
    ///
    /// With `no_wait` the initial answer is returned as-is; otherwise the
    /// operation is polled until it reaches a terminal state.
    pub async fn long_running(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
        no_wait: bool,
    ) -> Result<Value> {
        let token = self.get_token().await?;
        let response = self
            .http
            .send(method.clone(), url, &token, body)
            .await?;

        if no_wait || !response.is_pending() {
            return Ok(response.body);
        }

        self.wait_for_completion(method, url, response).await
    }

    async fn wait_for_completion(
        &self,
        method: Method,
        url: &str,
        initial: ArmResponse,
    ) -> Result<Value> {
        let mut delay = self.delay(initial.retry_after);
        let mut poll_count = 0;

        if let Some(status_url) = initial.async_operation.as_deref() {
            loop {
                self.check_poll_budget(&mut poll_count, status_url)?;
                tokio::time::sleep(delay).await;
                let token = self.get_token().await?;
                let poll = self
                    .http
                    .send(Method::GET, status_url, &token, None)
                    .await?;

                let state = poll
                    .body
                    .get("status")
                    .and_then(|v| v.as_str())
                    .unwrap_or("InProgress")
                    .to_string();
                tracing::debug!("Operation status: {}", state);

                match state.as_str() {
                    "Succeeded" => break,
                    "Failed" | "Canceled" => return Err(operation_failed(&state, &poll.body).into()),
                    _ => delay = self.delay(poll.retry_after),
                }
            }

            return match method {
                Method::PUT | Method::PATCH => self.get(url).await,
                Method::DELETE => Ok(Value::Null),
                _ => match initial.location.as_deref() {
                    Some(location) => self.get(location).await,
                    None => Ok(Value::Null),
                },
            };
        }

        let Some(location) = initial.location.as_deref() else {
            return Ok(initial.body);
        };

        loop {
            self.check_poll_budget(&mut poll_count, location)?;
            tokio::time::sleep(delay).await;
            let token = self.get_token().await?;
            let poll = self.http.send(Method::GET, location, &token, None).await?;
            if poll.status != 202 {
                return Ok(poll.body);
            }
            delay = self.delay(poll.retry_after);
        }
    }

    fn check_poll_budget(&self, poll_count: &mut u32, status_url: &str) -> Result<()> {
        if *poll_count >= self.max_polls {
            tracing::warn!("Giving up on {} after {} polls", status_url, poll_count);
            return Err(anyhow::anyhow!(
                "Operation still running after {} status checks; it can be followed at {}",
                poll_count,
                status_url
            ));
        }
        *poll_count += 1;
        Ok(())
    }

    fn delay(&self, retry_after: Option<u64>) -> Duration {
        retry_after
            .map(Duration::from_secs)
            .unwrap_or(self.poll_interval)
    }

    // =========================================================================
    // URL helpers
    // =========================================================================

    /// Build a URL from an absolute path (`/subscriptions/...`)
    pub fn url(&self, path: &str, api_version: &str) -> String {
        format!(
            "{}/{}?api-version={}",
            self.endpoint,
            path.trim_start_matches('/'),
            api_version
        )
    }

    /// Build a URL under the current subscription
    pub fn subscription_url(&self, path: &str, api_version: &str) -> String {
        self.url(
            &format!("subscriptions/{}/{}", self.subscription_id, path),
            api_version,
        )
    }

    /// Build a URL for a resource group scoped path
    pub fn resource_group_url(&self, resource_group: &str, path: &str, api_version: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            self.subscription_url(&format!("resourcegroups/{}", resource_group), api_version)
        } else {
            self.subscription_url(
                &format!("resourcegroups/{}/{}", resource_group, path),
                api_version,
            )
        }
    }
}

/// Append an OData `$filter` to a URL
pub fn with_filter(url: &str, filter: Option<&str>) -> String {
    match filter {
        Some(f) if !f.is_empty() => format!("{}&$filter={}", url, urlencoding::encode(f)),
        _ => url.to_string(),
    }
}

fn operation_failed(state: &str, body: &Value) -> CliError {
    let error = body.get("error");
    let message = error
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| format!("Operation {}", state.to_lowercase()));
    let code = error
        .and_then(|e| e.get("code"))
        .and_then(|c| c.as_str())
        .map(|s| s.to_string());

    CliError::Api {
        status: 200,
        code,
        message,
    }
}
