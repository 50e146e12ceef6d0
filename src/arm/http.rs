//! HTTP utilities for Resource Manager REST calls

use super::models::ErrorResponse;
use crate::error::{as_cli_error, CliError};
use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, LOCATION, RETRY_AFTER};
use reqwest::{Client, Method};
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const ASYNC_OPERATION_HEADER: &str = "azure-asyncoperation";

/// Sanitize response body for logging
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|i| body.is_char_boundary(*i))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// A decoded response plus the headers that drive long-running operations
#[derive(Debug, Clone)]
pub struct ArmResponse {
    pub status: u16,
    pub body: Value,
    /// `Azure-AsyncOperation` status URL
    pub async_operation: Option<String>,
    /// `Location` URL for operations that report through it
    pub location: Option<String>,
    /// Seconds to wait before polling again
    pub retry_after: Option<u64>,
}

impl ArmResponse {
    /// Whether the service accepted the request but has not finished it
    pub fn is_pending(&self) -> bool {
        matches!(self.status, 201 | 202)
            && (self.async_operation.is_some() || self.location.is_some())
    }
}

fn header_str(headers: &HeaderMap, name: impl reqwest::header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

/// Turn a failed response into a [`CliError::Api`]
fn api_error(status: u16, body: &str) -> CliError {
    let detail = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|r| r.error);

    let (code, message) = match detail {
        Some(detail) => (
            detail.code,
            detail
                .message
                .unwrap_or_else(|| format!("API request failed: {}", status)),
        ),
        None => (None, format!("API request failed: {}", status)),
    };

    CliError::Api {
        status,
        code,
        message,
    }
}

/// HTTP client wrapper for Resource Manager calls
#[derive(Clone, Debug)]
pub struct ArmHttpClient {
    client: Client,
}

impl ArmHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("azrm/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Send a request and decode the JSON answer.
    ///
    /// Non-success statuses become [`CliError::Api`] with the service's
    /// error code and message. An empty body decodes to `Value::Null`.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<&Value>,
    ) -> Result<ArmResponse> {
        tracing::debug!("{} {}", method, url);

        let mut request = self.client.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.context("Failed to send request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let text = response
            .text()
            .await
            .context("Failed to read response body")?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&text));
            return Err(api_error(status.as_u16(), &text).into());
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).context("Failed to parse response JSON")?
        };

        Ok(ArmResponse {
            status: status.as_u16(),
            body,
            async_operation: header_str(&headers, ASYNC_OPERATION_HEADER),
            location: header_str(&headers, LOCATION),
            retry_after: header_str(&headers, RETRY_AFTER).and_then(|v| v.trim().parse().ok()),
        })
    }

    /// Make a GET request
    pub async fn get(&self, url: &str, token: &str) -> Result<Value> {
        Ok(self.send(Method::GET, url, token, None).await?.body)
    }

    /// Make a PUT request
    pub async fn put(&self, url: &str, token: &str, body: &Value) -> Result<Value> {
        Ok(self.send(Method::PUT, url, token, Some(body)).await?.body)
    }

    /// Make a POST request
    pub async fn post(&self, url: &str, token: &str, body: Option<&Value>) -> Result<Value> {
        Ok(self.send(Method::POST, url, token, body).await?.body)
    }

    /// Make a DELETE request
    pub async fn delete(&self, url: &str, token: &str) -> Result<Value> {
        Ok(self.send(Method::DELETE, url, token, None).await?.body)
    }
}

/// Format an error for display on the terminal
pub fn format_arm_error(error: &anyhow::Error) -> String {
    match as_cli_error(error) {
        Some(CliError::Api { status: 401, message, .. }) => format!(
            "{} (authentication failed; run 'az login' or set AZURE_ACCESS_TOKEN)",
            message
        ),
        Some(CliError::Api { status: 403, message, .. }) => {
            format!("{} (check your role assignments)", message)
        }
        Some(err) => err.to_string(),
        None => format!("{:#}", error),
    }
}
