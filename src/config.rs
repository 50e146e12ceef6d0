//! Configuration Management
//!
//! Handles persistent configuration storage for azrm.

use crate::arm::auth;
use crate::arm::client::DEFAULT_ENDPOINT;
use crate::error::CliError;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Subscription used when none is given on the command line
    #[serde(default)]
    pub subscription_id: Option<String>,
    /// Management endpoint (for sovereign clouds or testing)
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Default output format
    #[serde(default)]
    pub output: Option<OutputFormat>,
    /// Seconds between polls of a long-running operation
    #[serde(default)]
    pub poll_interval_secs: Option<u64>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("azrm").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file; a missing or broken file yields defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to a file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Get effective subscription (CLI > config > environment / Azure CLI profile)
    pub fn effective_subscription(&self, cli: Option<&str>) -> Option<String> {
        cli.filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.subscription_id.clone())
            .or_else(auth::get_default_subscription)
    }

    /// Get effective management endpoint
    pub fn effective_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .or_else(|| std::env::var("AZRM_ENDPOINT").ok())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Get effective output format (CLI > config > JSON)
    pub fn effective_output(&self, cli: Option<OutputFormat>) -> OutputFormat {
        cli.or(self.output).unwrap_or_default()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.unwrap_or(DEFAULT_POLL_INTERVAL_SECS))
    }

    /// Apply `azrm configure` settings; nothing changes if any value is invalid
    pub fn apply(&mut self, update: ConfigUpdate) -> Result<(), CliError> {
        if let Some(subscription) = &update.subscription_id {
            if !auth::validate_subscription_id(subscription) {
                return Err(CliError::usage(format!("Invalid subscription id '{}'", subscription)));
            }
        }
        if let Some(endpoint) = &update.endpoint {
            if url::Url::parse(endpoint).is_err() {
                return Err(CliError::usage(format!("Invalid endpoint '{}'", endpoint)));
            }
        }

        if update.subscription_id.is_some() {
            self.subscription_id = update.subscription_id;
        }
        if update.endpoint.is_some() {
            self.endpoint = update.endpoint;
        }
        if update.output.is_some() {
            self.output = update.output;
        }
        if update.poll_interval_secs.is_some() {
            self.poll_interval_secs = update.poll_interval_secs;
        }
        Ok(())
    }
}

/// Settings given to `azrm configure`; unset fields keep their stored value
#[derive(Debug, Clone, Default)]
pub struct ConfigUpdate {
    pub subscription_id: Option<String>,
    pub endpoint: Option<String>,
    pub output: Option<OutputFormat>,
    pub poll_interval_secs: Option<u64>,
}

/// Update the config file at `path` and return what was stored
pub fn configure(path: &Path, update: ConfigUpdate) -> Result<Config> {
    let mut config = Config::load_from(path);
    config.apply(update)?;
    config.save_to(path)?;
    tracing::info!("Saved configuration to {}", path.display());
    Ok(config)
}
