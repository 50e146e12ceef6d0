//! Azure Resource Manager interaction module
//!
//! This module provides the core functionality for talking to the Resource
//! Manager REST API: authentication, the HTTP client, resource ids, wire
//! models, and one thin module per management surface.
//!
//! # Module Structure
//!
//! - [`auth`] - Bearer tokens from a static token, a service principal or the Azure CLI
//! - [`client`] - Main client for making API requests
//! - [`http`] - HTTP utilities for REST API calls
//! - [`resource_id`] - Parsing and rendering of resource ids
//! - [`models`] - Serde types for request and response bodies
//! - [`resource_groups`], [`resources`], [`providers`], [`features`],
//!   [`deployments`], [`policy`], [`locks`], [`links`] - one module per endpoint family
//!
//! # Example
//!
//! ```ignore
//! use azrm::arm::{auth::ArmCredentials, client::ArmClient, resource_groups};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let creds = ArmCredentials::from_token("...");
//!     let client = ArmClient::new("<subscription>", "https://management.azure.com", creds)?;
//!     let groups = resource_groups::list(&client, None).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod deployments;
pub mod features;
pub mod http;
pub mod links;
pub mod locks;
pub mod models;
pub mod policy;
pub mod providers;
pub mod resource_groups;
pub mod resource_id;
pub mod resources;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a response body into a wire model
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).context("Unexpected response shape")
}

/// Decode every item of a list response
pub(crate) fn decode_all<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>> {
    values.into_iter().map(decode).collect()
}
