//! Template deployment commands
//!
//! Parameter documents are merged in order, template parameters that end up
//! with neither a value nor a default are collected (interactively when
//! possible), and the result is submitted as a deployment or a validation.

use super::{exported_template, load_json_arg, load_json_file};
use crate::arm::client::ArmClient;
use crate::arm::deployments;
use crate::arm::models::{DeploymentMode, DeploymentProperties, TemplateLink};
use crate::error::CliError;
use crate::prompt::{self, Prompter};
use anyhow::Result;
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};

/// Name used for validation requests
pub const DRY_RUN_DEPLOYMENT: &str = "deployment_dry_run";

const MISSING_DESCRIPTION: &str = "Missing description";

/// Everything needed to deploy or validate a template
#[derive(Debug, Clone, Default)]
pub struct DeploymentRequest {
    pub resource_group: String,
    pub name: Option<String>,
    pub template_file: Option<PathBuf>,
    pub template_uri: Option<String>,
    /// Inline JSON, `@file` or file path, in order
    pub parameters: Vec<String>,
    pub mode: DeploymentMode,
    pub no_wait: bool,
}

impl DeploymentRequest {
    /// Deployment name, derived from the template when not given
    pub fn deployment_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let from_file = self
            .template_file
            .as_deref()
            .and_then(Path::file_stem)
            .and_then(|s| s.to_str())
            .map(str::to_string);
        let from_uri = || {
            self.template_uri.as_deref().and_then(|uri| {
                let path = uri.split(['?', '#']).next().unwrap_or(uri);
                path.rsplit('/')
                    .next()
                    .filter(|s| !s.is_empty())
                    .map(|s| s.trim_end_matches(".json").to_string())
            })
        };
        from_file
            .or_else(from_uri)
            .unwrap_or_else(|| "deployment".to_string())
    }
}

/// Merge parameter documents; later documents override earlier keys.
///
/// A document may wrap its parameters in a `parameters` envelope (the
/// parameter file format); the envelope is unwrapped.
pub fn merge_parameters(documents: &[Value]) -> Result<Map<String, Value>, CliError> {
    let mut merged = Map::new();
    for document in documents {
        let params = match document.get("parameters") {
            Some(inner) if inner.is_object() => inner,
            _ => document,
        };
        match params {
            Value::Object(map) => merged.extend(map.clone()),
            Value::Null => {}
            _ => return Err(CliError::usage("Deployment parameters must be a JSON object")),
        }
    }
    Ok(merged)
}

/// Template parameters with no default and no supplied (non-null) value
pub fn find_missing_parameters(
    parameters: &Map<String, Value>,
    template: Option<&Value>,
) -> Vec<(String, Value)> {
    let Some(declared) = template
        .and_then(|t| t.get("parameters"))
        .and_then(|p| p.as_object())
    else {
        return Vec::new();
    };

    declared
        .iter()
        .filter(|(_, param)| param.get("defaultValue").map_or(true, Value::is_null))
        .filter(|(name, _)| parameters.get(name.as_str()).map_or(true, Value::is_null))
        .map(|(name, param)| (name.clone(), param.clone()))
        .collect()
}

/// Ask for every missing parameter and return the answers as `{"name": {"value": x}}`
pub fn prompt_for_parameters(
    prompter: &mut dyn Prompter,
    missing: &[(String, Value)],
) -> Result<Map<String, Value>> {
    if missing.is_empty() {
        return Ok(Map::new());
    }

    if !prompter.is_interactive() {
        let names: Vec<&str> = missing.iter().map(|(n, _)| n.as_str()).collect();
        return Err(CliError::usage(format!(
            "Missing input parameters: {}",
            names.join(", ")
        ))
        .into());
    }

    let mut answers = Map::new();
    for (name, param) in missing {
        let message = format!("Please provide a value for '{}' (? for help): ", name);
        let param_type = param
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("string")
            .to_lowercase();
        let description = param
            .get("metadata")
            .and_then(|m| m.get("description"))
            .and_then(Value::as_str)
            .unwrap_or(MISSING_DESCRIPTION);
        let allowed = param.get("allowedValues").and_then(Value::as_array);

        let value = if let Some(allowed) = allowed {
            let labels: Vec<String> = allowed
                .iter()
                .map(|v| match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            let index = prompt::prompt_choice(prompter, &message, &labels, description)?;
            allowed[index].clone()
        } else {
            match param_type.as_str() {
                "int" => json!(prompt::prompt_int(prompter, &message, description)?),
                "bool" => json!(prompt::prompt_bool(prompter, &message, description)?),
                "securestring" => {
                    json!(until_non_empty(|| prompt::prompt_secret(prompter, &message, description))?)
                }
                _ => json!(until_non_empty(|| prompt::prompt_text(prompter, &message, description))?),
            }
        };

        answers.insert(name.clone(), json!({ "value": value }));
    }

    Ok(answers)
}

fn until_non_empty(mut ask: impl FnMut() -> Result<String>) -> Result<String> {
    loop {
        let answer = ask()?;
        if !answer.is_empty() {
            return Ok(answer);
        }
    }
}

/// Build the deployment body, prompting for whatever the parameters leave out
pub fn build_properties(
    request: &DeploymentRequest,
    prompter: &mut dyn Prompter,
) -> Result<DeploymentProperties> {
    let file = request.template_file.as_deref();
    let uri = request.template_uri.as_deref().filter(|u| !u.is_empty());
    if file.is_some() == uri.is_some() {
        return Err(CliError::usage(
            "please provide either template file path or uri, but not both",
        )
        .into());
    }

    let documents = request
        .parameters
        .iter()
        .map(|p| load_json_arg(p))
        .collect::<Result<Vec<_>>>()?;
    let mut parameters = merge_parameters(&documents)?;

    let (template, template_link) = match (file, uri) {
        (Some(path), _) => (Some(load_json_file(path)?), None),
        (None, Some(uri)) => (
            None,
            Some(TemplateLink {
                uri: uri.to_string(),
                content_version: None,
            }),
        ),
        (None, None) => (None, None),
    };

    // A linked template is not inspected locally
    let missing = find_missing_parameters(&parameters, template.as_ref());
    if !missing.is_empty() {
        tracing::info!("Prompting for {} missing parameters", missing.len());
        parameters.extend(prompt_for_parameters(prompter, &missing)?);
    }

    Ok(DeploymentProperties {
        template,
        template_link,
        parameters: Some(Value::Object(parameters)),
        mode: request.mode,
    })
}

/// Start a deployment
pub async fn deploy(
    client: &ArmClient,
    request: &DeploymentRequest,
    prompter: &mut dyn Prompter,
) -> Result<Value> {
    let properties = build_properties(request, prompter)?;
    let name = request.deployment_name();
    tracing::info!("Deploying {} to {}", name, request.resource_group);
    deployments::create_or_update(client, &request.resource_group, &name, &properties, request.no_wait).await
}

/// Validate a template without deploying it
pub async fn validate(
    client: &ArmClient,
    request: &DeploymentRequest,
    prompter: &mut dyn Prompter,
) -> Result<Value> {
    let properties = build_properties(request, prompter)?;
    deployments::validate(client, &request.resource_group, DRY_RUN_DEPLOYMENT, &properties).await
}

pub async fn export_deployment_as_template(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
) -> Result<Value> {
    let result = deployments::export_template(client, resource_group, name).await?;
    Ok(exported_template(result)?)
}

/// Fetch the given operations of a deployment, in order
pub async fn get_deployment_operations(
    client: &ArmClient,
    resource_group: &str,
    name: &str,
    operation_ids: &[String],
) -> Result<Vec<Value>> {
    let mut operations = Vec::with_capacity(operation_ids.len());
    for id in operation_ids {
        operations.push(deployments::get_operation(client, resource_group, name, id).await?);
    }
    Ok(operations)
}
