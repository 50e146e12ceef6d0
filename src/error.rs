//! User-facing error type

use thiserror::Error;

/// Errors surfaced to the person running a command.
///
/// Validation problems are [`CliError::Usage`]; failures reported by the
/// management API are [`CliError::Api`]. Operations return `anyhow::Result`,
/// so callers recover this type with `downcast_ref::<CliError>()`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CliError {
    /// Bad or conflicting command arguments.
    #[error("{0}")]
    Usage(String),

    /// The service rejected the request.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

impl CliError {
    pub fn usage(message: impl Into<String>) -> Self {
        CliError::Usage(message.into())
    }
}

/// Find a [`CliError`] anywhere in an error chain
pub fn as_cli_error(error: &anyhow::Error) -> Option<&CliError> {
    error.chain().find_map(|e| e.downcast_ref::<CliError>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_message_is_displayed_verbatim() {
        let err = CliError::usage("--namespace also requires --resource-type");
        assert_eq!(err.to_string(), "--namespace also requires --resource-type");
    }

    #[test]
    fn test_cli_error_survives_context() {
        let err = anyhow::Error::new(CliError::Api {
            status: 404,
            code: Some("ResourceGroupNotFound".to_string()),
            message: "Resource group 'rg' could not be found.".to_string(),
        })
        .context("Failed to show resource group");

        let cli = as_cli_error(&err).expect("CliError should be in the chain");
        assert!(matches!(cli, CliError::Api { status: 404, .. }));
    }
}
