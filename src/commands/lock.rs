//! Management lock commands
//!
//! The same set of flags addresses a lock at subscription, resource group or
//! resource level; [`validate_lock_params`] decides which.

use super::present;
use crate::arm::client::ArmClient;
use crate::arm::locks::{self, LockScope};
use crate::arm::models::{LockLevel, ManagementLock, ManagementLockProperties};
use crate::arm::resource_id::{ResourcePath, ResourceType};
use crate::error::CliError;
use anyhow::Result;

/// Lock scope flags
#[derive(Debug, Clone, Default)]
pub struct LockArgs {
    pub resource_group: Option<String>,
    pub namespace: Option<String>,
    pub parent: Option<String>,
    pub resource_type: Option<String>,
    pub resource_name: Option<String>,
}

/// Work out the lock scope, rejecting flags that would be silently ignored
pub fn validate_lock_params(args: &LockArgs) -> Result<LockScope, CliError> {
    let group = present(args.resource_group.as_deref());
    let name = present(args.resource_name.as_deref());
    let resource_type = present(args.resource_type.as_deref());
    let namespace = present(args.namespace.as_deref());
    let parent = present(args.parent.as_deref());

    let Some(group) = group else {
        for (value, flag) in [
            (name, "--resource-name"),
            (resource_type, "--resource-type"),
            (namespace, "--namespace"),
            (parent, "--parent"),
        ] {
            if value.is_some() {
                return Err(CliError::usage(format!(
                    "{} is ignored if --resource-group is not given.",
                    flag
                )));
            }
        }
        return Ok(LockScope::Subscription);
    };

    let Some(name) = name else {
        for (value, flag) in [
            (resource_type, "--resource-type"),
            (namespace, "--namespace"),
            (parent, "--parent"),
        ] {
            if value.is_some() {
                return Err(CliError::usage(format!(
                    "{} is ignored if --resource-name is not given.",
                    flag
                )));
            }
        }
        return Ok(LockScope::ResourceGroup(group.to_string()));
    };

    let Some(resource_type) = resource_type else {
        return Err(CliError::usage(
            "--resource-type is required if --resource-name is present",
        ));
    };

    let parsed = ResourceType::parse(resource_type);
    let (namespace, resource_type) = match (namespace, parsed.namespace) {
        (None, None) => {
            return Err(CliError::usage(
                "A resource namespace is required if --resource-name is present. \
                 Expected <namespace>/<type> or --namespace=<namespace>",
            ))
        }
        (None, Some(embedded)) => (embedded, parsed.resource_type),
        (Some(_), Some(_)) => {
            return Err(CliError::usage(
                "Resource namespace specified in both --resource-type and --namespace",
            ))
        }
        (Some(namespace), None) => (namespace.to_string(), parsed.resource_type),
    };

    Ok(LockScope::Resource(ResourcePath {
        resource_group: group.to_string(),
        namespace,
        parent: parent.map(str::to_string),
        resource_type,
        name: name.to_string(),
    }))
}

/// Subscription or resource group scope for the commands that only take `-g`
fn group_scope(resource_group: Option<&str>) -> LockScope {
    match present(resource_group) {
        Some(group) => LockScope::ResourceGroup(group.to_string()),
        None => LockScope::Subscription,
    }
}

pub async fn list_locks(
    client: &ArmClient,
    args: &LockArgs,
    filter: Option<&str>,
) -> Result<Vec<ManagementLock>> {
    let scope = validate_lock_params(args)?;
    locks::list(client, &scope, present(filter)).await
}

pub async fn get_lock(client: &ArmClient, name: &str, resource_group: Option<&str>) -> Result<ManagementLock> {
    locks::get(client, &group_scope(resource_group), name).await
}

pub async fn delete_lock(client: &ArmClient, name: &str, args: &LockArgs) -> Result<()> {
    let scope = validate_lock_params(args)?;
    tracing::info!("Deleting lock {} at {:?}", name, scope);
    locks::delete(client, &scope, name).await
}

pub async fn create_lock(
    client: &ArmClient,
    name: &str,
    args: &LockArgs,
    level: &str,
    notes: Option<&str>,
) -> Result<ManagementLock> {
    let level: LockLevel = level.parse()?;
    let scope = validate_lock_params(args)?;

    let lock = ManagementLock {
        id: None,
        name: Some(name.to_string()),
        lock_type: None,
        properties: ManagementLockProperties {
            level,
            notes: notes.map(str::to_string),
        },
    };
    locks::create_or_update(client, &scope, name, &lock).await
}

/// Change the level and/or notes of an existing lock
pub async fn update_lock(
    client: &ArmClient,
    name: &str,
    resource_group: Option<&str>,
    level: Option<&str>,
    notes: Option<&str>,
) -> Result<ManagementLock> {
    let level = level.map(str::parse::<LockLevel>).transpose()?;
    let scope = group_scope(resource_group);

    let mut lock = locks::get(client, &scope, name).await?;
    if let Some(level) = level {
        lock.properties.level = level;
    }
    if let Some(notes) = notes {
        lock.properties.notes = Some(notes.to_string());
    }

    locks::create_or_update(client, &scope, name, &lock).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(group: Option<&str>, name: Option<&str>, rtype: Option<&str>, ns: Option<&str>) -> LockArgs {
        LockArgs {
            resource_group: group.map(Into::into),
            resource_name: name.map(Into::into),
            resource_type: rtype.map(Into::into),
            namespace: ns.map(Into::into),
            parent: None,
        }
    }

    #[test]
    fn test_subscription_scope() {
        assert_eq!(
            validate_lock_params(&LockArgs::default()).unwrap(),
            LockScope::Subscription
        );
    }

    #[test]
    fn test_type_without_group_fails() {
        let err = validate_lock_params(&args(None, None, Some("Microsoft.Web/sites"), None)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--resource-type is ignored if --resource-group is not given."
        );
    }

    #[test]
    fn test_name_checked_before_type_without_group() {
        let err = validate_lock_params(&args(None, Some("n"), Some("t"), None)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--resource-name is ignored if --resource-group is not given."
        );
    }

    #[test]
    fn test_group_scope_rejects_resource_flags() {
        assert_eq!(
            validate_lock_params(&args(Some("rg"), None, None, None)).unwrap(),
            LockScope::ResourceGroup("rg".to_string())
        );
        let err = validate_lock_params(&args(Some("rg"), None, None, Some("Microsoft.Web"))).unwrap_err();
        assert_eq!(err.to_string(), "--namespace is ignored if --resource-name is not given.");
    }

    #[test]
    fn test_name_without_type_fails() {
        let err = validate_lock_params(&args(Some("rg"), Some("site"), None, None)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "--resource-type is required if --resource-name is present"
        );
    }

    #[test]
    fn test_namespace_sources() {
        let scope = validate_lock_params(&args(Some("rg"), Some("site"), Some("Microsoft.Web/sites"), None)).unwrap();
        let LockScope::Resource(path) = scope else {
            panic!("expected resource scope");
        };
        assert_eq!(path.namespace, "Microsoft.Web");
        assert_eq!(path.resource_type, "sites");

        let scope = validate_lock_params(&args(Some("rg"), Some("site"), Some("sites"), Some("Microsoft.Web"))).unwrap();
        assert!(matches!(scope, LockScope::Resource(_)));

        let err = validate_lock_params(&args(Some("rg"), Some("site"), Some("sites"), None)).unwrap_err();
        assert!(err.to_string().starts_with("A resource namespace is required"));

        let err = validate_lock_params(&args(
            Some("rg"),
            Some("site"),
            Some("Microsoft.Web/sites"),
            Some("Microsoft.Web"),
        ))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Resource namespace specified in both --resource-type and --namespace"
        );
    }
}
