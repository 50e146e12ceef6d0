//! Resource identifiers
//!
//! Azure addresses a resource either by one opaque id string
//! (`/subscriptions/{sub}/resourceGroups/{rg}/providers/{ns}/{type}/{name}/...`)
//! or by its parts. Both forms are parsed here into typed values so that
//! nothing downstream has to guess whether a string embeds a namespace.

use crate::error::CliError;
use std::fmt;

/// A nested `[/providers/{namespace}]/{type}/{name}` segment of a resource id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildSegment {
    /// Set when the child lives under a different provider than its parent
    pub namespace: Option<String>,
    pub resource_type: String,
    pub name: String,
}

/// A parsed resource id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceId {
    pub subscription: String,
    pub resource_group: Option<String>,
    pub namespace: Option<String>,
    pub resource_type: Option<String>,
    pub name: Option<String>,
    /// Child, grandchild, ... in order
    pub children: Vec<ChildSegment>,
}

/// What the API-version resolver needs to know about a resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLookup {
    pub namespace: String,
    pub parent: Option<String>,
    pub resource_type: String,
}

fn invalid(id: &str) -> CliError {
    CliError::usage(format!("Invalid resource id '{}'", id))
}

impl ResourceId {
    /// Parse a resource id string
    pub fn parse(id: &str) -> Result<Self, CliError> {
        let trimmed = id.trim().trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();

        if segments.len() < 2 || !segments[0].eq_ignore_ascii_case("subscriptions") {
            return Err(invalid(id));
        }

        let mut parsed = ResourceId {
            subscription: segments[1].to_string(),
            resource_group: None,
            namespace: None,
            resource_type: None,
            name: None,
            children: Vec::new(),
        };

        let mut rest = &segments[2..];

        if let [marker, group, tail @ ..] = rest {
            if marker.eq_ignore_ascii_case("resourceGroups") {
                parsed.resource_group = Some(group.to_string());
                rest = tail;
            }
        }

        if rest.is_empty() {
            return Ok(parsed);
        }

        match rest {
            [marker, namespace, resource_type, name, tail @ ..]
                if marker.eq_ignore_ascii_case("providers") =>
            {
                parsed.namespace = Some(namespace.to_string());
                parsed.resource_type = Some(resource_type.to_string());
                parsed.name = Some(name.to_string());
                rest = tail;
            }
            _ => return Err(invalid(id)),
        }

        while !rest.is_empty() {
            let (namespace, tail) = match rest {
                [marker, namespace, tail @ ..] if marker.eq_ignore_ascii_case("providers") => {
                    (Some(namespace.to_string()), tail)
                }
                _ => (None, rest),
            };

            let [resource_type, name, tail @ ..] = tail else {
                return Err(invalid(id));
            };

            parsed.children.push(ChildSegment {
                namespace,
                resource_type: resource_type.to_string(),
                name: name.to_string(),
            });
            rest = tail;
        }

        Ok(parsed)
    }

    /// First nested segment, if any
    pub fn child(&self) -> Option<&ChildSegment> {
        self.children.first()
    }

    /// Second nested segment, if any
    pub fn grandchild(&self) -> Option<&ChildSegment> {
        self.children.get(1)
    }

    /// Whether this id points at a resource rather than a group or subscription
    pub fn is_resource(&self) -> bool {
        self.namespace.is_some() && self.resource_type.is_some() && self.name.is_some()
    }

    /// Work out namespace, parent path and type for API-version resolution.
    ///
    /// A child carrying its own namespace is independent of its parent, so the
    /// parent path is empty in that case.
    pub fn version_lookup(&self) -> Result<VersionLookup, CliError> {
        let (Some(namespace), Some(resource_type), Some(name)) =
            (&self.namespace, &self.resource_type, &self.name)
        else {
            return Err(invalid(&self.to_string()));
        };

        let namespace = self
            .child()
            .and_then(|c| c.namespace.clone())
            .unwrap_or_else(|| namespace.clone());

        let lookup = match (self.child(), self.grandchild()) {
            (Some(child), Some(grandchild)) => VersionLookup {
                namespace,
                parent: Some(format!(
                    "{}/{}/{}/{}",
                    resource_type, name, child.resource_type, child.name
                )),
                resource_type: grandchild.resource_type.clone(),
            },
            (Some(child), None) => VersionLookup {
                namespace,
                parent: if child.namespace.is_some() {
                    Some(String::new())
                } else {
                    Some(format!("{}/{}", resource_type, name))
                },
                resource_type: child.resource_type.clone(),
            },
            _ => VersionLookup {
                namespace,
                parent: None,
                resource_type: resource_type.clone(),
            },
        };

        Ok(lookup)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/subscriptions/{}", self.subscription)?;
        if let Some(group) = &self.resource_group {
            write!(f, "/resourceGroups/{}", group)?;
        }
        if let (Some(namespace), Some(resource_type), Some(name)) =
            (&self.namespace, &self.resource_type, &self.name)
        {
            write!(f, "/providers/{}/{}/{}", namespace, resource_type, name)?;
        }
        for child in &self.children {
            if let Some(namespace) = &child.namespace {
                write!(f, "/providers/{}", namespace)?;
            }
            write!(f, "/{}/{}", child.resource_type, child.name)?;
        }
        Ok(())
    }
}

/// True when `id` names something inside a resource group and re-renders unchanged
pub fn is_valid_resource_id(id: &str) -> bool {
    match ResourceId::parse(id) {
        Ok(parsed) => {
            parsed.resource_group.is_some()
                && parsed
                    .to_string()
                    .eq_ignore_ascii_case(id.trim().trim_end_matches('/'))
        }
        Err(_) => false,
    }
}

/// Build `/subscriptions/{sub}[/resourceGroups/{rg}]`
pub fn resource_group_scope(subscription: &str, resource_group: Option<&str>) -> String {
    match resource_group {
        Some(group) => format!("/subscriptions/{}/resourceGroups/{}", subscription, group),
        None => format!("/subscriptions/{}", subscription),
    }
}

/// A resource type with its namespace split out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceType {
    pub namespace: Option<String>,
    pub resource_type: String,
}

impl ResourceType {
    /// Split `Namespace/type` once; a bare `type` has no namespace.
    pub fn parse(value: &str) -> Self {
        match value.split_once('/') {
            Some((namespace, resource_type)) => Self {
                namespace: Some(namespace.to_string()),
                resource_type: resource_type.to_string(),
            },
            None => Self {
                namespace: None,
                resource_type: value.to_string(),
            },
        }
    }
}

/// A resource addressed by its parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourcePath {
    pub resource_group: String,
    pub namespace: String,
    pub parent: Option<String>,
    pub resource_type: String,
    pub name: String,
}

impl ResourcePath {
    /// `resourcegroups/{rg}/providers/{ns}[/{parent}]/{type}/{name}`
    pub fn relative_path(&self) -> String {
        let mut path = format!(
            "resourcegroups/{}/providers/{}",
            self.resource_group, self.namespace
        );
        if let Some(parent) = self.parent.as_deref().map(|p| p.trim_matches('/')) {
            if !parent.is_empty() {
                path.push('/');
                path.push_str(parent);
            }
        }
        path.push_str(&format!("/{}/{}", self.resource_type, self.name));
        path
    }
}
