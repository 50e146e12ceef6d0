//! DevTest Labs wire types
//!
//! Plain serialization descriptors. Every field is optional and left off the
//! wire when unset. Each type also publishes its field-to-wire-key table as
//! `WIRE_KEYS` for callers that build payloads by hand.

use serde::{Deserialize, Serialize};

/// Event a notification channel reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationChannelEventType {
    AutoShutdown,
    Cost,
}

/// Whether a subnet may be used for something
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsagePermissionType {
    Default,
    Deny,
    Allow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportProtocol {
    Tcp,
    Udp,
}

/// Parameters for generating a notification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifyParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<NotificationChannelEventType>,
    /// Notification properties as a JSON string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_payload: Option<String>,
}

impl NotifyParameters {
    pub const WIRE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("event_name", "eventName"),
        ("json_payload", "jsonPayload"),
    ];
}

/// Property overrides on a subnet of a virtual network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    /// Name of the subnet within the lab
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lab_subnet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_in_vm_creation_permission: Option<UsagePermissionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_public_ip_address_permission: Option<UsagePermissionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shared_public_ip_address_configuration: Option<SubnetSharedPublicIpAddressConfiguration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virtual_network_pool_name: Option<String>,
}

impl SubnetOverride {
    pub const WIRE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("resource_id", "resourceId"),
        ("lab_subnet_name", "labSubnetName"),
        ("use_in_vm_creation_permission", "useInVmCreationPermission"),
        ("use_public_ip_address_permission", "usePublicIpAddressPermission"),
        (
            "shared_public_ip_address_configuration",
            "sharedPublicIpAddressConfiguration",
        ),
        ("virtual_network_pool_name", "virtualNetworkPoolName"),
    ];
}

/// Ports shared by the virtual machines of a subnet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetSharedPublicIpAddressConfiguration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_ports: Option<Vec<Port>>,
}

impl SubnetSharedPublicIpAddressConfiguration {
    pub const WIRE_KEYS: &'static [(&'static str, &'static str)] = &[("allowed_ports", "allowedPorts")];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_protocol: Option<TransportProtocol>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backend_port: Option<i32>,
}

impl Port {
    pub const WIRE_KEYS: &'static [(&'static str, &'static str)] = &[
        ("transport_protocol", "transportProtocol"),
        ("backend_port", "backendPort"),
    ];
}
