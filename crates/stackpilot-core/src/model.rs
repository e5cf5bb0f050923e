//! Typed records for CloudStack entities
//!
//! Every record is parsed once at the facade boundary. CloudStack serializes
//! port numbers as JSON strings, so the port fields accept either form.

use serde::{Deserialize, Deserializer};

/// Lifecycle state of a virtual machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum MachineState {
    Starting,
    Running,
    Stopping,
    Stopped,
    Destroyed,
    Expunging,
    Migrating,
    Error,
    #[serde(other)]
    Unknown,
}

impl MachineState {
    /// Terminal states never come back; their display names may be reused.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MachineState::Destroyed | MachineState::Expunging)
    }

    /// States shown by default in the status listing.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            MachineState::Starting | MachineState::Running | MachineState::Stopping
        )
    }
}

impl std::fmt::Display for MachineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MachineState::Starting => "Starting",
            MachineState::Running => "Running",
            MachineState::Stopping => "Stopping",
            MachineState::Stopped => "Stopped",
            MachineState::Destroyed => "Destroyed",
            MachineState::Expunging => "Expunging",
            MachineState::Migrating => "Migrating",
            MachineState::Error => "Error",
            MachineState::Unknown => "Unknown",
        };
        write!(f, "{}", s)
    }
}

/// A virtual machine as reported by the cloud control plane
#[derive(Debug, Clone, Deserialize)]
pub struct Machine {
    pub id: String,
    pub name: String,
    #[serde(rename = "displayname")]
    pub display_name: String,
    pub state: MachineState,
    #[serde(rename = "zonename", default)]
    pub zone_name: Option<String>,
    #[serde(rename = "templatename", default)]
    pub template_name: Option<String>,
    #[serde(rename = "serviceofferingname", default)]
    pub service_offering_name: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

/// A NAT mapping from a public IP/port to a machine's private port
#[derive(Debug, Clone, Deserialize)]
pub struct PortForwardRule {
    pub id: String,
    #[serde(rename = "ipaddressid")]
    pub ip_address_id: String,
    #[serde(rename = "ipaddress", default)]
    pub ip_address: Option<String>,
    #[serde(rename = "publicport", deserialize_with = "de_port")]
    pub public_port: u16,
    #[serde(rename = "privateport", deserialize_with = "de_port")]
    pub private_port: u16,
    pub protocol: String,
    #[serde(rename = "virtualmachineid")]
    pub machine_id: String,
}

/// A public IP from the pool, independent of machines until a rule binds it
#[derive(Debug, Clone, Deserialize)]
pub struct PublicIpAddress {
    pub id: String,
    #[serde(rename = "ipaddress")]
    pub address: String,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(rename = "displaytext", default)]
    pub display_text: Option<String>,
    #[serde(rename = "zonename", default)]
    pub zone_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    pub name: String,
    #[serde(rename = "cpunumber", default)]
    pub cpu_number: Option<u32>,
    #[serde(default)]
    pub memory: Option<u32>,
    #[serde(rename = "displaytext", default)]
    pub display_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiskOffering {
    pub id: String,
    pub name: String,
    #[serde(rename = "disksize", default)]
    pub disk_size: Option<u64>,
    #[serde(rename = "displaytext", default)]
    pub display_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Network {
    pub id: String,
    pub name: String,
    #[serde(rename = "displaytext", default)]
    pub display_text: Option<String>,
    #[serde(rename = "networkdomain", default)]
    pub network_domain: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirewallRule {
    pub id: String,
    #[serde(rename = "ipaddress", default)]
    pub ip_address: Option<String>,
    pub protocol: String,
    #[serde(rename = "startport", default, deserialize_with = "de_opt_port")]
    pub start_port: Option<u16>,
    #[serde(rename = "endport", default, deserialize_with = "de_opt_port")]
    pub end_port: Option<u16>,
    #[serde(rename = "cidrlist", default)]
    pub cidr_list: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortRepr {
    Number(u16),
    Text(String),
}

impl PortRepr {
    fn parse<E: serde::de::Error>(self) -> std::result::Result<u16, E> {
        match self {
            PortRepr::Number(n) => Ok(n),
            PortRepr::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("invalid port number: {:?}", s))),
        }
    }
}

fn de_port<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u16, D::Error> {
    PortRepr::deserialize(deserializer)?.parse()
}

fn de_opt_port<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u16>, D::Error> {
    match Option::<PortRepr>::deserialize(deserializer)? {
        Some(repr) => repr.parse().map(Some),
        None => Ok(None),
    }
}
