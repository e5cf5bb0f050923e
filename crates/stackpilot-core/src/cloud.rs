//! Cloud control-plane facade trait

use crate::error::Result;
use crate::model::{
    DiskOffering, FirewallRule, Machine, Network, PortForwardRule, PublicIpAddress,
    ServiceOffering, Template,
};
use async_trait::async_trait;
use serde::Deserialize;

/// Parameters for a deploy call
///
/// All identifiers come from configuration except the display name, user
/// data and optional extra network ids, which are per-request.
#[derive(Debug, Clone)]
pub struct DeployParams {
    pub service_offering_id: String,
    pub template_id: String,
    pub zone_id: String,
    pub domain_id: String,
    pub display_name: String,
    /// Base64-encoded bootstrap payload
    pub user_data: String,
    /// Comma-separated extra network ids, if any
    pub network_ids: Option<String>,
}

/// The machine reference returned by a deploy call
#[derive(Debug, Clone, Deserialize)]
pub struct DeployedMachine {
    pub id: String,
}

/// Parameters for creating a port-forward rule
#[derive(Debug, Clone)]
pub struct CreateForwardParams {
    pub ip_address_id: String,
    pub public_port: u16,
    pub private_port: u16,
    pub protocol: String,
    pub machine_id: String,
    pub open_firewall: bool,
}

/// A freshly associated public IP
#[derive(Debug, Clone, Deserialize)]
pub struct IpAllocation {
    pub id: String,
    #[serde(rename = "ipaddress", default)]
    pub address: Option<String>,
}

/// An asynchronous control-plane job reference
#[derive(Debug, Clone, Deserialize)]
pub struct JobRef {
    #[serde(rename = "jobid")]
    pub job_id: String,
}

/// The cloud control-plane operations the reconcilers depend on.
///
/// The production implementation lives in `stackpilot-cloudstack`; tests
/// substitute a recording mock. The cloud API is the single source of truth
/// for inventory, so every operation here reflects a fresh remote call.
#[async_trait]
pub trait CloudApi: Send + Sync {
    async fn list_virtual_machines(&self, domain_id: &str) -> Result<Vec<Machine>>;

    async fn deploy_virtual_machine(&self, params: DeployParams) -> Result<DeployedMachine>;

    async fn destroy_virtual_machine(&self, machine_id: &str) -> Result<()>;

    async fn start_virtual_machine(&self, machine_id: &str) -> Result<()>;

    async fn stop_virtual_machine(&self, machine_id: &str) -> Result<()>;

    async fn reboot_virtual_machine(&self, machine_id: &str) -> Result<()>;

    /// Templates usable for deploys (the "executable" filter).
    async fn list_templates(&self) -> Result<Vec<Template>>;

    async fn list_service_offerings(&self) -> Result<Vec<ServiceOffering>>;

    async fn list_disk_offerings(&self) -> Result<Vec<DiskOffering>>;

    async fn list_public_ip_addresses(&self) -> Result<Vec<PublicIpAddress>>;

    async fn list_networks(&self, zone_id: &str) -> Result<Vec<Network>>;

    async fn list_port_forwarding_rules(&self, domain_id: Option<&str>)
        -> Result<Vec<PortForwardRule>>;

    async fn list_firewall_rules(&self, domain_id: Option<&str>) -> Result<Vec<FirewallRule>>;

    async fn associate_ip_address(&self, zone_id: &str) -> Result<IpAllocation>;

    async fn disassociate_ip_address(&self, ip_id: &str) -> Result<JobRef>;

    async fn create_port_forwarding_rule(&self, params: CreateForwardParams) -> Result<()>;

    async fn delete_port_forwarding_rule(&self, rule_id: &str) -> Result<()>;
}
