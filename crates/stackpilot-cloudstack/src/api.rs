//! `CloudApi` implementation on top of the query-API client

use crate::client::CloudStackClient;
use async_trait::async_trait;
use stackpilot_core::cloud::{
    CloudApi, CreateForwardParams, DeployParams, DeployedMachine, IpAllocation, JobRef,
};
use stackpilot_core::error::Result;
use stackpilot_core::model::{
    DiskOffering, FirewallRule, Machine, Network, PortForwardRule, PublicIpAddress,
    ServiceOffering, Template,
};

#[async_trait]
impl CloudApi for CloudStackClient {
    async fn list_virtual_machines(&self, domain_id: &str) -> Result<Vec<Machine>> {
        Ok(self
            .list(
                "listVirtualMachines",
                "virtualmachine",
                &[("domainid", domain_id.to_string())],
            )
            .await?)
    }

    async fn deploy_virtual_machine(&self, params: DeployParams) -> Result<DeployedMachine> {
        let mut query = vec![
            ("serviceofferingid", params.service_offering_id),
            ("templateid", params.template_id),
            ("zoneid", params.zone_id),
            ("domainid", params.domain_id),
            ("displayname", params.display_name),
            ("userdata", params.user_data),
        ];
        if let Some(network_ids) = params.network_ids {
            query.push(("networkids", network_ids));
        }

        let envelope = self.call("deployVirtualMachine", &query).await?;
        let deployed: DeployedMachine =
            serde_json::from_value(envelope).map_err(crate::error::CloudStackError::from)?;
        Ok(deployed)
    }

    async fn destroy_virtual_machine(&self, machine_id: &str) -> Result<()> {
        self.call("destroyVirtualMachine", &[("id", machine_id.to_string())])
            .await?;
        Ok(())
    }

    async fn start_virtual_machine(&self, machine_id: &str) -> Result<()> {
        self.call("startVirtualMachine", &[("id", machine_id.to_string())])
            .await?;
        Ok(())
    }

    async fn stop_virtual_machine(&self, machine_id: &str) -> Result<()> {
        self.call("stopVirtualMachine", &[("id", machine_id.to_string())])
            .await?;
        Ok(())
    }

    async fn reboot_virtual_machine(&self, machine_id: &str) -> Result<()> {
        self.call("rebootVirtualMachine", &[("id", machine_id.to_string())])
            .await?;
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        Ok(self
            .list(
                "listTemplates",
                "template",
                &[("templatefilter", "executable".to_string())],
            )
            .await?)
    }

    async fn list_service_offerings(&self) -> Result<Vec<ServiceOffering>> {
        Ok(self
            .list("listServiceOfferings", "serviceoffering", &[])
            .await?)
    }

    async fn list_disk_offerings(&self) -> Result<Vec<DiskOffering>> {
        Ok(self.list("listDiskOfferings", "diskoffering", &[]).await?)
    }

    async fn list_public_ip_addresses(&self) -> Result<Vec<PublicIpAddress>> {
        Ok(self
            .list("listPublicIpAddresses", "publicipaddress", &[])
            .await?)
    }

    async fn list_networks(&self, zone_id: &str) -> Result<Vec<Network>> {
        Ok(self
            .list("listNetworks", "network", &[("zoneid", zone_id.to_string())])
            .await?)
    }

    async fn list_port_forwarding_rules(
        &self,
        domain_id: Option<&str>,
    ) -> Result<Vec<PortForwardRule>> {
        let mut query = Vec::new();
        if let Some(domain_id) = domain_id {
            query.push(("domainid", domain_id.to_string()));
        }
        Ok(self
            .list("listPortForwardingRules", "portforwardingrule", &query)
            .await?)
    }

    async fn list_firewall_rules(&self, domain_id: Option<&str>) -> Result<Vec<FirewallRule>> {
        let mut query = Vec::new();
        if let Some(domain_id) = domain_id {
            query.push(("domainid", domain_id.to_string()));
        }
        Ok(self
            .list("listFirewallRules", "firewallrule", &query)
            .await?)
    }

    async fn associate_ip_address(&self, zone_id: &str) -> Result<IpAllocation> {
        let envelope = self
            .call("associateIpAddress", &[("zoneid", zone_id.to_string())])
            .await?;
        let allocation: IpAllocation =
            serde_json::from_value(envelope).map_err(crate::error::CloudStackError::from)?;
        Ok(allocation)
    }

    async fn disassociate_ip_address(&self, ip_id: &str) -> Result<JobRef> {
        let envelope = self
            .call("disassociateIpAddress", &[("id", ip_id.to_string())])
            .await?;
        let job: JobRef =
            serde_json::from_value(envelope).map_err(crate::error::CloudStackError::from)?;
        Ok(job)
    }

    async fn create_port_forwarding_rule(&self, params: CreateForwardParams) -> Result<()> {
        self.call(
            "createPortForwardingRule",
            &[
                ("ipaddressid", params.ip_address_id),
                ("publicport", params.public_port.to_string()),
                ("privateport", params.private_port.to_string()),
                ("protocol", params.protocol),
                ("virtualmachineid", params.machine_id),
                ("openfirewall", params.open_firewall.to_string()),
            ],
        )
        .await?;
        Ok(())
    }

    async fn delete_port_forwarding_rule(&self, rule_id: &str) -> Result<()> {
        self.call("deletePortForwardingRule", &[("id", rule_id.to_string())])
            .await?;
        Ok(())
    }
}
