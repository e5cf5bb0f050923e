//! Recording mock collaborators shared by the reconciler tests
#![allow(dead_code)]

use async_trait::async_trait;
use stackpilot_core::cloud::{
    CloudApi, CreateForwardParams, DeployParams, DeployedMachine, IpAllocation, JobRef,
};
use stackpilot_core::error::{Error, Result};
use stackpilot_core::inventory::NodeInventory;
use stackpilot_core::model::{
    DiskOffering, FirewallRule, Machine, MachineState, Network, PortForwardRule, PublicIpAddress,
    ServiceOffering, Template,
};
use stackpilot_core::Settings;
use std::sync::Mutex;

pub fn machine(id: &str, display_name: &str, state: MachineState) -> Machine {
    Machine {
        id: id.to_string(),
        name: display_name.to_string(),
        display_name: display_name.to_string(),
        state,
        zone_name: None,
        template_name: None,
        service_offering_name: None,
        created: None,
    }
}

pub fn public_ip(id: &str, address: &str) -> PublicIpAddress {
    PublicIpAddress {
        id: id.to_string(),
        address: address.to_string(),
        state: None,
    }
}

pub fn forward_rule(id: &str, ip_id: &str, machine_id: &str, public_port: u16) -> PortForwardRule {
    PortForwardRule {
        id: id.to_string(),
        ip_address_id: ip_id.to_string(),
        ip_address: None,
        public_port,
        private_port: 22,
        protocol: "tcp".to_string(),
        machine_id: machine_id.to_string(),
    }
}

pub fn test_settings() -> Settings {
    Settings {
        api_url: "http://mgmt1.example.net:8080/client/api".to_string(),
        api_key: "key".to_string(),
        secret_key: "secret".to_string(),
        domain_id: "29".to_string(),
        zone_id: "6".to_string(),
        template_id: "519".to_string(),
        service_offering_id: "17".to_string(),
        cloudinit_puppet: "http://repo.example.com/puppet-agent.cloudinit".to_string(),
        cloudinit_base: "http://repo.example.com/base.cloudinit".to_string(),
        puppet_master: "1001".to_string(),
        puppet_master_host: "puppet.example.net".to_string(),
        pending_certs_path: "/tmp/pending-certificates".into(),
        foreman: None,
    }
}

/// Recording in-memory cloud control plane
#[derive(Default)]
pub struct MockCloud {
    pub machines: Vec<Machine>,
    pub ips: Vec<PublicIpAddress>,
    pub rules: Mutex<Vec<PortForwardRule>>,
    /// Id handed back by deploy calls
    pub deploy_id: String,
    /// Make every rule deletion fail
    pub fail_rule_deletion: bool,

    pub deploy_calls: Mutex<Vec<DeployParams>>,
    pub destroy_calls: Mutex<Vec<String>>,
    pub power_calls: Mutex<Vec<String>>,
    pub create_rule_calls: Mutex<Vec<CreateForwardParams>>,
    pub delete_rule_calls: Mutex<Vec<String>>,
}

impl MockCloud {
    pub fn new(machines: Vec<Machine>) -> Self {
        Self {
            machines,
            deploy_id: "new-machine".to_string(),
            ..Default::default()
        }
    }

    pub fn with_pool(mut self, ips: Vec<PublicIpAddress>, rules: Vec<PortForwardRule>) -> Self {
        self.ips = ips;
        self.rules = Mutex::new(rules);
        self
    }

    /// Total number of mutating calls issued against the control plane.
    pub fn mutation_count(&self) -> usize {
        self.deploy_calls.lock().unwrap().len()
            + self.destroy_calls.lock().unwrap().len()
            + self.power_calls.lock().unwrap().len()
            + self.create_rule_calls.lock().unwrap().len()
            + self.delete_rule_calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CloudApi for MockCloud {
    async fn list_virtual_machines(&self, _domain_id: &str) -> Result<Vec<Machine>> {
        Ok(self.machines.clone())
    }

    async fn deploy_virtual_machine(&self, params: DeployParams) -> Result<DeployedMachine> {
        self.deploy_calls.lock().unwrap().push(params);
        Ok(DeployedMachine {
            id: self.deploy_id.clone(),
        })
    }

    async fn destroy_virtual_machine(&self, machine_id: &str) -> Result<()> {
        self.destroy_calls.lock().unwrap().push(machine_id.to_string());
        Ok(())
    }

    async fn start_virtual_machine(&self, machine_id: &str) -> Result<()> {
        self.power_calls
            .lock()
            .unwrap()
            .push(format!("start {}", machine_id));
        Ok(())
    }

    async fn stop_virtual_machine(&self, machine_id: &str) -> Result<()> {
        self.power_calls
            .lock()
            .unwrap()
            .push(format!("stop {}", machine_id));
        Ok(())
    }

    async fn reboot_virtual_machine(&self, machine_id: &str) -> Result<()> {
        self.power_calls
            .lock()
            .unwrap()
            .push(format!("reboot {}", machine_id));
        Ok(())
    }

    async fn list_templates(&self) -> Result<Vec<Template>> {
        Ok(Vec::new())
    }

    async fn list_service_offerings(&self) -> Result<Vec<ServiceOffering>> {
        Ok(Vec::new())
    }

    async fn list_disk_offerings(&self) -> Result<Vec<DiskOffering>> {
        Ok(Vec::new())
    }

    async fn list_public_ip_addresses(&self) -> Result<Vec<PublicIpAddress>> {
        Ok(self.ips.clone())
    }

    async fn list_networks(&self, _zone_id: &str) -> Result<Vec<Network>> {
        Ok(Vec::new())
    }

    async fn list_port_forwarding_rules(
        &self,
        _domain_id: Option<&str>,
    ) -> Result<Vec<PortForwardRule>> {
        Ok(self.rules.lock().unwrap().clone())
    }

    async fn list_firewall_rules(&self, _domain_id: Option<&str>) -> Result<Vec<FirewallRule>> {
        Ok(Vec::new())
    }

    async fn associate_ip_address(&self, _zone_id: &str) -> Result<IpAllocation> {
        Ok(IpAllocation {
            id: "ip-new".to_string(),
            address: None,
        })
    }

    async fn disassociate_ip_address(&self, _ip_id: &str) -> Result<JobRef> {
        Ok(JobRef {
            job_id: "job-1".to_string(),
        })
    }

    async fn create_port_forwarding_rule(&self, params: CreateForwardParams) -> Result<()> {
        let mut rules = self.rules.lock().unwrap();
        let rule = forward_rule(
            &format!("rule-{}", rules.len() + 1),
            &params.ip_address_id,
            &params.machine_id,
            params.public_port,
        );
        rules.push(rule);
        drop(rules);
        self.create_rule_calls.lock().unwrap().push(params);
        Ok(())
    }

    async fn delete_port_forwarding_rule(&self, rule_id: &str) -> Result<()> {
        if self.fail_rule_deletion {
            return Err(Error::Remote(format!("cannot delete rule {}", rule_id)));
        }
        self.delete_rule_calls.lock().unwrap().push(rule_id.to_string());
        Ok(())
    }
}

/// Recording in-memory configuration-management inventory
#[derive(Default)]
pub struct MockInventory {
    pub pending_certificates: Mutex<Vec<String>>,
    pub hooks_run: Mutex<Vec<String>>,
    pub cleaned_nodes: Mutex<Vec<String>>,
    pub sweep_count: Mutex<usize>,
    /// Make the pre-destroy hook fail
    pub fail_hook: bool,
}

#[async_trait]
impl NodeInventory for MockInventory {
    async fn register_pending_certificate(&self, machine_id: &str) -> Result<()> {
        self.pending_certificates
            .lock()
            .unwrap()
            .push(machine_id.to_string());
        Ok(())
    }

    async fn run_pre_destroy_hook(&self, machine: &Machine) -> Result<()> {
        if self.fail_hook {
            return Err(Error::Remote("scheduler unreachable".to_string()));
        }
        self.hooks_run.lock().unwrap().push(machine.id.clone());
        Ok(())
    }

    async fn clean_node(&self, machine: &Machine) -> Result<()> {
        self.cleaned_nodes.lock().unwrap().push(machine.name.clone());
        Ok(())
    }

    async fn sweep_offline_nodes(&self) -> Result<()> {
        *self.sweep_count.lock().unwrap() += 1;
        Ok(())
    }
}
