//! Port-forward reconciler
//!
//! Ensures a machine is reachable over SSH through every public IP in the
//! pool, creating only the rules that are missing. Re-running with the same
//! arguments creates no duplicates, so the operation is safe to retry after
//! a partial failure.

use crate::cloud::{CloudApi, CreateForwardParams};
use crate::error::{Error, Result};
use crate::fleet::find_machine;

/// SSH on the machine side
pub const SSH_PRIVATE_PORT: u16 = 22;

/// Per-IP result of an `ensure_ssh_access` run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardOutcome {
    Created { ip_address: String },
    AlreadyForwarded { ip_address: String },
}

/// Expose `machine_id` on `public_port` via every public IP in the pool.
///
/// An IP counts as covered when an existing rule for this machine and
/// public port carries its ip-address id; protocol and private port are
/// deliberately not part of the comparison.
pub async fn ensure_ssh_access(
    cloud: &dyn CloudApi,
    domain_id: &str,
    machine_id: &str,
    public_port: u16,
) -> Result<Vec<ForwardOutcome>> {
    let machines = cloud.list_virtual_machines(domain_id).await?;
    let machine = find_machine(machine_id, &machines)
        .ok_or_else(|| Error::MachineNotFound(machine_id.to_string()))?;

    let rules = cloud.list_port_forwarding_rules(None).await?;
    let satisfied: Vec<_> = rules
        .iter()
        .filter(|r| r.machine_id == machine.id && r.public_port == public_port)
        .collect();

    let ips = cloud.list_public_ip_addresses().await?;
    let mut outcomes = Vec::with_capacity(ips.len());
    for ip in &ips {
        if satisfied.iter().any(|r| r.ip_address_id == ip.id) {
            outcomes.push(ForwardOutcome::AlreadyForwarded {
                ip_address: ip.address.clone(),
            });
            continue;
        }

        tracing::debug!(ip = %ip.address, port = public_port, machine = %machine.id, "creating ssh port forward");
        cloud
            .create_port_forwarding_rule(CreateForwardParams {
                ip_address_id: ip.id.clone(),
                public_port,
                private_port: SSH_PRIVATE_PORT,
                protocol: "TCP".to_string(),
                machine_id: machine.id.clone(),
                open_firewall: true,
            })
            .await?;
        outcomes.push(ForwardOutcome::Created {
            ip_address: ip.address.clone(),
        });
    }

    Ok(outcomes)
}
