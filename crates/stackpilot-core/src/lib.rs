//! stackpilot core
//!
//! Machine lifecycle reconciliation against a CloudStack cloud: duplicate-
//! avoiding deploys, ordered best-effort teardown, idempotent SSH
//! port-forward provisioning and fleet queries. The cloud control plane and
//! the configuration-management inventory are consumed through the
//! [`CloudApi`] and [`NodeInventory`] traits; no state is kept between
//! commands.

pub mod cloud;
pub mod config;
pub mod deploy;
pub mod error;
pub mod fleet;
pub mod inventory;
pub mod model;
pub mod portforward;
pub mod teardown;
pub mod userdata;

// Re-exports
pub use cloud::{CloudApi, CreateForwardParams, DeployParams, DeployedMachine, IpAllocation, JobRef};
pub use config::{ForemanSettings, Settings, find_config_file};
pub use deploy::{DeployRequest, deploy};
pub use error::{Error, Result};
pub use fleet::{find_machine, list_machines};
pub use inventory::NodeInventory;
pub use model::{
    DiskOffering, FirewallRule, Machine, MachineState, Network, PortForwardRule, PublicIpAddress,
    ServiceOffering, Template,
};
pub use portforward::{ForwardOutcome, SSH_PRIVATE_PORT, ensure_ssh_access};
pub use teardown::{StepOutcome, TeardownOrchestrator, TeardownReport, TeardownStep};
