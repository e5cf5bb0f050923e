//! Configuration-management inventory facade trait

use crate::error::Result;
use crate::model::Machine;
use async_trait::async_trait;

/// The certificate/inventory side of the configuration-management system.
///
/// The production implementation (`stackpilot-puppet`) talks to the puppet
/// certificate store, mcollective and Foreman; the reconcilers only depend
/// on this contract.
#[async_trait]
pub trait NodeInventory: Send + Sync {
    /// Record a freshly deployed machine so its agent certificate can be
    /// signed when it first checks in.
    async fn register_pending_certificate(&self, machine_id: &str) -> Result<()>;

    /// Scoped cleanup before the machine is destroyed, e.g. deregistering
    /// it from schedulers. Best-effort from the orchestrator's view.
    async fn run_pre_destroy_hook(&self, machine: &Machine) -> Result<()>;

    /// Remove the machine's node entry and certificate.
    async fn clean_node(&self, machine: &Machine) -> Result<()>;

    /// Fleet-wide sweep removing offline/orphaned node entries. Not scoped
    /// to any one machine; piggybacked on every destroy.
    async fn sweep_offline_nodes(&self) -> Result<()>;
}
