//! `NodeInventory` implementation

use crate::certs::PendingCertificates;
use crate::foreman::ForemanClient;
use crate::mco::{self, Mco};
use async_trait::async_trait;
use stackpilot_core::model::Machine;
use stackpilot_core::{NodeInventory, Result, Settings};
use std::time::Duration;

const NODE_CLEAN_TIMEOUT: Duration = Duration::from_secs(30);

/// The puppet-side inventory: certificate store, mcollective and Foreman.
pub struct PuppetInventory {
    mco: Mco,
    certs: PendingCertificates,
    foreman: Option<ForemanClient>,
}

impl PuppetInventory {
    pub fn new(settings: &Settings) -> Self {
        Self {
            mco: Mco::new(),
            certs: PendingCertificates::new(settings.pending_certs_path.clone()),
            foreman: settings.foreman.as_ref().map(ForemanClient::new),
        }
    }
}

#[async_trait]
impl NodeInventory for PuppetInventory {
    async fn register_pending_certificate(&self, machine_id: &str) -> Result<()> {
        self.certs.register(machine_id).await?;
        Ok(())
    }

    async fn run_pre_destroy_hook(&self, machine: &Machine) -> Result<()> {
        // Stop the agent first so no configuration run races the teardown.
        self.mco
            .disable_agent(&mco::hostname_filter(&machine.name))
            .await?;
        Ok(())
    }

    async fn clean_node(&self, machine: &Machine) -> Result<()> {
        mco::run_with_timeout(
            "puppet",
            &[
                "node".to_string(),
                "clean".to_string(),
                machine.name.clone(),
            ],
            NODE_CLEAN_TIMEOUT,
        )
        .await?;
        Ok(())
    }

    async fn sweep_offline_nodes(&self) -> Result<()> {
        match &self.foreman {
            Some(foreman) => {
                let removed = foreman.sweep_offline().await?;
                tracing::info!(removed, "swept offline nodes from foreman");
                Ok(())
            }
            None => {
                tracing::debug!("foreman not configured, skipping offline sweep");
                Ok(())
            }
        }
    }
}
