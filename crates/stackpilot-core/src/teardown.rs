//! Teardown orchestrator
//!
//! An ordered, best-effort multi-step cleanup. Only the destroy call itself
//! must succeed; every later step is isolated so one failure cannot mask or
//! prevent the others, and the whole run is aggregated into a report.

use crate::cloud::CloudApi;
use crate::error::{Error, Result};
use crate::fleet::find_machine;
use crate::inventory::NodeInventory;

/// The named steps of a teardown, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownStep {
    PreDestroyHook,
    DestroyMachine,
    RemovePortForwards,
    CleanNode,
    SweepOfflineNodes,
}

impl std::fmt::Display for TeardownStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TeardownStep::PreDestroyHook => "pre-destroy hook",
            TeardownStep::DestroyMachine => "destroy machine",
            TeardownStep::RemovePortForwards => "remove port forwards",
            TeardownStep::CleanNode => "clean node",
            TeardownStep::SweepOfflineNodes => "sweep offline nodes",
        };
        write!(f, "{}", s)
    }
}

/// Outcome of a single teardown step
#[derive(Debug, Clone)]
pub struct StepOutcome {
    pub step: TeardownStep,
    pub success: bool,
    pub detail: String,
}

/// Aggregated outcomes of one teardown run
#[derive(Debug, Clone, Default)]
pub struct TeardownReport {
    pub steps: Vec<StepOutcome>,
}

impl TeardownReport {
    pub fn is_success(&self) -> bool {
        self.steps.iter().all(|s| s.success)
    }

    pub fn failed_steps(&self) -> Vec<&StepOutcome> {
        self.steps.iter().filter(|s| !s.success).collect()
    }

    fn record_success(&mut self, step: TeardownStep, detail: impl Into<String>) {
        self.steps.push(StepOutcome {
            step,
            success: true,
            detail: detail.into(),
        });
    }

    fn record_failure(&mut self, step: TeardownStep, detail: impl Into<String>) {
        self.steps.push(StepOutcome {
            step,
            success: false,
            detail: detail.into(),
        });
    }
}

/// Destroys a machine together with its dependent resources.
pub struct TeardownOrchestrator<'a> {
    cloud: &'a dyn CloudApi,
    inventory: &'a dyn NodeInventory,
    domain_id: String,
    /// The puppet master; never destroyable through this path
    protected_machine_id: String,
}

impl<'a> TeardownOrchestrator<'a> {
    pub fn new(
        cloud: &'a dyn CloudApi,
        inventory: &'a dyn NodeInventory,
        domain_id: impl Into<String>,
        protected_machine_id: impl Into<String>,
    ) -> Self {
        Self {
            cloud,
            inventory,
            domain_id: domain_id.into(),
            protected_machine_id: protected_machine_id.into(),
        }
    }

    /// Destroy `machine_id` and clean up its secondary state.
    ///
    /// Fails fast with no remote mutation on an unknown id or the protected
    /// puppet master. A failed destroy call aborts the run; failures in the
    /// cleanup steps after it are recorded in the report and the run
    /// continues, since re-running destroy repairs them.
    pub async fn destroy(&self, machine_id: &str) -> Result<TeardownReport> {
        let machines = self.cloud.list_virtual_machines(&self.domain_id).await?;
        let machine = find_machine(machine_id, &machines)
            .ok_or_else(|| Error::MachineNotFound(machine_id.to_string()))?
            .clone();

        if machine.id == self.protected_machine_id {
            return Err(Error::Conflict(
                "You are not allowed to destroy the puppet master".to_string(),
            ));
        }

        let mut report = TeardownReport::default();

        match self.inventory.run_pre_destroy_hook(&machine).await {
            Ok(()) => report.record_success(
                TeardownStep::PreDestroyHook,
                format!("cleanup hook ran on {}", machine.name),
            ),
            Err(e) => {
                tracing::warn!(machine = %machine.name, error = %e, "pre-destroy hook failed");
                report.record_failure(TeardownStep::PreDestroyHook, e.to_string());
            }
        }

        // The authoritative deletion. Everything after this assumes the VM
        // no longer exists, so a failure here aborts the run.
        self.cloud.destroy_virtual_machine(&machine.id).await?;
        report.record_success(
            TeardownStep::DestroyMachine,
            format!("destroyed machine {}", machine.id),
        );

        match self.cloud.list_port_forwarding_rules(None).await {
            Ok(rules) => {
                let mut removed = 0usize;
                let mut failures = Vec::new();
                for rule in rules.iter().filter(|r| r.machine_id == machine.id) {
                    match self.cloud.delete_port_forwarding_rule(&rule.id).await {
                        Ok(()) => removed += 1,
                        Err(e) => {
                            tracing::warn!(rule = %rule.id, error = %e, "failed to delete port forward");
                            failures.push(format!("rule {}: {}", rule.id, e));
                        }
                    }
                }
                if failures.is_empty() {
                    report.record_success(
                        TeardownStep::RemovePortForwards,
                        format!("removed {} port forward(s)", removed),
                    );
                } else {
                    report.record_failure(TeardownStep::RemovePortForwards, failures.join("; "));
                }
            }
            Err(e) => report.record_failure(TeardownStep::RemovePortForwards, e.to_string()),
        }

        match self.inventory.clean_node(&machine).await {
            Ok(()) => report.record_success(
                TeardownStep::CleanNode,
                format!("cleaned node entry for {}", machine.name),
            ),
            Err(e) => {
                tracing::warn!(machine = %machine.name, error = %e, "node clean failed");
                report.record_failure(TeardownStep::CleanNode, e.to_string());
            }
        }

        match self.inventory.sweep_offline_nodes().await {
            Ok(()) => {
                report.record_success(TeardownStep::SweepOfflineNodes, "swept offline nodes")
            }
            Err(e) => {
                tracing::warn!(error = %e, "offline node sweep failed");
                report.record_failure(TeardownStep::SweepOfflineNodes, e.to_string());
            }
        }

        Ok(report)
    }
}
