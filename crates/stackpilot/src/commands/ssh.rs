use crate::commands::Context;
use colored::Colorize;
use stackpilot_core::{ensure_ssh_access, ForwardOutcome};

pub async fn handle(ctx: &Context, machine_id: &str, public_port: u16) -> anyhow::Result<()> {
    let outcomes =
        ensure_ssh_access(&ctx.cloud, &ctx.settings.domain_id, machine_id, public_port).await?;

    for outcome in &outcomes {
        match outcome {
            ForwardOutcome::Created { ip_address } => {
                println!(
                    "{}",
                    format!(
                        "machine {} is now reachable (via {}:{})",
                        machine_id, ip_address, public_port
                    )
                    .green()
                );
            }
            ForwardOutcome::AlreadyForwarded { ip_address } => {
                println!(
                    "machine {} already has a ssh portforward with ip {} to port {}",
                    machine_id, ip_address, public_port
                );
            }
        }
    }
    Ok(())
}
