use crate::commands::Context;
use colored::Colorize;
use stackpilot_core::{CloudApi, CreateForwardParams};

pub async fn handle(
    ctx: &Context,
    machine_id: &str,
    ip_id: &str,
    public_port: u16,
    private_port: u16,
) -> anyhow::Result<()> {
    ctx.cloud
        .create_port_forwarding_rule(CreateForwardParams {
            ip_address_id: ip_id.to_string(),
            public_port,
            private_port,
            protocol: "TCP".to_string(),
            machine_id: machine_id.to_string(),
            open_firewall: false,
        })
        .await?;
    println!(
        "{}",
        format!(
            "added portforward for machine {} ({} -> {})",
            machine_id, public_port, private_port
        )
        .green()
    );
    Ok(())
}
