use crate::commands::Context;
use stackpilot_core::{find_machine, CloudApi, Error};
use stackpilot_puppet::{hostname_filter, role_filter, Mco};
use std::time::Duration;

/// Fleet-wide puppet runs take a while; well beyond the default mco bound.
const KICK_TIMEOUT: Duration = Duration::from_secs(300);

pub async fn handle(
    ctx: &Context,
    machine_id: Option<&str>,
    role: Option<&str>,
) -> anyhow::Result<()> {
    let filter = match (machine_id, role) {
        (_, Some(role)) => role_filter(role),
        (Some(machine_id), None) => {
            let machines = ctx
                .cloud
                .list_virtual_machines(&ctx.settings.domain_id)
                .await?;
            let machine = find_machine(machine_id, &machines)
                .ok_or_else(|| Error::MachineNotFound(machine_id.to_string()))?;
            hostname_filter(&machine.name)
        }
        (None, None) => {
            return Err(Error::Usage("specify a machine id or --role".to_string()).into());
        }
    };

    let output = Mco::with_timeout(KICK_TIMEOUT).kick(&filter).await?;
    print!("{}", output);
    Ok(())
}
