use crate::commands::Context;
use colored::Colorize;
use stackpilot_core::{find_machine, CloudApi, Error};

#[derive(Debug, Clone, Copy)]
pub enum PowerAction {
    Start,
    Stop,
    Reboot,
}

pub async fn handle(ctx: &Context, action: PowerAction, machine_id: &str) -> anyhow::Result<()> {
    let machines = ctx
        .cloud
        .list_virtual_machines(&ctx.settings.domain_id)
        .await?;
    let machine = find_machine(machine_id, &machines)
        .ok_or_else(|| Error::MachineNotFound(machine_id.to_string()))?;

    match action {
        PowerAction::Start => {
            println!("starting machine with id {}", machine.id);
            ctx.cloud.start_virtual_machine(&machine.id).await?;
        }
        PowerAction::Stop => {
            println!("stopping machine with id {}", machine.id);
            ctx.cloud.stop_virtual_machine(&machine.id).await?;
        }
        PowerAction::Reboot => {
            println!("rebooting machine with id {}", machine.id);
            ctx.cloud.reboot_virtual_machine(&machine.id).await?;
        }
    }
    println!("{}", "✓ done".green());
    Ok(())
}
