use crate::commands::Context;
use crate::pretty;
use colored::Colorize;
use stackpilot_core::list_machines;

pub async fn handle(ctx: &Context, all: bool) -> anyhow::Result<()> {
    let machines = list_machines(&ctx.cloud, &ctx.settings.domain_id, all).await?;

    if machines.is_empty() {
        println!("{}", "no machines".dimmed());
        return Ok(());
    }
    pretty::print_machines(&machines);
    Ok(())
}
