use crate::commands::Context;
use crate::PoolResource;
use colored::Colorize;
use stackpilot_core::CloudApi;

pub async fn handle_request(ctx: &Context, resource: PoolResource) -> anyhow::Result<()> {
    match resource {
        PoolResource::Ip => {
            let allocation = ctx
                .cloud
                .associate_ip_address(&ctx.settings.zone_id)
                .await?;
            println!(
                "{}",
                format!("created ip address with id {}", allocation.id).green()
            );
        }
    }
    Ok(())
}

pub async fn handle_release(ctx: &Context, resource: PoolResource, id: &str) -> anyhow::Result<()> {
    match resource {
        PoolResource::Ip => {
            let job = ctx.cloud.disassociate_ip_address(id).await?;
            println!(
                "{}",
                format!("releasing ip address, job id: {}", job.job_id).green()
            );
        }
    }
    Ok(())
}
