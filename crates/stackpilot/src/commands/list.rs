use crate::commands::Context;
use crate::pretty;
use crate::ListResource;
use stackpilot_core::CloudApi;

pub async fn handle(ctx: &Context, resource: ListResource) -> anyhow::Result<()> {
    match resource {
        ListResource::Templates => {
            let mut templates = ctx.cloud.list_templates().await?;
            templates.sort_by(|a, b| a.name.cmp(&b.name));
            pretty::print_templates(&templates);
        }
        ListResource::Serviceofferings => {
            let offerings = ctx.cloud.list_service_offerings().await?;
            pretty::print_service_offerings(&offerings);
        }
        ListResource::Diskofferings => {
            let offerings = ctx.cloud.list_disk_offerings().await?;
            pretty::print_disk_offerings(&offerings);
        }
        ListResource::Ip => {
            let ips = ctx.cloud.list_public_ip_addresses().await?;
            pretty::print_public_ips(&ips);
        }
        ListResource::Networks => {
            let mut networks = ctx.cloud.list_networks(&ctx.settings.zone_id).await?;
            networks.sort_by(|a, b| a.id.cmp(&b.id));
            pretty::print_networks(&networks);
        }
        ListResource::Portforwardings => {
            let mut rules = ctx
                .cloud
                .list_port_forwarding_rules(Some(&ctx.settings.domain_id))
                .await?;
            rules.sort_by(|a, b| b.private_port.cmp(&a.private_port));
            pretty::print_port_forwards(&rules);
        }
        ListResource::Firewall => {
            let mut rules = ctx
                .cloud
                .list_firewall_rules(Some(&ctx.settings.domain_id))
                .await?;
            rules.sort_by(|a, b| b.ip_address.cmp(&a.ip_address));
            pretty::print_firewall_rules(&rules);
        }
    }
    Ok(())
}
