//! Fixed-width table output for listings

use colored::Colorize;
use stackpilot_core::model::{
    DiskOffering, FirewallRule, Machine, Network, PortForwardRule, PublicIpAddress,
    ServiceOffering, Template,
};

fn header(line: String, width: usize) {
    println!("{}", line.bold());
    println!("{}", "─".repeat(width).dimmed());
}

pub fn print_machines(machines: &[Machine]) {
    header(
        format!("{:<12} {:<25} {:<12} {:<20}", "ID", "NAME", "STATE", "TEMPLATE"),
        72,
    );
    for machine in machines {
        let state = machine.state.to_string();
        let state_colored = if machine.state.is_active() {
            state.green()
        } else {
            state.dimmed()
        };
        println!(
            "{:<12} {:<25} {:<12} {:<20}",
            machine.id,
            machine.display_name,
            state_colored,
            machine.template_name.as_deref().unwrap_or("-"),
        );
    }
}

pub fn print_templates(templates: &[Template]) {
    header(
        format!("{:<12} {:<30} {:<12} {:<30}", "ID", "NAME", "ZONE", "DESCRIPTION"),
        88,
    );
    for template in templates {
        println!(
            "{:<12} {:<30} {:<12} {:<30}",
            template.id,
            template.name,
            template.zone_name.as_deref().unwrap_or("-"),
            template.display_text.as_deref().unwrap_or("-"),
        );
    }
}

pub fn print_service_offerings(offerings: &[ServiceOffering]) {
    header(
        format!("{:<12} {:<20} {:>6} {:>10}  {:<30}", "ID", "NAME", "CPUS", "MEMORY", "DESCRIPTION"),
        84,
    );
    for offering in offerings {
        println!(
            "{:<12} {:<20} {:>6} {:>10}  {:<30}",
            offering.id,
            offering.name,
            offering
                .cpu_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            offering
                .memory
                .map(|m| format!("{} MB", m))
                .unwrap_or_else(|| "-".to_string()),
            offering.display_text.as_deref().unwrap_or("-"),
        );
    }
}

pub fn print_disk_offerings(offerings: &[DiskOffering]) {
    header(
        format!("{:<12} {:<20} {:>8}  {:<30}", "ID", "NAME", "SIZE", "DESCRIPTION"),
        74,
    );
    for offering in offerings {
        println!(
            "{:<12} {:<20} {:>8}  {:<30}",
            offering.id,
            offering.name,
            offering
                .disk_size
                .map(|g| format!("{} GB", g))
                .unwrap_or_else(|| "-".to_string()),
            offering.display_text.as_deref().unwrap_or("-"),
        );
    }
}

pub fn print_public_ips(ips: &[PublicIpAddress]) {
    header(format!("{:<12} {:<18} {:<12}", "ID", "ADDRESS", "STATE"), 44);
    for ip in ips {
        println!(
            "{:<12} {:<18} {:<12}",
            ip.id,
            ip.address,
            ip.state.as_deref().unwrap_or("-"),
        );
    }
}

pub fn print_networks(networks: &[Network]) {
    header(
        format!("{:<12} {:<25} {:<25} {:<20}", "ID", "NAME", "DESCRIPTION", "DOMAIN"),
        84,
    );
    for network in networks {
        println!(
            "{:<12} {:<25} {:<25} {:<20}",
            network.id,
            network.name,
            network.display_text.as_deref().unwrap_or("-"),
            network.network_domain.as_deref().unwrap_or("-"),
        );
    }
}

pub fn print_port_forwards(rules: &[PortForwardRule]) {
    header(
        format!("{:<18} {:>7} {:>8} {:<6} {:<12}", "IP", "PUBLIC", "PRIVATE", "PROTO", "MACHINE"),
        56,
    );
    for rule in rules {
        println!(
            "{:<18} {:>7} {:>8} {:<6} {:<12}",
            rule.ip_address.as_deref().unwrap_or(&rule.ip_address_id),
            rule.public_port,
            rule.private_port,
            rule.protocol,
            rule.machine_id,
        );
    }
}

pub fn print_firewall_rules(rules: &[FirewallRule]) {
    header(
        format!("{:<18} {:<6} {:>7} {:>7} {:<18} {:<10}", "IP", "PROTO", "START", "END", "CIDR", "STATE"),
        72,
    );
    for rule in rules {
        println!(
            "{:<18} {:<6} {:>7} {:>7} {:<18} {:<10}",
            rule.ip_address.as_deref().unwrap_or("-"),
            rule.protocol,
            rule.start_port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            rule.end_port
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
            rule.cidr_list.as_deref().unwrap_or("-"),
            rule.state.as_deref().unwrap_or("-"),
        );
    }
}
