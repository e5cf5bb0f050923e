use crate::commands::Context;
use colored::Colorize;
use stackpilot_core::TeardownOrchestrator;

pub async fn handle(ctx: &Context, machine_id: &str) -> anyhow::Result<()> {
    let orchestrator = TeardownOrchestrator::new(
        &ctx.cloud,
        &ctx.inventory,
        &ctx.settings.domain_id,
        &ctx.settings.puppet_master,
    );

    println!("destroying machine with id {}", machine_id);
    let report = orchestrator.destroy(machine_id).await?;

    for outcome in &report.steps {
        if outcome.success {
            println!("  {} {}: {}", "✓".green(), outcome.step, outcome.detail);
        } else {
            println!("  {} {}: {}", "✗".red(), outcome.step, outcome.detail);
        }
    }

    if report.is_success() {
        println!("{}", format!("machine {} destroyed", machine_id).green());
    } else {
        println!(
            "{}",
            format!(
                "machine {} destroyed, but {} cleanup step(s) failed; re-run destroy or clean up manually",
                machine_id,
                report.failed_steps().len()
            )
            .yellow()
        );
    }
    Ok(())
}
