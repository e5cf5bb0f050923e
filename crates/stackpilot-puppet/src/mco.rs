//! mcollective subprocess wrapper
//!
//! Wraps the `mco` CLI for fleet-wide commands. Every invocation is bounded
//! by a timeout; exceeding it is reported distinctly from a failing command
//! so the operator can tell a hung broker from a refused request.

use crate::error::{PuppetError, Result};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// mcollective discovery filter on a hostname fact
pub fn hostname_filter(name: &str) -> String {
    format!("hostname={}", name)
}

/// mcollective discovery filter on a role fact
pub fn role_filter(role: &str) -> String {
    format!("role={}", role)
}

/// Run a program with arguments under a deadline and return its stdout.
pub(crate) async fn run_with_timeout(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<String> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    tracing::debug!("Running: {} {}", program, args.join(" "));

    let output = tokio::time::timeout(timeout, cmd.output())
        .await
        .map_err(|_| PuppetError::Timeout {
            seconds: timeout.as_secs(),
            command: format!("{} {}", program, args.join(" ")),
        })??;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).to_string()
        } else {
            stderr.to_string()
        };
        return Err(PuppetError::CommandFailed(detail));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// The `mco` CLI
#[derive(Debug, Clone)]
pub struct Mco {
    timeout: Duration,
}

impl Mco {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Run an arbitrary mco command and return its output.
    pub async fn run(&self, args: &[String]) -> Result<String> {
        run_with_timeout("mco", args, self.timeout).await
    }

    /// Trigger a puppet run on every machine matched by `filter`.
    pub async fn kick(&self, filter: &str) -> Result<String> {
        self.run(&kick_args(filter)).await
    }

    /// Disable the puppet agent on the machines matched by `filter`.
    pub async fn disable_agent(&self, filter: &str) -> Result<String> {
        self.run(&[
            "puppetd".to_string(),
            "disable".to_string(),
            "-F".to_string(),
            filter.to_string(),
        ])
        .await
    }
}

impl Default for Mco {
    fn default() -> Self {
        Self::new()
    }
}

fn kick_args(filter: &str) -> Vec<String> {
    vec![
        "puppetd".to_string(),
        "runonce".to_string(),
        "-F".to_string(),
        filter.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kick_builds_a_filtered_runonce() {
        assert_eq!(
            kick_args(&role_filter("lvs")),
            vec!["puppetd", "runonce", "-F", "role=lvs"]
        );
        assert_eq!(
            kick_args(&hostname_filter("lb1")),
            vec!["puppetd", "runonce", "-F", "hostname=lb1"]
        );
    }

    #[tokio::test]
    async fn commands_exceeding_the_deadline_time_out() {
        let err = run_with_timeout("sleep", &["5".to_string()], Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, PuppetError::Timeout { .. }));
    }

    #[tokio::test]
    async fn failing_commands_report_command_failed() {
        let err = run_with_timeout("false", &[], Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, PuppetError::CommandFailed(_)));
    }

    #[tokio::test]
    async fn stdout_is_returned_on_success() {
        let out = run_with_timeout("echo", &["hi".to_string()], Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(out.trim(), "hi");
    }
}
