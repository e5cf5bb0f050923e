//! Foreman inventory client
//!
//! A thin client for the Foreman hosts API, used by the offline-node sweep:
//! hosts whose last report is older than the configured staleness window
//! (or that never reported) are deleted from the inventory.

use crate::error::{PuppetError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use stackpilot_core::ForemanSettings;

#[derive(Debug, Clone, Deserialize)]
pub struct ForemanHost {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub last_report: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct HostIndex {
    results: Vec<ForemanHost>,
}

pub struct ForemanClient {
    http: reqwest::Client,
    base_url: String,
    user: String,
    password: String,
    stale_after: Duration,
}

impl ForemanClient {
    pub fn new(settings: &ForemanSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.url.trim_end_matches('/').to_string(),
            user: settings.user.clone(),
            password: settings.password.clone(),
            stale_after: Duration::hours(settings.stale_hours),
        }
    }

    pub async fn list_hosts(&self) -> Result<Vec<ForemanHost>> {
        let url = format!("{}/api/hosts?per_page=1000", self.base_url);
        let response = self
            .http
            .get(&url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PuppetError::Foreman(format!(
                "host listing returned HTTP {}",
                response.status()
            )));
        }

        let index: HostIndex = response.json().await?;
        Ok(index.results)
    }

    pub async fn delete_host(&self, id: u64) -> Result<()> {
        let url = format!("{}/api/hosts/{}", self.base_url, id);
        let response = self
            .http
            .delete(&url)
            .basic_auth(&self.user, Some(&self.password))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PuppetError::Foreman(format!(
                "deleting host {} returned HTTP {}",
                id,
                response.status()
            )));
        }
        Ok(())
    }

    /// Delete every stale host. A failed deletion is logged and the sweep
    /// moves on; the next destroy retries it anyway.
    pub async fn sweep_offline(&self) -> Result<usize> {
        let cutoff = Utc::now() - self.stale_after;
        let hosts = self.list_hosts().await?;

        let mut removed = 0usize;
        for host in hosts.iter().filter(|h| is_stale(h, cutoff)) {
            match self.delete_host(host.id).await {
                Ok(()) => {
                    tracing::info!(host = %host.name, "removed offline node");
                    removed += 1;
                }
                Err(e) => {
                    tracing::warn!(host = %host.name, error = %e, "failed to remove offline node");
                }
            }
        }
        Ok(removed)
    }
}

fn is_stale(host: &ForemanHost, cutoff: DateTime<Utc>) -> bool {
    match host.last_report {
        Some(last_report) => last_report < cutoff,
        // never reported in at all
        None => true,
    }
}
