//! Settings loading
//!
//! Settings come from a TOML file discovered in priority order, with
//! `STACKPILOT_`-prefixed environment variables layered on top:
//!
//! 1. the path in `STACKPILOT_CONFIG`
//! 2. `./stackpilot.toml`
//! 3. `<config dir>/stackpilot/config.toml`

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub api_key: String,
    pub secret_key: String,
    pub domain_id: String,
    pub zone_id: String,
    pub template_id: String,
    pub service_offering_id: String,
    /// Cloud-init document for machines that get a puppet agent
    pub cloudinit_puppet: String,
    /// Cloud-init document for base-image machines (manual certificates)
    pub cloudinit_base: String,
    /// Machine id of the puppet master, protected from destroy
    pub puppet_master: String,
    /// Address of the puppet master, embedded in the bootstrap payload
    pub puppet_master_host: String,
    #[serde(default = "default_pending_certs_path")]
    pub pending_certs_path: PathBuf,
    #[serde(default)]
    pub foreman: Option<ForemanSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForemanSettings {
    pub url: String,
    pub user: String,
    pub password: String,
    /// Hosts whose last report is older than this are swept
    #[serde(default = "default_stale_hours")]
    pub stale_hours: i64,
}

fn default_pending_certs_path() -> PathBuf {
    PathBuf::from("/var/lib/stackpilot/pending-certificates")
}

fn default_stale_hours() -> i64 {
    24
}

impl Settings {
    pub fn load() -> Result<Self> {
        let path = find_config_file()?;
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let built = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("STACKPILOT").separator("__"))
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        built
            .try_deserialize()
            .map_err(|e| Error::Config(e.to_string()))
    }
}

/// Locate the settings file, in priority order.
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var("STACKPILOT_CONFIG") {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
    }

    let local = PathBuf::from("stackpilot.toml");
    if local.exists() {
        return Ok(local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir.join("stackpilot").join("config.toml");
        if global.exists() {
            return Ok(global);
        }
    }

    Err(Error::Config(
        "no settings file found; create stackpilot.toml or set STACKPILOT_CONFIG".to_string(),
    ))
}
