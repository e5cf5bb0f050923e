//! Pending-certificate registrations
//!
//! Newly deployed machine ids are appended here, one per line; the puppet
//! daemon signs the agent certificate for each registered id when the
//! machine first checks in.

use crate::error::Result;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

#[derive(Debug, Clone)]
pub struct PendingCertificates {
    path: PathBuf,
}

impl PendingCertificates {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub async fn register(&self, machine_id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(format!("{}\n", machine_id).as_bytes()).await?;
        tracing::debug!(machine_id, path = %self.path.display(), "registered pending certificate");
        Ok(())
    }
}
