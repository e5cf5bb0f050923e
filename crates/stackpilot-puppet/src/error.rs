//! Puppet/mcollective/Foreman error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PuppetError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Command timed out after {seconds}s: {command}")]
    Timeout { seconds: u64, command: String },

    #[error("Foreman API error: {0}")]
    Foreman(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<PuppetError> for stackpilot_core::Error {
    fn from(err: PuppetError) -> Self {
        match err {
            PuppetError::Timeout { .. } => stackpilot_core::Error::Timeout(err.to_string()),
            other => stackpilot_core::Error::Remote(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PuppetError>;
