//! Core error taxonomy

use thiserror::Error;

/// Errors surfaced by the reconcilers and their collaborators
#[derive(Error, Debug)]
pub enum Error {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("No machine found with the id {0}")]
    MachineNotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Remote call failed: {0}")]
    Remote(String),

    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
