//! CloudStack client error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudStackError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CloudStack API error {code}: {message}")]
    Api { code: u64, message: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl From<CloudStackError> for stackpilot_core::Error {
    fn from(err: CloudStackError) -> Self {
        stackpilot_core::Error::Remote(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CloudStackError>;
