//! CloudStack facade for stackpilot
//!
//! A reqwest-based client for the CloudStack query API, implementing the
//! [`stackpilot_core::CloudApi`] trait. Requests are HMAC-SHA1 signed with
//! the account's secret key; responses are unwrapped from their command
//! envelopes and parsed into the typed records of `stackpilot-core` at this
//! boundary.

mod api;
pub mod client;
pub mod error;

pub use client::CloudStackClient;
pub use error::{CloudStackError, Result};
