//! Puppet, mcollective and Foreman integration for stackpilot
//!
//! Implements the [`stackpilot_core::NodeInventory`] contract: pending
//! certificate registrations, pre-destroy agent disabling, node cleanup and
//! the fleet-wide offline sweep. Also exposes the [`Mco`] wrapper used by
//! the `kick` and `mco` commands.

pub mod certs;
pub mod error;
pub mod foreman;
pub mod inventory;
pub mod mco;

pub use error::{PuppetError, Result};
pub use inventory::PuppetInventory;
pub use mco::{hostname_filter, role_filter, Mco};
