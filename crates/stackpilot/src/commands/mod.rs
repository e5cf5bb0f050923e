pub mod deploy;
pub mod destroy;
pub mod ip;
pub mod kick;
pub mod list;
pub mod mco;
pub mod portfw;
pub mod power;
pub mod ssh;
pub mod status;

use stackpilot_cloudstack::CloudStackClient;
use stackpilot_core::Settings;
use stackpilot_puppet::PuppetInventory;

/// Everything a command handler needs: settings and the two collaborators.
pub struct Context {
    pub settings: Settings,
    pub cloud: CloudStackClient,
    pub inventory: PuppetInventory,
}
