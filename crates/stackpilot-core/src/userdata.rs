//! Bootstrap payload ("user data") rendering

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::collections::BTreeMap;

/// The document handed to a machine's first-boot agent.
///
/// Built fresh per deploy from the selected cloud-init URL, the puppet
/// master address and the caller's role attributes; never retained.
#[derive(Debug, Clone)]
pub struct BootstrapPayload {
    cloudinit_url: String,
    puppet_master: String,
    attributes: BTreeMap<String, String>,
}

impl BootstrapPayload {
    pub fn new(
        cloudinit_url: impl Into<String>,
        puppet_master: impl Into<String>,
        attributes: BTreeMap<String, String>,
    ) -> Self {
        Self {
            cloudinit_url: cloudinit_url.into(),
            puppet_master: puppet_master.into(),
            attributes,
        }
    }

    /// Render the payload as a JSON document.
    ///
    /// BTreeMap keys give a deterministic field order, so identical deploys
    /// produce identical payloads.
    pub fn render(&self) -> String {
        let mut doc = BTreeMap::new();
        doc.insert("cloudinit", self.cloudinit_url.as_str());
        doc.insert("puppetmaster", self.puppet_master.as_str());
        for (key, value) in &self.attributes {
            doc.insert(key.as_str(), value.as_str());
        }
        serde_json::to_string(&doc).expect("string map serializes")
    }

    /// Base64 of the rendered document, as submitted to the deploy call.
    pub fn encoded(&self) -> String {
        BASE64.encode(self.render())
    }
}
