//! Deploy reconciler
//!
//! Decides duplicate-avoidance against a fresh inventory snapshot and
//! issues the create call with a generated bootstrap payload.

use crate::cloud::{CloudApi, DeployParams};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::inventory::NodeInventory;
use crate::userdata::BootstrapPayload;
use std::collections::BTreeMap;

/// A requested deploy
#[derive(Debug, Clone)]
pub struct DeployRequest {
    pub display_name: String,
    /// Role and any further key/value metadata for the bootstrap payload
    pub attributes: BTreeMap<String, String>,
    /// Comma-separated extra network ids
    pub network_ids: Option<String>,
    /// Deploy from the base image, without a puppet agent. Needed for the
    /// puppet master itself, whose certificate is handled manually.
    pub use_base_image: bool,
}

/// Deploy a machine, refusing duplicates by display name.
///
/// Display names must be unique among machines that are not in a terminal
/// state; the cloud API does not enforce this, so it is checked here before
/// any mutation. Returns the new machine id.
pub async fn deploy(
    cloud: &dyn CloudApi,
    inventory: &dyn NodeInventory,
    settings: &Settings,
    request: &DeployRequest,
) -> Result<String> {
    if request.display_name.is_empty() {
        return Err(Error::Usage("specify a machine display name".to_string()));
    }
    if request.attributes.is_empty() {
        return Err(Error::Usage(
            "specify the machine attributes, at least its role".to_string(),
        ));
    }

    let machines = cloud.list_virtual_machines(&settings.domain_id).await?;
    let duplicate = machines
        .iter()
        .any(|m| !m.state.is_terminal() && m.display_name == request.display_name);
    if duplicate {
        return Err(Error::Conflict(format!(
            "A machine with the name {} already exists",
            request.display_name
        )));
    }

    let cloudinit_url = if request.use_base_image {
        &settings.cloudinit_base
    } else {
        &settings.cloudinit_puppet
    };
    let payload = BootstrapPayload::new(
        cloudinit_url,
        &settings.puppet_master_host,
        request.attributes.clone(),
    );

    tracing::debug!(display_name = %request.display_name, base = request.use_base_image, "deploying machine");
    let deployed = cloud
        .deploy_virtual_machine(DeployParams {
            service_offering_id: settings.service_offering_id.clone(),
            template_id: settings.template_id.clone(),
            zone_id: settings.zone_id.clone(),
            domain_id: settings.domain_id.clone(),
            display_name: request.display_name.clone(),
            user_data: payload.encoded(),
            network_ids: request.network_ids.clone(),
        })
        .await?;

    // The puppet daemon signs certificates for ids registered here. Base
    // image deploys have no agent, so nothing to sign.
    if !request.use_base_image {
        inventory
            .register_pending_certificate(&deployed.id)
            .await?;
    }

    Ok(deployed.id)
}
