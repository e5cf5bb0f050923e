mod common;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use common::{machine, test_settings, MockCloud, MockInventory};
use stackpilot_core::model::MachineState;
use stackpilot_core::{deploy, DeployRequest, Error};
use std::collections::BTreeMap;

fn role(role: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("role".to_string(), role.to_string())])
}

fn request(display_name: &str) -> DeployRequest {
    DeployRequest {
        display_name: display_name.to_string(),
        attributes: role("lvs"),
        network_ids: None,
        use_base_image: false,
    }
}

#[tokio::test]
async fn missing_attributes_is_a_usage_error_with_no_remote_calls() {
    let cloud = MockCloud::new(Vec::new());
    let inventory = MockInventory::default();
    let mut req = request("lb1");
    req.attributes.clear();

    let err = deploy(&cloud, &inventory, &test_settings(), &req)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Usage(_)));
    assert_eq!(cloud.mutation_count(), 0);
}

#[tokio::test]
async fn duplicate_display_name_conflicts_without_mutation() {
    let cloud = MockCloud::new(vec![machine("10", "lb1", MachineState::Running)]);
    let inventory = MockInventory::default();

    let err = deploy(&cloud, &inventory, &test_settings(), &request("lb1"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Conflict(_)));
    assert_eq!(cloud.mutation_count(), 0);
    assert!(inventory.pending_certificates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn terminal_machines_do_not_block_name_reuse() {
    let cloud = MockCloud::new(vec![
        machine("10", "lb1", MachineState::Destroyed),
        machine("11", "lb1", MachineState::Expunging),
    ]);
    let inventory = MockInventory::default();

    let id = deploy(&cloud, &inventory, &test_settings(), &request("lb1"))
        .await
        .unwrap();
    assert_eq!(id, "new-machine");
    assert_eq!(cloud.deploy_calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn base_image_deploy_skips_certificate_registration() {
    let cloud = MockCloud::new(Vec::new());
    let inventory = MockInventory::default();
    let mut req = request("puppetmaster");
    req.use_base_image = true;

    deploy(&cloud, &inventory, &test_settings(), &req)
        .await
        .unwrap();

    assert!(inventory.pending_certificates.lock().unwrap().is_empty());
    let calls = cloud.deploy_calls.lock().unwrap();
    let decoded = BASE64.decode(&calls[0].user_data).unwrap();
    let payload = String::from_utf8(decoded).unwrap();
    assert!(payload.contains("base.cloudinit"));
}

#[tokio::test]
async fn agent_deploy_registers_exactly_one_certificate_for_the_new_id() {
    let cloud = MockCloud::new(Vec::new());
    let inventory = MockInventory::default();

    let id = deploy(&cloud, &inventory, &test_settings(), &request("lb1"))
        .await
        .unwrap();

    let certs = inventory.pending_certificates.lock().unwrap();
    assert_eq!(certs.as_slice(), [id]);
}

// The worked example: deploy lb1 with role=lvs and extra networks against
// an inventory with no lb1.
#[tokio::test]
async fn deploy_example_lb1() {
    let cloud = MockCloud::new(vec![machine("10", "web1", MachineState::Running)]);
    let inventory = MockInventory::default();
    let req = DeployRequest {
        display_name: "lb1".to_string(),
        attributes: role("lvs"),
        network_ids: Some("312,313".to_string()),
        use_base_image: false,
    };

    let id = deploy(&cloud, &inventory, &test_settings(), &req)
        .await
        .unwrap();

    let calls = cloud.deploy_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.display_name, "lb1");
    assert_eq!(call.network_ids.as_deref(), Some("312,313"));
    assert_eq!(call.service_offering_id, "17");
    assert_eq!(call.template_id, "519");
    assert_eq!(call.zone_id, "6");
    assert_eq!(call.domain_id, "29");

    let payload = String::from_utf8(BASE64.decode(&call.user_data).unwrap()).unwrap();
    assert!(payload.contains("puppet-agent.cloudinit"));
    assert!(payload.contains(r#""role":"lvs""#));
    assert!(payload.contains(r#""puppetmaster":"puppet.example.net""#));

    assert_eq!(
        inventory.pending_certificates.lock().unwrap().as_slice(),
        [id]
    );
}
