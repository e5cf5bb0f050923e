mod common;

use common::{forward_rule, machine, public_ip, MockCloud};
use stackpilot_core::model::MachineState;
use stackpilot_core::{ensure_ssh_access, Error, ForwardOutcome};

#[tokio::test]
async fn unknown_machine_is_rejected_before_any_mutation() {
    let cloud = MockCloud::new(vec![machine("10", "web1", MachineState::Running)])
        .with_pool(vec![public_ip("ip-1", "198.51.100.1")], Vec::new());

    let err = ensure_ssh_access(&cloud, "29", "nope", 22001).await.unwrap_err();
    assert!(matches!(err, Error::MachineNotFound(_)));
    assert_eq!(cloud.mutation_count(), 0);
}

#[tokio::test]
async fn creates_one_rule_per_public_ip() {
    let cloud = MockCloud::new(vec![machine("5034", "lb1", MachineState::Running)]).with_pool(
        vec![
            public_ip("ip-1", "198.51.100.1"),
            public_ip("ip-2", "198.51.100.2"),
        ],
        Vec::new(),
    );

    let outcomes = ensure_ssh_access(&cloud, "29", "5034", 22001).await.unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(outcomes
        .iter()
        .all(|o| matches!(o, ForwardOutcome::Created { .. })));

    let created = cloud.create_rule_calls.lock().unwrap();
    assert_eq!(created.len(), 2);
    for params in created.iter() {
        assert_eq!(params.public_port, 22001);
        assert_eq!(params.private_port, 22);
        assert_eq!(params.protocol, "TCP");
        assert_eq!(params.machine_id, "5034");
        assert!(params.open_firewall);
    }
}

#[tokio::test]
async fn second_run_creates_no_duplicate_rules() {
    let cloud = MockCloud::new(vec![machine("5034", "lb1", MachineState::Running)]).with_pool(
        vec![
            public_ip("ip-1", "198.51.100.1"),
            public_ip("ip-2", "198.51.100.2"),
            public_ip("ip-3", "198.51.100.3"),
        ],
        Vec::new(),
    );

    let first = ensure_ssh_access(&cloud, "29", "5034", 22001).await.unwrap();
    assert_eq!(cloud.create_rule_calls.lock().unwrap().len(), 3);
    assert!(first
        .iter()
        .all(|o| matches!(o, ForwardOutcome::Created { .. })));

    let second = ensure_ssh_access(&cloud, "29", "5034", 22001).await.unwrap();
    assert_eq!(cloud.create_rule_calls.lock().unwrap().len(), 3);
    assert!(second
        .iter()
        .all(|o| matches!(o, ForwardOutcome::AlreadyForwarded { .. })));
}

#[tokio::test]
async fn covered_ip_is_skipped_and_the_rest_are_created() {
    let cloud = MockCloud::new(vec![machine("5034", "lb1", MachineState::Running)]).with_pool(
        vec![
            public_ip("ip-1", "198.51.100.1"),
            public_ip("ip-2", "198.51.100.2"),
            public_ip("ip-3", "198.51.100.3"),
        ],
        vec![forward_rule("r-1", "ip-2", "5034", 22001)],
    );

    let outcomes = ensure_ssh_access(&cloud, "29", "5034", 22001).await.unwrap();

    let created: Vec<_> = outcomes
        .iter()
        .filter(|o| matches!(o, ForwardOutcome::Created { .. }))
        .collect();
    assert_eq!(created.len(), 2);
    assert!(outcomes.contains(&ForwardOutcome::AlreadyForwarded {
        ip_address: "198.51.100.2".to_string(),
    }));
    assert_eq!(cloud.create_rule_calls.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn rules_for_other_ports_or_machines_do_not_count_as_coverage() {
    let cloud = MockCloud::new(vec![machine("5034", "lb1", MachineState::Running)]).with_pool(
        vec![public_ip("ip-1", "198.51.100.1")],
        vec![
            forward_rule("r-1", "ip-1", "5034", 80),
            forward_rule("r-2", "ip-1", "9999", 22001),
        ],
    );

    let outcomes = ensure_ssh_access(&cloud, "29", "5034", 22001).await.unwrap();
    assert_eq!(
        outcomes,
        vec![ForwardOutcome::Created {
            ip_address: "198.51.100.1".to_string(),
        }]
    );
}
