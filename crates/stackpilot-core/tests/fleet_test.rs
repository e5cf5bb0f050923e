mod common;

use common::{machine, MockCloud};
use stackpilot_core::model::MachineState;
use stackpilot_core::{find_machine, list_machines};

fn mixed_fleet() -> MockCloud {
    MockCloud::new(vec![
        machine("3", "web2", MachineState::Running),
        machine("1", "db1", MachineState::Stopped),
        machine("2", "web1", MachineState::Starting),
        machine("4", "lb1", MachineState::Stopping),
        machine("5", "old1", MachineState::Destroyed),
    ])
}

#[tokio::test]
async fn default_listing_keeps_only_active_states() {
    let cloud = mixed_fleet();
    let machines = list_machines(&cloud, "29", false).await.unwrap();

    let names: Vec<_> = machines.iter().map(|m| m.display_name.as_str()).collect();
    assert_eq!(names, vec!["lb1", "web1", "web2"]);
    assert!(machines.iter().all(|m| m.state.is_active()));
}

#[tokio::test]
async fn full_listing_is_sorted_by_display_name() {
    let cloud = mixed_fleet();
    let machines = list_machines(&cloud, "29", true).await.unwrap();

    let names: Vec<_> = machines.iter().map(|m| m.display_name.as_str()).collect();
    assert_eq!(names, vec!["db1", "lb1", "old1", "web1", "web2"]);
}

#[test]
fn find_machine_matches_exact_id_only() {
    let machines = vec![
        machine("5034", "lb1", MachineState::Running),
        machine("503", "lb2", MachineState::Running),
    ];

    assert_eq!(find_machine("5034", &machines).unwrap().display_name, "lb1");
    assert_eq!(find_machine("503", &machines).unwrap().display_name, "lb2");
    assert!(find_machine("50", &machines).is_none());
}
