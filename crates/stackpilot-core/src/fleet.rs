//! Machine lookup and fleet listing

use crate::cloud::CloudApi;
use crate::error::Result;
use crate::model::Machine;

/// Resolve a machine id against an inventory snapshot.
///
/// Matching is exact id equality; ids are unique at the source of truth, so
/// ambiguity is not possible.
pub fn find_machine<'a>(machine_id: &str, machines: &'a [Machine]) -> Option<&'a Machine> {
    machines.iter().find(|m| m.id == machine_id)
}

/// List machines sorted by display name.
///
/// Unless `include_all` is set, only machines in an active state
/// (Starting, Running, Stopping) are returned.
pub async fn list_machines(
    cloud: &dyn CloudApi,
    domain_id: &str,
    include_all: bool,
) -> Result<Vec<Machine>> {
    let mut machines = cloud.list_virtual_machines(domain_id).await?;
    if !include_all {
        machines.retain(|m| m.state.is_active());
    }
    machines.sort_by(|a, b| a.display_name.cmp(&b.display_name));
    Ok(machines)
}
