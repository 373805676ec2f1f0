// Group <-> host membership index, built once per run before any host is processed.

use tracing::debug;

use crate::models::{GroupEntry, GroupIndex, Host, HostGroup};

/// Builds both directions from the same membership pairs, so every host listed under a
/// group has that group among its own names and vice versa. Memberships pointing at
/// groups missing from `groups` are dropped.
pub fn build_group_index(
    groups: &[HostGroup],
    hosts: &[Host],
    generation_date: String,
) -> GroupIndex {
    let mut index = GroupIndex {
        groups: groups
            .iter()
            .map(|g| {
                (
                    g.group_id.clone(),
                    GroupEntry {
                        name: g.name.clone(),
                        hosts: Vec::new(),
                    },
                )
            })
            .collect(),
        host_to_groups: Default::default(),
        generation_date,
    };

    for host in hosts {
        let names = index.host_to_groups.entry(host.host.clone()).or_default();
        for group_ref in &host.groups {
            let Some(entry) = index.groups.get_mut(&group_ref.group_id) else {
                debug!(
                    host = %host.host,
                    group_id = %group_ref.group_id,
                    "host references a group missing from hostgroup.get"
                );
                continue;
            };
            if !entry.hosts.contains(&host.host) {
                entry.hosts.push(host.host.clone());
            }
            if !names.contains(&entry.name) {
                names.push(entry.name.clone());
            }
        }
    }

    index
}
