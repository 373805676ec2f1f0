// Host and host group models (hostgroup.get, host.get)

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostGroup {
    #[serde(rename = "groupid")]
    pub group_id: String,
    pub name: String,
}

/// Group membership as embedded in host.get output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupRef {
    #[serde(rename = "groupid")]
    pub group_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Host {
    #[serde(rename = "hostid")]
    pub host_id: String,
    /// Technical host name; report files are keyed by it.
    pub host: String,
    /// Visible name.
    #[serde(default)]
    pub name: String,
    /// Newer servers return memberships under `hostgroups`.
    #[serde(default, alias = "hostgroups")]
    pub groups: Vec<GroupRef>,
}
