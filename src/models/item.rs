// Monitored item models (item.get)

use serde::{Deserialize, Serialize};

use crate::metric_kind::TargetMetric;

use super::serde_num;

/// Numeric storage type of an item; decides which history table is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Float,
    Unsigned,
}

impl ValueKind {
    /// Parse from Zabbix `value_type` (0 = numeric float). Everything else is read as unsigned.
    pub fn from_value_type(value_type: u64) -> Self {
        match value_type {
            0 => ValueKind::Float,
            _ => ValueKind::Unsigned,
        }
    }

    /// `history` parameter for history.get.
    pub fn history_type(self) -> u8 {
        match self {
            ValueKind::Float => 0,
            ValueKind::Unsigned => 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoredItem {
    #[serde(rename = "itemid")]
    pub item_id: String,
    pub name: String,
    /// Item key, e.g. `vm.memory.size[available]`. Sole input for unit handling.
    #[serde(rename = "key_")]
    pub key: String,
    #[serde(rename = "value_type", deserialize_with = "serde_num::value_kind")]
    pub value_kind: ValueKind,
    #[serde(rename = "hostid", default)]
    pub host_id: String,
    #[serde(default)]
    pub units: String,
}

/// An item whose key is on the target allow list, classified once.
#[derive(Debug, Clone)]
pub struct TargetItem {
    pub metric: TargetMetric,
    pub item: MonitoredItem,
}

impl TargetItem {
    /// None when the key is not an exact target key.
    pub fn classify(item: MonitoredItem) -> Option<Self> {
        TargetMetric::from_key(&item.key).map(|metric| Self { metric, item })
    }
}
