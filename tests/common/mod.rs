// Shared test helpers: in-memory Zabbix fake with call recording, recording sink.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use zbx_report::models::*;
use zbx_report::monitoring::{HostDirectory, MonitoringApi};
use zbx_report::sink::ReportSink;
use zbx_report::zabbix_repo::ApiError;

pub const WINDOW: ReportWindow = ReportWindow {
    start: 1_700_000_000,
    end: 1_702_592_000,
};

pub fn item(item_id: &str, name: &str, key: &str, value_kind: ValueKind) -> MonitoredItem {
    MonitoredItem {
        item_id: item_id.to_string(),
        name: name.to_string(),
        key: key.to_string(),
        value_kind,
        host_id: String::new(),
        units: String::new(),
    }
}

/// Classified item; panics when `key` is not a target key.
pub fn target(item_id: &str, name: &str, key: &str, value_kind: ValueKind) -> TargetItem {
    TargetItem::classify(item(item_id, name, key, value_kind)).expect("target key")
}

pub fn host(host_id: &str, name: &str, group_ids: &[&str]) -> Host {
    Host {
        host_id: host_id.to_string(),
        host: name.to_string(),
        name: name.to_string(),
        groups: group_ids
            .iter()
            .map(|id| GroupRef {
                group_id: id.to_string(),
                name: String::new(),
            })
            .collect(),
    }
}

pub fn group(group_id: &str, name: &str) -> HostGroup {
    HostGroup {
        group_id: group_id.to_string(),
        name: name.to_string(),
    }
}

pub fn samples(values: &[&str]) -> Vec<RawSample> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| RawSample::new(1_700_000_000 + i as i64 * 60, v))
        .collect()
}

/// One history.get call as seen by the fake.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCall {
    pub item_id: String,
    pub history_type: u8,
    pub limit: usize,
}

#[derive(Default)]
pub struct FakeZabbix {
    pub groups: Vec<HostGroup>,
    pub hosts: Vec<Host>,
    pub items: HashMap<String, Vec<MonitoredItem>>,
    pub trends: HashMap<String, Vec<RollupBucket>>,
    pub history: HashMap<String, Vec<RawSample>>,
    pub failing_groups: bool,
    pub failing_items: HashSet<String>,
    pub failing_trends: HashSet<String>,
    pub failing_history: HashSet<String>,
    pub trend_calls: Mutex<Vec<String>>,
    pub history_calls: Mutex<Vec<HistoryCall>>,
}

impl FakeZabbix {
    pub fn trend_call_count(&self, item_id: &str) -> usize {
        self.trend_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|id| *id == item_id)
            .count()
    }

    pub fn history_calls_for(&self, item_id: &str) -> Vec<HistoryCall> {
        self.history_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.item_id == item_id)
            .cloned()
            .collect()
    }
}

impl MonitoringApi for FakeZabbix {
    async fn get_trends(
        &self,
        item_id: &str,
        _window: ReportWindow,
    ) -> Result<Vec<RollupBucket>, ApiError> {
        self.trend_calls.lock().unwrap().push(item_id.to_string());
        if self.failing_trends.contains(item_id) {
            return Err(ApiError::rpc("trend.get", "No permissions to referred object"));
        }
        Ok(self.trends.get(item_id).cloned().unwrap_or_default())
    }

    async fn get_history(
        &self,
        item_id: &str,
        _window: ReportWindow,
        history_type: u8,
        limit: usize,
    ) -> Result<Vec<RawSample>, ApiError> {
        self.history_calls.lock().unwrap().push(HistoryCall {
            item_id: item_id.to_string(),
            history_type,
            limit,
        });
        if self.failing_history.contains(item_id) {
            return Err(ApiError::rpc("history.get", "Invalid params"));
        }
        // Deliberately ignores `limit` so callers' truncation can be checked.
        Ok(self.history.get(item_id).cloned().unwrap_or_default())
    }
}

impl HostDirectory for FakeZabbix {
    async fn list_groups(&self) -> Result<Vec<HostGroup>, ApiError> {
        if self.failing_groups {
            return Err(ApiError::rpc("hostgroup.get", "Session terminated"));
        }
        Ok(self.groups.clone())
    }

    async fn list_hosts(&self) -> Result<Vec<Host>, ApiError> {
        Ok(self.hosts.clone())
    }

    async fn list_items(
        &self,
        host_id: &str,
        keys: &[&str],
    ) -> Result<Vec<MonitoredItem>, ApiError> {
        if self.failing_items.contains(host_id) {
            return Err(ApiError::rpc("item.get", "Invalid params"));
        }
        Ok(self
            .items
            .get(host_id)
            .map(|items| {
                items
                    .iter()
                    .filter(|i| keys.contains(&i.key.as_str()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub reports: Mutex<Vec<HostReport>>,
    pub index: Mutex<Option<GroupIndex>>,
    pub failing_hosts: HashSet<String>,
}

impl RecordingSink {
    pub fn report_for(&self, host: &str) -> Option<HostReport> {
        self.reports
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.host == host)
            .cloned()
    }

    pub fn report_count(&self) -> usize {
        self.reports.lock().unwrap().len()
    }
}

impl ReportSink for RecordingSink {
    async fn write_host_report(&self, report: &HostReport) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.failing_hosts.contains(&report.host),
            "disk full writing {}",
            report.host
        );
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }

    async fn write_group_index(&self, index: &GroupIndex) -> anyhow::Result<()> {
        *self.index.lock().unwrap() = Some(index.clone());
        Ok(())
    }
}
