// Report output models: per-host table, group side index, run counters

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Column header of every host report (row 0).
pub const REPORT_HEADER: [&str; 7] = ["Metric", "Min", "Max", "Avg", "Samples", "Host_Groups", "Unit"];

/// Time range summarized by one run, in unix seconds (inclusive on both ends).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    pub start: i64,
    pub end: i64,
}

impl ReportWindow {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Window ending at `end` and reaching back `days` days.
    pub fn trailing_days(end: DateTime<Utc>, days: u32) -> Self {
        let start = end - Duration::days(i64::from(days));
        Self {
            start: start.timestamp(),
            end: end.timestamp(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub metric: String,
    pub min: String,
    pub max: String,
    pub avg: String,
    pub samples: usize,
    /// Group names joined with `;`.
    pub host_groups: String,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HostReport {
    pub host: String,
    pub rows: Vec<ReportRow>,
}

impl HostReport {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            rows: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    pub name: String,
    pub hosts: Vec<String>,
}

/// Group ↔ host membership, written next to the host reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupIndex {
    /// Keyed by group id.
    pub groups: BTreeMap<String, GroupEntry>,
    pub host_to_groups: BTreeMap<String, Vec<String>>,
    pub generation_date: String,
}

impl GroupIndex {
    pub fn groups_of(&self, host: &str) -> &[String] {
        self.host_to_groups
            .get(host)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// `Host_Groups` column value.
    pub fn groups_label(&self, host: &str) -> String {
        self.groups_of(host).join(";")
    }
}

/// Counters logged at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub hosts_total: usize,
    /// Hosts with at least one target item (whether or not they had data).
    pub hosts_processed: usize,
    pub hosts_with_data: usize,
    /// Hosts with no target items at all.
    pub hosts_skipped: usize,
    /// Hosts whose item listing failed.
    pub hosts_failed: usize,
}
