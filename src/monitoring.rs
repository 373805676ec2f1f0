// Collaborator seams of the export pipeline. ZabbixRepo implements both traits;
// tests plug in in-memory fakes. Futures are polled on one task (buffer_unordered),
// so the traits carry no Send bound.

use crate::models::{Host, HostGroup, MonitoredItem, RawSample, ReportWindow, RollupBucket};
use crate::zabbix_repo::ApiError;

/// Trend and history queries for a single item.
#[allow(async_fn_in_trait)]
pub trait MonitoringApi {
    /// Trend buckets in the window, possibly empty.
    async fn get_trends(
        &self,
        item_id: &str,
        window: ReportWindow,
    ) -> Result<Vec<RollupBucket>, ApiError>;

    /// Raw samples in ascending time order, at most `limit` of them.
    /// `history_type` is the value table to read (0 float, 3 unsigned).
    async fn get_history(
        &self,
        item_id: &str,
        window: ReportWindow,
        history_type: u8,
        limit: usize,
    ) -> Result<Vec<RawSample>, ApiError>;
}

/// Host, group and item listing.
#[allow(async_fn_in_trait)]
pub trait HostDirectory {
    async fn list_groups(&self) -> Result<Vec<HostGroup>, ApiError>;

    /// All hosts with their group memberships.
    async fn list_hosts(&self) -> Result<Vec<Host>, ApiError>;

    /// Items of `host_id` whose key is one of `keys`.
    async fn list_items(
        &self,
        host_id: &str,
        keys: &[&str],
    ) -> Result<Vec<MonitoredItem>, ApiError>;
}
