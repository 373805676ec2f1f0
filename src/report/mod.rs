// Export run: group index, then host -> item -> selector, one CSV per host with data.

mod group_index;

pub use group_index::build_group_index;

use futures_util::StreamExt;
use tracing::{debug, info, warn};

use crate::metric_kind::TargetMetric;
use crate::models::{
    GroupIndex, Host, HostReport, ItemOutcome, MonitoredItem, ReportRow, ReportWindow, RunSummary,
    TargetItem,
};
use crate::monitoring::{HostDirectory, MonitoringApi};
use crate::selector::{DEFAULT_HISTORY_LIMIT, select_and_aggregate};
use crate::sink::ReportSink;
use crate::units::format_value;

#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// Cap on raw samples per item.
    pub history_limit: usize,
    /// Hosts processed at once. 1 keeps the run strictly sequential.
    pub host_concurrency: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            host_concurrency: 1,
        }
    }
}

/// What happened to one host; folded into the RunSummary after all hosts finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostOutcome {
    /// No target items on the host.
    Skipped,
    /// Item listing failed.
    Failed,
    Processed { with_data: bool },
}

/// Keeps the items whose key is a target key, in API order. Blank keys are warned about.
pub fn select_target_items(host: &str, items: Vec<MonitoredItem>) -> Vec<TargetItem> {
    items
        .into_iter()
        .filter_map(|item| {
            if item.key.trim().is_empty() {
                warn!(host, item = %item.name, item_id = %item.item_id, "item has a blank key; skipped");
                return None;
            }
            TargetItem::classify(item)
        })
        .collect()
}

/// One row per item with data, in item order. Items without data add nothing.
pub async fn assemble_host_report<A: MonitoringApi>(
    api: &A,
    host: &str,
    items: &[TargetItem],
    host_groups: &str,
    window: ReportWindow,
    history_limit: usize,
) -> HostReport {
    let mut report = HostReport::new(host);
    for target in items {
        let item = &target.item;
        let summary = match select_and_aggregate(api, host, target, window, history_limit).await {
            ItemOutcome::Summary(summary) => summary,
            ItemOutcome::Absent => continue,
            ItemOutcome::Failed(reason) => {
                debug!(host, item = %item.name, reason = %reason, "item has no usable data");
                continue;
            }
        };
        info!(
            host,
            item = %item.name,
            source = summary.source.as_str(),
            min = summary.min,
            max = summary.max,
            avg = summary.avg,
            "item summarized"
        );
        report.rows.push(ReportRow {
            metric: item.name.clone(),
            min: format_value(summary.min),
            max: format_value(summary.max),
            avg: format_value(summary.avg),
            samples: summary.samples,
            host_groups: host_groups.to_string(),
            unit: target.metric.unit_class().label().to_string(),
        });
    }
    report
}

/// Runs the whole export against one monitoring endpoint.
///
/// Group and host listing failures abort the run; everything below the host level is
/// logged and skipped. The group index is written after all hosts.
pub async fn run_export<C, S>(
    client: &C,
    sink: &S,
    window: ReportWindow,
    options: &ExportOptions,
) -> anyhow::Result<RunSummary>
where
    C: MonitoringApi + HostDirectory,
    S: ReportSink,
{
    let groups = client
        .list_groups()
        .await
        .map_err(|e| anyhow::anyhow!("hostgroup.get: {}", e))?;
    info!(groups = groups.len(), "host groups loaded");

    let hosts = client
        .list_hosts()
        .await
        .map_err(|e| anyhow::anyhow!("host.get: {}", e))?;
    info!(hosts = hosts.len(), "hosts loaded");

    let index = build_group_index(&groups, &hosts, chrono::Local::now().to_rfc3339());

    let outcomes: Vec<HostOutcome> = futures_util::stream::iter(
        hosts
            .iter()
            .map(|host| process_host(client, sink, host, &index, window, options)),
    )
    .buffer_unordered(options.host_concurrency.max(1))
    .collect()
    .await;

    let mut summary = RunSummary {
        hosts_total: hosts.len(),
        ..Default::default()
    };
    for outcome in outcomes {
        match outcome {
            HostOutcome::Skipped => summary.hosts_skipped += 1,
            HostOutcome::Failed => summary.hosts_failed += 1,
            HostOutcome::Processed { with_data } => {
                summary.hosts_processed += 1;
                if with_data {
                    summary.hosts_with_data += 1;
                }
            }
        }
    }

    sink.write_group_index(&index).await?;

    info!(
        hosts_total = summary.hosts_total,
        hosts_processed = summary.hosts_processed,
        hosts_with_data = summary.hosts_with_data,
        hosts_skipped = summary.hosts_skipped,
        hosts_failed = summary.hosts_failed,
        "export run summary"
    );
    Ok(summary)
}

async fn process_host<C, S>(
    client: &C,
    sink: &S,
    host: &Host,
    index: &GroupIndex,
    window: ReportWindow,
    options: &ExportOptions,
) -> HostOutcome
where
    C: MonitoringApi + HostDirectory,
    S: ReportSink,
{
    let keys = TargetMetric::keys();
    let items = match client.list_items(&host.host_id, &keys).await {
        Ok(items) => items,
        Err(e) => {
            warn!(
                host = %host.host,
                error = %e,
                operation = "item.get",
                "item listing failed; host skipped"
            );
            return HostOutcome::Failed;
        }
    };

    let items = select_target_items(&host.host, items);
    if items.is_empty() {
        debug!(host = %host.host, "no target items");
        return HostOutcome::Skipped;
    }

    let report = assemble_host_report(
        client,
        &host.host,
        &items,
        &index.groups_label(&host.host),
        window,
        options.history_limit,
    )
    .await;

    if report.is_empty() {
        info!(host = %host.host, items = items.len(), "no data in window; no report written");
        return HostOutcome::Processed { with_data: false };
    }

    match sink.write_host_report(&report).await {
        Ok(()) => HostOutcome::Processed { with_data: true },
        Err(e) => {
            warn!(
                host = %host.host,
                error = %e,
                operation = "write_host_report",
                "failed to write host report"
            );
            HostOutcome::Processed { with_data: false }
        }
    }
}
