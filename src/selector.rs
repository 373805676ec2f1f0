// Per-item source selection: trends first, raw history when no trends come back.

use tracing::{debug, warn};

use crate::aggregation::{summarize_history, summarize_trends};
use crate::models::{ItemOutcome, ReportWindow, TargetItem};
use crate::monitoring::MonitoringApi;

/// Default cap on history.get, matching the server-side page most installs allow.
pub const DEFAULT_HISTORY_LIMIT: usize = 10_000;

/// Summarize one item over `window`.
///
/// A trend.get failure is logged and handled like an empty trend result. History is
/// only queried when no trend buckets were returned. A history.get failure yields
/// `Failed` for this item only.
pub async fn select_and_aggregate<A: MonitoringApi>(
    api: &A,
    host: &str,
    target: &TargetItem,
    window: ReportWindow,
    history_limit: usize,
) -> ItemOutcome {
    let item = &target.item;
    let unit = target.metric.unit_class();

    match api.get_trends(&item.item_id, window).await {
        Ok(buckets) if !buckets.is_empty() => {
            if let Some(summary) = summarize_trends(&buckets, unit) {
                return ItemOutcome::Summary(summary);
            }
        }
        Ok(_) => {
            debug!(host, item = %item.name, "no trend data; falling back to history");
        }
        Err(e) => {
            warn!(
                host,
                item = %item.name,
                error = %e,
                operation = "trend.get",
                "trend query failed; falling back to history"
            );
        }
    }

    let mut samples = match api
        .get_history(
            &item.item_id,
            window,
            item.value_kind.history_type(),
            history_limit,
        )
        .await
    {
        Ok(samples) => samples,
        Err(e) => {
            warn!(
                host,
                item = %item.name,
                error = %e,
                operation = "history.get",
                "history query failed; item skipped"
            );
            return ItemOutcome::Failed(e.to_string());
        }
    };

    if samples.len() > history_limit {
        warn!(
            host,
            item = %item.name,
            returned = samples.len(),
            limit = history_limit,
            "history.get ignored the limit; keeping the oldest samples"
        );
        samples.truncate(history_limit);
    } else if samples.len() == history_limit {
        debug!(host, item = %item.name, limit = history_limit, "history truncated at limit");
    }

    match summarize_history(&samples, unit) {
        Some(summary) => ItemOutcome::Summary(summary),
        None => {
            debug!(host, item = %item.name, "no history data in window");
            ItemOutcome::Absent
        }
    }
}
