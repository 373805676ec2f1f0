// Per-item aggregation result

use serde::Serialize;

/// Which record type a summary was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SummarySource {
    Trends,
    History,
}

impl SummarySource {
    pub fn as_str(self) -> &'static str {
        match self {
            SummarySource::Trends => "trends",
            SummarySource::History => "history",
        }
    }
}

/// min/max/avg of one item over the report window, already in display units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricSummary {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    /// Trend bucket count in trend mode, raw sample count in history mode.
    pub samples: usize,
    pub source: SummarySource,
}

/// Result of looking up one item. `Failed` is treated like `Absent` by the report,
/// but keeps the reason for logging.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    Summary(MetricSummary),
    Absent,
    Failed(String),
}

impl ItemOutcome {
    pub fn summary(&self) -> Option<&MetricSummary> {
        match self {
            ItemOutcome::Summary(s) => Some(s),
            ItemOutcome::Absent | ItemOutcome::Failed(_) => None,
        }
    }

    pub fn into_summary(self) -> Option<MetricSummary> {
        match self {
            ItemOutcome::Summary(s) => Some(s),
            ItemOutcome::Absent | ItemOutcome::Failed(_) => None,
        }
    }
}
