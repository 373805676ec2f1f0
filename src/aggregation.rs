// Summaries over trend buckets or raw history samples.
// Values are normalized per record before min/max/avg, in both modes.

use crate::metric_kind::UnitClass;
use crate::models::{MetricSummary, RawSample, RollupBucket, SummarySource};
use crate::units::normalize_with;

/// Combines trend buckets: min of mins, max of maxes, avg weighted by each bucket's `num`.
/// `samples` is the number of buckets, not the number of underlying values.
pub fn summarize_trends(buckets: &[RollupBucket], unit: UnitClass) -> Option<MetricSummary> {
    if buckets.is_empty() {
        return None;
    }

    let min = buckets
        .iter()
        .map(|b| normalize_with(&b.min, unit))
        .fold(f64::INFINITY, f64::min);
    let max = buckets
        .iter()
        .map(|b| normalize_with(&b.max, unit))
        .fold(f64::NEG_INFINITY, f64::max);

    let weighted_sum: f64 = buckets
        .iter()
        .map(|b| normalize_with(&b.avg, unit) * b.num as f64)
        .sum();
    let total_num: u64 = buckets.iter().map(|b| b.num).sum();
    let avg = if total_num > 0 {
        weighted_sum / total_num as f64
    } else {
        0.0
    };

    Some(MetricSummary {
        min,
        max,
        avg,
        samples: buckets.len(),
        source: SummarySource::Trends,
    })
}

/// Plain min/max/mean over raw samples; every sample weighs 1.
pub fn summarize_history(samples: &[RawSample], unit: UnitClass) -> Option<MetricSummary> {
    if samples.is_empty() {
        return None;
    }

    let values: Vec<f64> = samples
        .iter()
        .map(|s| normalize_with(&s.value, unit))
        .collect();

    Some(MetricSummary {
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        avg: mean_f64(&values),
        samples: values.len(),
        source: SummarySource::History,
    })
}

fn mean_f64(v: &[f64]) -> f64 {
    if v.is_empty() {
        return 0.0;
    }
    v.iter().sum::<f64>() / (v.len() as f64)
}
