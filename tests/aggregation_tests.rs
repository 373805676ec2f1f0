// Aggregation tests: trend buckets (weighted avg, bucket count) and raw history

use zbx_report::aggregation::{summarize_history, summarize_trends};
use zbx_report::metric_kind::UnitClass;
use zbx_report::models::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn summarize_trends_empty_returns_none() {
    assert!(summarize_trends(&[], UnitClass::Percent).is_none());
}

#[test]
fn summarize_trends_weights_avg_by_num() {
    let buckets = vec![
        RollupBucket::new("1", "3", "2", 10),
        RollupBucket::new("2", "5", "4", 5),
    ];
    let out = summarize_trends(&buckets, UnitClass::Percent).unwrap();
    assert_eq!(out.min, 1.0);
    assert_eq!(out.max, 5.0);
    assert!(approx(out.avg, 40.0 / 15.0));
    assert_eq!(format!("{:.2}", out.avg), "2.67");
    assert_eq!(out.samples, 2, "bucket count, not raw value count");
    assert_eq!(out.source, SummarySource::Trends);
}

#[test]
fn summarize_trends_zero_total_num_gives_zero_avg() {
    let buckets = vec![
        RollupBucket::new("10", "20", "15", 0),
        RollupBucket::new("5", "25", "12", 0),
    ];
    let out = summarize_trends(&buckets, UnitClass::Percent).unwrap();
    assert_eq!(out.avg, 0.0);
    assert_eq!(out.min, 5.0);
    assert_eq!(out.max, 25.0);
}

#[test]
fn summarize_trends_normalizes_bytes_per_bucket() {
    let gib = 1_073_741_824u64;
    let buckets = vec![
        RollupBucket::new(&(2 * gib).to_string(), &(4 * gib).to_string(), &(3 * gib).to_string(), 60),
        RollupBucket::new(&gib.to_string(), &(8 * gib).to_string(), &(5 * gib).to_string(), 20),
    ];
    let out = summarize_trends(&buckets, UnitClass::Bytes).unwrap();
    assert_eq!(out.min, 1.0);
    assert_eq!(out.max, 8.0);
    assert!(approx(out.avg, (3.0 * 60.0 + 5.0 * 20.0) / 80.0));
}

#[test]
fn summarize_trends_bad_values_count_as_zero() {
    let buckets = vec![
        RollupBucket::new("garbage", "7", "4", 1),
        RollupBucket::new("2", "oops", "x", 1),
    ];
    let out = summarize_trends(&buckets, UnitClass::Plain).unwrap();
    assert_eq!(out.min, 0.0);
    assert_eq!(out.max, 7.0);
    assert_eq!(out.avg, 2.0);
}

#[test]
fn summarize_history_empty_returns_none() {
    assert!(summarize_history(&[], UnitClass::Plain).is_none());
}

#[test]
fn summarize_history_min_max_mean() {
    let samples = vec![
        RawSample::new(1, "10"),
        RawSample::new(2, "20"),
        RawSample::new(3, "30"),
    ];
    let out = summarize_history(&samples, UnitClass::Percent).unwrap();
    assert_eq!(out.min, 10.0);
    assert_eq!(out.max, 30.0);
    assert_eq!(out.avg, 20.0);
    assert_eq!(out.samples, 3);
    assert_eq!(out.source, SummarySource::History);
}

#[test]
fn summarize_history_single_sample() {
    let out = summarize_history(&[RawSample::new(1, "4")], UnitClass::Plain).unwrap();
    assert_eq!((out.min, out.max, out.avg, out.samples), (4.0, 4.0, 4.0, 1));
}

#[test]
fn summarize_history_converts_bytes() {
    let samples = vec![
        RawSample::new(1, "1073741824"),
        RawSample::new(2, "3221225472"),
    ];
    let out = summarize_history(&samples, UnitClass::Bytes).unwrap();
    assert_eq!(out.min, 1.0);
    assert_eq!(out.max, 3.0);
    assert_eq!(out.avg, 2.0);
}
