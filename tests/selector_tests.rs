// Source selection tests: trends first, history fallback, limits, failures

mod common;

use common::*;
use zbx_report::models::*;
use zbx_report::selector::select_and_aggregate;

#[tokio::test]
async fn trends_present_history_never_requested() {
    let mut api = FakeZabbix::default();
    api.trends.insert(
        "100".into(),
        vec![
            RollupBucket::new("1", "3", "2", 10),
            RollupBucket::new("2", "5", "4", 5),
        ],
    );
    api.history.insert("100".into(), samples(&["99", "99"]));
    let cpu = target("100", "CPU utilization", "system.cpu.util", ValueKind::Float);

    let out = select_and_aggregate(&api, "web-01", &cpu, WINDOW, 10_000).await;

    let summary = out.summary().expect("summary from trends");
    assert_eq!(summary.source, SummarySource::Trends);
    assert_eq!(summary.samples, 2);
    assert_eq!(summary.max, 5.0);
    assert_eq!(api.trend_call_count("100"), 1);
    assert!(api.history_calls_for("100").is_empty());
}

#[tokio::test]
async fn empty_trends_fall_back_to_history() {
    let mut api = FakeZabbix::default();
    api.history.insert("100".into(), samples(&["10", "20", "30"]));
    let cpu = target("100", "CPU utilization", "system.cpu.util", ValueKind::Float);

    let out = select_and_aggregate(&api, "web-01", &cpu, WINDOW, 10_000).await;

    let summary = out.into_summary().expect("summary from history");
    assert_eq!(summary.source, SummarySource::History);
    assert_eq!((summary.min, summary.max, summary.avg), (10.0, 30.0, 20.0));
    assert_eq!(summary.samples, 3);
}

#[tokio::test]
async fn trend_error_falls_back_to_history() {
    let mut api = FakeZabbix::default();
    api.failing_trends.insert("100".into());
    api.history.insert("100".into(), samples(&["5"]));
    let cpu = target("100", "CPU utilization", "system.cpu.util", ValueKind::Float);

    let out = select_and_aggregate(&api, "web-01", &cpu, WINDOW, 10_000).await;

    assert_eq!(out.summary().map(|s| s.source), Some(SummarySource::History));
    assert_eq!(api.history_calls_for("100").len(), 1);
}

#[tokio::test]
async fn no_trends_and_no_history_is_absent() {
    let api = FakeZabbix::default();
    let cpu = target("100", "CPU utilization", "system.cpu.util", ValueKind::Float);

    let out = select_and_aggregate(&api, "web-01", &cpu, WINDOW, 10_000).await;

    assert_eq!(out, ItemOutcome::Absent);
}

#[tokio::test]
async fn history_error_is_failed_not_panic() {
    let mut api = FakeZabbix::default();
    api.failing_history.insert("100".into());
    let cpu = target("100", "CPU utilization", "system.cpu.util", ValueKind::Float);

    let out = select_and_aggregate(&api, "web-01", &cpu, WINDOW, 10_000).await;

    match out {
        ItemOutcome::Failed(reason) => assert!(reason.contains("history.get")),
        other => panic!("expected Failed, got {other:?}"),
    }
}

#[tokio::test]
async fn history_type_follows_value_kind() {
    let api = FakeZabbix::default();
    let float = target("1", "CPU utilization", "system.cpu.util", ValueKind::Float);
    let unsigned = target("2", "Total memory", "vm.memory.size[total]", ValueKind::Unsigned);

    select_and_aggregate(&api, "web-01", &float, WINDOW, 500).await;
    select_and_aggregate(&api, "web-01", &unsigned, WINDOW, 500).await;

    assert_eq!(
        api.history_calls_for("1"),
        vec![HistoryCall {
            item_id: "1".into(),
            history_type: 0,
            limit: 500
        }]
    );
    assert_eq!(api.history_calls_for("2")[0].history_type, 3);
}

#[tokio::test]
async fn oversized_history_is_truncated_to_limit_in_order() {
    let mut api = FakeZabbix::default();
    let values: Vec<String> = (1..=15).map(|v| v.to_string()).collect();
    let refs: Vec<&str> = values.iter().map(String::as_str).collect();
    api.history.insert("100".into(), samples(&refs));
    let cpu = target("100", "CPU utilization", "system.cpu.util", ValueKind::Float);

    let summary = select_and_aggregate(&api, "web-01", &cpu, WINDOW, 10)
        .await
        .into_summary()
        .unwrap();

    // first ten samples (1..=10), each exactly once
    assert_eq!(summary.samples, 10);
    assert_eq!(summary.min, 1.0);
    assert_eq!(summary.max, 10.0);
    assert_eq!(summary.avg, 5.5);
}

#[tokio::test]
async fn history_at_limit_is_kept_whole() {
    let mut api = FakeZabbix::default();
    api.history.insert("100".into(), samples(&["2", "4", "6", "8"]));
    let cpu = target("100", "CPU utilization", "system.cpu.util", ValueKind::Float);

    let summary = select_and_aggregate(&api, "web-01", &cpu, WINDOW, 4)
        .await
        .into_summary()
        .unwrap();

    assert_eq!(summary.samples, 4);
    assert_eq!(summary.avg, 5.0);
}

#[tokio::test]
async fn memory_history_reported_in_gib() {
    let mut api = FakeZabbix::default();
    api.history
        .insert("7".into(), samples(&["2147483648", "4294967296"]));
    let mem = target("7", "Available memory", "vm.memory.size[available]", ValueKind::Unsigned);

    let summary = select_and_aggregate(&api, "db-01", &mem, WINDOW, 100)
        .await
        .into_summary()
        .unwrap();

    assert_eq!((summary.min, summary.max, summary.avg), (2.0, 4.0, 3.0));
}
