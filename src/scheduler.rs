// Cron-driven export loop. Uses local time, like the operators' calendars.

use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Local};
use cron::Schedule;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::export::run_all_clients;

pub fn parse_schedule(expr: &str) -> anyhow::Result<Schedule> {
    Schedule::from_str(expr).map_err(|e| anyhow::anyhow!("invalid cron '{}': {}", expr, e))
}

/// Next fire time strictly after `now`, or None when the schedule has no future runs.
pub fn next_fire(schedule: &Schedule, now: DateTime<Local>) -> Option<DateTime<Local>> {
    schedule.after(&now).next()
}

/// Runs an export pass at every fire time. Never returns; cancel the future to stop.
pub async fn run_scheduled(config: &AppConfig, schedule: Schedule) {
    loop {
        let now = Local::now();
        let Some(next) = next_fire(&schedule, now) else {
            warn!("schedule has no future runs; checking again in an hour");
            tokio::time::sleep(Duration::from_secs(3600)).await;
            continue;
        };
        info!(next_run = %next.to_rfc3339(), "waiting for next export");
        let delay = (next - now).to_std().unwrap_or(Duration::from_secs(1));
        tokio::time::sleep(delay).await;

        let pass = run_all_clients(config).await;
        if pass.all_failed() {
            warn!(failed = pass.failed.len(), "every client failed in this pass");
        }
    }
}
