// One export pass over every configured client. A failing client is logged and the
// next one still runs.

use std::time::Instant;

use tracing::{error, info, instrument, warn};

use crate::config::{AppConfig, ClientConfig, ReportConfig};
use crate::models::{ReportWindow, RunSummary};
use crate::report::{ExportOptions, run_export};
use crate::sink::FsReportSink;
use crate::zabbix_repo::ZabbixRepo;

/// Outcome of one pass over all clients.
#[derive(Debug, Default)]
pub struct ExportPass {
    pub succeeded: Vec<(String, RunSummary)>,
    pub failed: Vec<(String, String)>,
}

impl ExportPass {
    pub fn all_failed(&self) -> bool {
        self.succeeded.is_empty() && !self.failed.is_empty()
    }
}

impl From<&ReportConfig> for ExportOptions {
    fn from(report: &ReportConfig) -> Self {
        Self {
            history_limit: report.history_limit,
            host_concurrency: report.host_concurrency,
        }
    }
}

pub async fn run_all_clients(config: &AppConfig) -> ExportPass {
    let started = Instant::now();
    info!(clients = config.clients.len(), "starting metrics export");

    let mut pass = ExportPass::default();
    for client in &config.clients {
        match export_client(config, client).await {
            Ok(summary) => pass.succeeded.push((client.name.clone(), summary)),
            Err(e) => {
                error!(client = %client.name, error = %e, "client export failed");
                pass.failed.push((client.name.clone(), e.to_string()));
            }
        }
    }

    info!(
        succeeded = pass.succeeded.len(),
        failed = pass.failed.len(),
        elapsed = ?started.elapsed(),
        "metrics export completed"
    );
    pass
}

#[instrument(skip(config, client), fields(client = %client.name))]
pub async fn export_client(config: &AppConfig, client: &ClientConfig) -> anyhow::Result<RunSummary> {
    let sink = FsReportSink::open(&config.report.output_dir, &client.container()).await?;

    let repo = ZabbixRepo::connect(&client.url, &client.user, &client.password, &config.zabbix)
        .await
        .map_err(|e| anyhow::anyhow!("zabbix login: {}", e))?;
    match repo.api_version().await {
        Ok(version) => info!(version = %version, "zabbix api version"),
        Err(e) => warn!(error = %e, "apiinfo.version failed"),
    }

    let window = ReportWindow::trailing_days(chrono::Utc::now(), config.report.window_days);
    info!(
        window_start = window.start,
        window_end = window.end,
        days = config.report.window_days,
        "report window"
    );

    run_export(&repo, &sink, window, &ExportOptions::from(&config.report)).await
}
