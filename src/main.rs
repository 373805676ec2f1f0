use anyhow::Result;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;
use zbx_report::*;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(
        name = version::NAME,
        version = version::VERSION,
        clients = app_config.clients.len(),
        "configuration loaded"
    );

    let Some(ref cron_expr) = app_config.schedule.cron else {
        let pass = export::run_all_clients(&app_config).await;
        anyhow::ensure!(
            !pass.all_failed(),
            "all {} clients failed",
            pass.failed.len()
        );
        return Ok(());
    };

    let schedule = scheduler::parse_schedule(cron_expr)?;
    tokio::select! {
        _ = scheduler::run_scheduled(&app_config, schedule) => {}
        _ = async {
            #[cfg(unix)]
            {
                let mut sigterm = match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(s) => s,
                    Err(_) => {
                        let _ = tokio::signal::ctrl_c().await;
                        return;
                    }
                };
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = sigterm.recv() => {}
                }
            }
            #[cfg(not(unix))]
            {
                let _ = tokio::signal::ctrl_c().await;
            }
        } => {
            tracing::info!("Received shutdown signal");
        }
    }

    Ok(())
}
