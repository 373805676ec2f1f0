use std::str::FromStr;

use serde::Deserialize;

use crate::selector::DEFAULT_HISTORY_LIMIT;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub zabbix: ZabbixConfig,
    pub report: ReportConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub clients: Vec<ClientConfig>,
}

/// HTTP settings shared by every client endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ZabbixConfig {
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_verify_tls")]
    pub verify_tls: bool,
}

impl Default for ZabbixConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
            verify_tls: default_verify_tls(),
        }
    }
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_verify_tls() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Root directory; each client writes into `<output_dir>/metrics-<client>`.
    pub output_dir: String,
    #[serde(default = "default_window_days")]
    pub window_days: u32,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_host_concurrency")]
    pub host_concurrency: usize,
}

/// Longest accepted report window (ten years).
pub const MAX_WINDOW_DAYS: u32 = 3650;

fn default_window_days() -> u32 {
    30
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_host_concurrency() -> usize {
    1
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleConfig {
    /// Cron expression with seconds (e.g. "0 0 0 1 * *" = 00:00 on day 1). Uses local time.
    /// When unset the binary runs once and exits.
    pub cron: Option<String>,
}

/// One monitored tenant: its own Zabbix endpoint and report container.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

impl ClientConfig {
    /// Report container directory name.
    pub fn container(&self) -> String {
        format!("metrics-{}", self.name)
    }

    /// Suffix of the per-client env overrides, e.g. `acme-eu` -> `ACME_EU`.
    pub fn env_suffix(&self) -> String {
        self.name.to_uppercase().replace('-', "_")
    }

    fn apply_env(&mut self, env: &impl Fn(&str) -> Option<String>) {
        let suffix = self.env_suffix();
        if let Some(v) = env(&format!("ZABBIX_URL_{}", suffix)) {
            self.url = v;
        }
        if let Some(v) = env(&format!("ZABBIX_USER_{}", suffix)) {
            self.user = v;
        }
        if let Some(v) = env(&format!("ZABBIX_PASSWORD_{}", suffix)) {
            self.password = v;
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse, apply `ZABBIX_*_<CLIENT>` overrides from the process env, and validate.
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        Self::load_from_str_with_env(s, |key| std::env::var(key).ok())
    }

    /// Same as `load_from_str` with an explicit env lookup (e.g. for tests).
    pub fn load_from_str_with_env(
        s: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut config: AppConfig = toml::from_str(s)?;
        for client in &mut config.clients {
            client.apply_env(&env);
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.zabbix.request_timeout_secs > 0,
            "zabbix.request_timeout_secs must be > 0, got {}",
            self.zabbix.request_timeout_secs
        );
        anyhow::ensure!(
            !self.report.output_dir.is_empty(),
            "report.output_dir must be non-empty"
        );
        anyhow::ensure!(
            self.report.window_days > 0 && self.report.window_days <= MAX_WINDOW_DAYS,
            "report.window_days must be between 1 and {}, got {}",
            MAX_WINDOW_DAYS,
            self.report.window_days
        );
        anyhow::ensure!(
            self.report.history_limit > 0,
            "report.history_limit must be > 0, got {}",
            self.report.history_limit
        );
        anyhow::ensure!(
            self.report.host_concurrency > 0,
            "report.host_concurrency must be > 0, got {}",
            self.report.host_concurrency
        );
        if let Some(ref expr) = self.schedule.cron {
            cron::Schedule::from_str(expr)
                .map_err(|e| anyhow::anyhow!("schedule.cron is invalid ({}): {}", expr, e))?;
        }
        anyhow::ensure!(
            !self.clients.is_empty(),
            "at least one [[clients]] entry is required"
        );
        for (i, client) in self.clients.iter().enumerate() {
            let label = format!("clients[{}] ('{}')", i, client.name);
            anyhow::ensure!(
                !client.name.trim().is_empty(),
                "{}: name must be non-empty",
                label
            );
            anyhow::ensure!(
                self.clients[..i].iter().all(|c| c.name != client.name),
                "{}: name is duplicated",
                label
            );
            let suffix = client.env_suffix();
            anyhow::ensure!(
                client.url.starts_with("http://") || client.url.starts_with("https://"),
                "{}: url must be an http(s) URL (set it or ZABBIX_URL_{}), got '{}'",
                label,
                suffix,
                client.url
            );
            anyhow::ensure!(
                !client.user.is_empty(),
                "{}: user must be non-empty (set it or ZABBIX_USER_{})",
                label,
                suffix
            );
            anyhow::ensure!(
                !client.password.is_empty(),
                "{}: password must be non-empty (set it or ZABBIX_PASSWORD_{})",
                label,
                suffix
            );
        }
        Ok(())
    }
}
