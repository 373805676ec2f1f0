// Zabbix JSON-RPC API via reqwest. One repo per client endpoint; connect() logs in.

mod auth;
mod error;
pub mod rpc;

pub use auth::{LOGIN_STRATEGIES, LoginStrategy};
pub use error::ApiError;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};

use crate::config::ZabbixConfig;
use crate::models::{Host, HostGroup, MonitoredItem, RawSample, ReportWindow, RollupBucket};
use crate::monitoring::{HostDirectory, MonitoringApi};
use crate::version::{NAME, VERSION};

pub struct ZabbixRepo {
    http: reqwest::Client,
    url: String,
    auth: Option<String>,
    next_id: AtomicU64,
}

impl ZabbixRepo {
    /// Build the HTTP client without logging in.
    pub fn new(url: &str, config: &ZabbixConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("{}/{}", NAME, VERSION))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .danger_accept_invalid_certs(!config.verify_tls)
            .build()?;
        Ok(Self {
            http,
            url: url.to_string(),
            auth: None,
            next_id: AtomicU64::new(1),
        })
    }

    /// Build the client and log in with the first accepted parameter dialect.
    pub async fn connect(
        url: &str,
        user: &str,
        password: &str,
        config: &ZabbixConfig,
    ) -> Result<Self, ApiError> {
        let mut repo = Self::new(url, config)?;
        repo.login(user, password).await?;
        Ok(repo)
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    pub async fn login(&mut self, user: &str, password: &str) -> Result<(), ApiError> {
        let mut last: Option<ApiError> = None;
        for strategy in LOGIN_STRATEGIES {
            match self
                .request::<String>("user.login", strategy.params(user, password), None)
                .await
            {
                Ok(token) => {
                    info!(strategy = strategy.name, "authenticated to zabbix");
                    self.auth = Some(token);
                    return Ok(());
                }
                Err(e) => {
                    debug!(strategy = strategy.name, error = %e, "login attempt rejected");
                    last = Some(e);
                }
            }
        }
        Err(ApiError::Login {
            attempts: LOGIN_STRATEGIES.len(),
            last: last
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no login strategies".to_string()),
        })
    }

    /// apiinfo.version; must be sent without a token.
    pub async fn api_version(&self) -> Result<String, ApiError> {
        self.request("apiinfo.version", json!({}), None).await
    }

    /// Authenticated call.
    pub async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ApiError> {
        self.request(method, params, self.auth.as_deref()).await
    }

    #[instrument(skip(self, params, auth), fields(repo = "zabbix"))]
    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
        auth: Option<&str>,
    ) -> Result<T, ApiError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = rpc::RpcRequest::new(method, params, id, auth);
        let response = self.http.post(&self.url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                method: method.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        let value: Value = serde_json::from_str(&text).map_err(|_| ApiError::Envelope {
            method: method.to_string(),
            body: rpc::excerpt(&text),
        })?;
        rpc::parse_response(method, value)
    }
}

impl MonitoringApi for ZabbixRepo {
    async fn get_trends(
        &self,
        item_id: &str,
        window: ReportWindow,
    ) -> Result<Vec<RollupBucket>, ApiError> {
        self.call(
            "trend.get",
            json!({
                "itemids": item_id,
                "time_from": window.start,
                "time_till": window.end,
                "output": ["itemid", "clock", "num", "value_min", "value_avg", "value_max"],
            }),
        )
        .await
    }

    async fn get_history(
        &self,
        item_id: &str,
        window: ReportWindow,
        history_type: u8,
        limit: usize,
    ) -> Result<Vec<RawSample>, ApiError> {
        self.call(
            "history.get",
            json!({
                "itemids": item_id,
                "time_from": window.start,
                "time_till": window.end,
                "output": "extend",
                "history": history_type,
                "sortfield": "clock",
                "sortorder": "ASC",
                "limit": limit,
            }),
        )
        .await
    }
}

impl HostDirectory for ZabbixRepo {
    async fn list_groups(&self) -> Result<Vec<HostGroup>, ApiError> {
        self.call("hostgroup.get", json!({ "output": ["groupid", "name"] }))
            .await
    }

    async fn list_hosts(&self) -> Result<Vec<Host>, ApiError> {
        self.call(
            "host.get",
            json!({
                "output": ["hostid", "host", "name"],
                "selectGroups": ["groupid", "name"],
            }),
        )
        .await
    }

    async fn list_items(
        &self,
        host_id: &str,
        keys: &[&str],
    ) -> Result<Vec<MonitoredItem>, ApiError> {
        self.call(
            "item.get",
            json!({
                "hostids": host_id,
                "output": ["itemid", "hostid", "name", "key_", "value_type", "units"],
                "filter": { "key_": keys },
            }),
        )
        .await
    }
}
