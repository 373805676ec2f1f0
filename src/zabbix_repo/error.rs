use thiserror::Error;

/// Failure of one JSON-RPC call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{method}: http status {status}")]
    Status { method: String, status: u16 },

    #[error("{method}: zabbix error {code}: {message} - {data}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
        data: String,
    },

    #[error("{method}: unexpected response: {body}")]
    Envelope { method: String, body: String },

    #[error("{method}: failed to decode result: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("login failed after {attempts} attempts: {last}")]
    Login { attempts: usize, last: String },
}

impl ApiError {
    /// Server-side error envelope (used by fakes and tests too).
    pub fn rpc(method: &str, message: &str) -> Self {
        ApiError::Rpc {
            method: method.to_string(),
            code: -32500,
            message: message.to_string(),
            data: String::new(),
        }
    }
}
