// JSON-RPC 2.0 envelope: request body and response unwrapping.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ApiError;

/// Longest response excerpt kept in an `Envelope` error.
const BODY_EXCERPT_LEN: usize = 512;

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub method: &'a str,
    pub params: Value,
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<&'a str>,
}

impl<'a> RpcRequest<'a> {
    pub fn new(method: &'a str, params: Value, id: u64, auth: Option<&'a str>) -> Self {
        Self {
            jsonrpc: "2.0",
            method,
            params,
            id,
            auth,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

/// Unwrap `result` from a response body; `error` members and bodies without `result` fail.
pub fn parse_response<T: DeserializeOwned>(method: &str, body: Value) -> Result<T, ApiError> {
    let envelope_error = |body: &Value| ApiError::Envelope {
        method: method.to_string(),
        body: excerpt(&body.to_string()),
    };

    let response: RpcResponse =
        serde_json::from_value(body.clone()).map_err(|_| envelope_error(&body))?;

    if let Some(err) = response.error {
        return Err(ApiError::Rpc {
            method: method.to_string(),
            code: err.code,
            message: err.message.unwrap_or_else(|| "Unknown error".to_string()),
            data: match err.data {
                Some(Value::String(s)) => s,
                Some(other) => other.to_string(),
                None => String::new(),
            },
        });
    }

    let Some(result) = response.result else {
        return Err(envelope_error(&body));
    };

    serde_json::from_value(result).map_err(|source| ApiError::Decode {
        method: method.to_string(),
        source,
    })
}

pub(crate) fn excerpt(s: &str) -> String {
    match s.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
