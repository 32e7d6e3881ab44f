//! API error classification
//!
//! Maps transport failures and HTTP statuses from the backend onto the flat,
//! user-facing taxonomy shown by every command.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Message shown for any transport failure or timeout
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Connection error. Check your network and that the GPXIFY server is reachable.";

/// Backend call failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response: refused connection, DNS failure, timeout
    #[error("{}", CONNECTION_ERROR_MESSAGE)]
    Network(String),

    /// 4xx, with the backend's `detail` when it sent one
    #[error("{}", client_message(.status, .detail))]
    Client { status: u16, detail: Option<String> },

    /// 5xx
    #[error("Server error ({status}). Please try again later.")]
    Server { status: u16 },

    /// 2xx whose body did not match the expected shape
    #[error("Unexpected response from the server: {0}")]
    Decode(String),

    /// 2xx whose body reports `success: false`
    #[error("{0}")]
    Rejected(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Admin endpoint called without a session token
    #[error("Not logged in. Run `gpxify admin login` first.")]
    MissingToken,
}

impl ApiError {
    /// Classify a non-success status and its body
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        if status.is_server_error() {
            return ApiError::Server {
                status: status.as_u16(),
            };
        }

        ApiError::Client {
            status: status.as_u16(),
            detail: extract_detail(body),
        }
    }

    /// Transport failure
    pub fn network(error: &reqwest::Error) -> Self {
        ApiError::Network(error.to_string())
    }

    /// HTTP status, when a response was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Client { status, .. } | ApiError::Server { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Backend detail for 4xx responses
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Client { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Error code for logs and JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "NetworkError",
            ApiError::Client { .. } => "ClientError",
            ApiError::Server { .. } => "ServerError",
            ApiError::Decode(_) => "DecodeError",
            ApiError::Rejected(_) => "Rejected",
            ApiError::InvalidRequest(_) => "InvalidRequest",
            ApiError::MissingToken => "MissingToken",
        }
    }
}

fn client_message(status: &u16, detail: &Option<String>) -> String {
    detail
        .clone()
        .unwrap_or_else(|| format!("Request failed with status {status}"))
}

/// Extract a readable message from a FastAPI-style error body
///
/// `detail` may be a string, an object carrying `msg`, or a list of such
/// objects (request validation errors). Anything else is rendered as JSON.
pub fn extract_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let detail = value.get("detail")?;

    let message = match detail {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("msg") {
            Some(Value::String(msg)) => msg.clone(),
            _ => detail.to_string(),
        },
        Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(Value::as_str))
            .map_or_else(|| detail.to_string(), str::to_owned),
        Value::Null => return None,
        other => other.to_string(),
    };

    Some(message)
}
