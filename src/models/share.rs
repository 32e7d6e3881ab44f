//! Share Model
//!
//! Anonymous share links: the persisted client state saved as an opaque JSON
//! blob on the backend, retrievable by a short id until it expires.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /share/save`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveStateRequest {
    pub state_json: Value,
}

/// Response of `POST /share/save`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveStateResponse {
    pub success: bool,
    pub share_id: String,
    /// Path relative to the front end, e.g. `/share/xK9mP2vL`
    pub url: String,
    pub expires_at: String,
}

/// Response of `GET /share/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedStateResponse {
    pub success: bool,
    pub share_id: String,
    pub state_json: Value,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub view_count: u64,
}

/// Plain acknowledgement returned by delete and contact endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
