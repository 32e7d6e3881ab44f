//! Contact message sent to the site owner

use serde::{Deserialize, Serialize};

/// Body of `POST /contact/send`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}
