//! Contact endpoint

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::{Acknowledgement, ContactRequest};

impl ApiClient {
    /// `POST /contact/send`
    pub async fn send_contact(&self, request: &ContactRequest) -> Result<Acknowledgement, ApiError> {
        self.post_json(&["contact", "send"], request).await
    }
}
