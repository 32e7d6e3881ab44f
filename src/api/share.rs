//! Share endpoints

use reqwest::Method;
use serde_json::Value;

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::{Acknowledgement, SaveStateRequest, SaveStateResponse, SharedStateResponse};

impl ApiClient {
    /// `POST /share/save`
    pub async fn save_state(&self, state_json: Value) -> Result<SaveStateResponse, ApiError> {
        self.post_json(&["share", "save"], &SaveStateRequest { state_json })
            .await
    }

    /// `GET /share/{id}`
    ///
    /// 404 means the link never existed, 410 that it expired.
    pub async fn get_shared_state(&self, share_id: &str) -> Result<SharedStateResponse, ApiError> {
        self.get_json(&["share", share_id]).await
    }

    /// `DELETE /share/{id}`
    pub async fn delete_shared_state(&self, share_id: &str) -> Result<Acknowledgement, ApiError> {
        self.send_json(self.request(Method::DELETE, &["share", share_id])?)
            .await
    }
}
