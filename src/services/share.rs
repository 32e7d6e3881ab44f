//! Share Service
//!
//! Publishes a snapshot of the persisted state as an anonymous share link and
//! restores a shared snapshot into the local state.

use crate::api::{ApiClient, ApiError};
use crate::error::{AppError, AppResult};
use crate::models::{SaveStateResponse, SharedStateResponse};
use crate::store::{restore, snapshot, AppState, StateStore};

/// Absolute link for a share, given the front end's origin
pub fn share_link(frontend_url: &str, response: &SaveStateResponse) -> String {
    format!("{}{}", frontend_url.trim_end_matches('/'), response.url)
}

/// Save the current state on the backend
pub async fn save(api: &ApiClient, store: &StateStore) -> AppResult<SaveStateResponse> {
    let state = store.load()?;
    if state.files.is_empty() {
        return Err(AppError::precondition("Nothing to share: no file is loaded."));
    }

    let response = api.save_state(snapshot(&state)?).await?;
    tracing::info!(share_id = %response.share_id, expires_at = %response.expires_at, "State shared");
    Ok(response)
}

fn share_error(share_id: &str, error: ApiError) -> AppError {
    match error.status() {
        Some(404) => AppError::NotFound(format!("Share '{share_id}' does not exist or was deleted.")),
        Some(410) => AppError::Expired(format!("Share '{share_id}' has expired.")),
        _ => error.into(),
    }
}

/// Fetch a shared state without touching the local one
pub async fn fetch(api: &ApiClient, share_id: &str) -> AppResult<(SharedStateResponse, AppState)> {
    let response = api
        .get_shared_state(share_id)
        .await
        .map_err(|e| share_error(share_id, e))?;
    let state = restore(response.state_json.clone())?;
    Ok((response, state))
}

/// Replace the local state with a shared one
pub async fn load(api: &ApiClient, store: &StateStore, share_id: &str) -> AppResult<AppState> {
    let (response, state) = fetch(api, share_id).await?;
    store.save(&state)?;
    tracing::info!(share_id = %share_id, views = response.view_count, "Shared state loaded");
    Ok(state)
}

/// Delete a share
pub async fn delete(api: &ApiClient, share_id: &str) -> AppResult<()> {
    api.delete_shared_state(share_id)
        .await
        .map_err(|e| share_error(share_id, e))?;
    Ok(())
}
