//! Contact Service

use crate::api::ApiClient;
use crate::error::AppResult;
use crate::models::Acknowledgement;
use crate::validation::forms::validate_contact_form;

/// Validate the contact form, then send it
pub async fn send(api: &ApiClient, name: &str, email: &str, message: &str) -> AppResult<Acknowledgement> {
    let request = validate_contact_form(name, email, message)?;
    let response = api.send_contact(&request).await?;
    tracing::info!(chars = request.message.chars().count(), "Contact message sent");
    Ok(response)
}
