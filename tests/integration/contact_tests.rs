//! Contact form tests

use gpxify::error::AppError;
use gpxify::services::contact;

use crate::mock_backend::MockBackend;

#[tokio::test]
async fn test_contact_sends_trimmed_message() {
    let backend = MockBackend::spawn().await;

    let response = contact::send(
        &backend.client(),
        " Ana ",
        "ana@example.com",
        "  The roadbook export is great.  ",
    )
    .await
    .unwrap();

    assert!(response.success);
    assert_eq!(response.message.as_deref(), Some("Message received"));

    let recorded = backend.recorded();
    assert_eq!(recorded.contact_messages.len(), 1);
    assert_eq!(recorded.contact_messages[0]["name"], "Ana");
    assert_eq!(recorded.contact_messages[0]["message"], "The roadbook export is great.");
}

#[tokio::test]
async fn test_invalid_contact_form_is_not_sent() {
    let backend = MockBackend::spawn().await;

    let error = contact::send(&backend.client(), "Ana", "ana@", "Too short")
        .await
        .unwrap_err();

    assert!(matches!(error, AppError::Form(_)));
    assert_eq!(error.exit_code(), 2);
    assert!(backend.recorded().contact_messages.is_empty());
}
