//! Upload Service
//!
//! Validate a GPX file locally, send it to the backend for parsing and keep
//! the parsed result in the client state. A file that fails validation never
//! reaches the backend.

use tracing::Instrument;

use crate::api::{ApiClient, ApiError, UploadFile, CONNECTION_ERROR_MESSAGE};
use crate::error::{AppError, AppResult};
use crate::store::{GpxFileData, StateStore};
use crate::validation::{format_validation_error, validate_gpx_file, FileSource, LocalFile};

/// Result of a successful upload
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub file: GpxFileData,
    /// Validator warnings, e.g. an unexpected MIME type
    pub warnings: Vec<String>,
    /// Backend message
    pub message: String,
}

/// Message shown for a failed upload
pub fn upload_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Network(_) => CONNECTION_ERROR_MESSAGE.to_string(),
        ApiError::Client { status: 413, .. } => "File too large. Maximum size: 25 MB.".to_string(),
        ApiError::Client { status: 415, .. } => {
            "Unsupported file type. Only .gpx files are accepted.".to_string()
        }
        ApiError::Client {
            status: 400,
            detail,
        } => detail
            .clone()
            .unwrap_or_else(|| "Invalid GPX file.".to_string()),
        ApiError::Server { .. } => "Server error while processing the file. Please try again.".to_string(),
        other => other.to_string(),
    }
}

/// Validate, upload and store one file; the stored file becomes the selection
pub async fn upload_file(api: &ApiClient, store: &StateStore, file: &LocalFile) -> AppResult<UploadOutcome> {
    let span = crate::flow_span!("upload", file.name());

    async {
        let validation = validate_gpx_file(file);
        if !validation.valid {
            return Err(AppError::InvalidFile(format_validation_error(&validation)));
        }
        let warnings = validation.warnings().to_vec();

        let upload = UploadFile::from_local(file)?;
        let response = api
            .upload_gpx(upload)
            .await
            .map_err(|e| AppError::UploadFailed(upload_error_message(&e)))?;

        let data = match response.data {
            Some(data) if response.success => data,
            _ => {
                let message = if response.message.is_empty() {
                    "The server could not read this file.".to_string()
                } else {
                    response.message
                };
                return Err(AppError::UploadFailed(message));
            }
        };

        let stored = GpxFileData::new(response.file_id, file.name(), data);
        store.update(|state| {
            state.add_file(stored.clone());
            Ok(())
        })?;

        tracing::info!(file_id = %stored.id, tracks = stored.data.tracks.len(), "GPX file uploaded");

        Ok(UploadOutcome {
            file: stored,
            warnings,
            message: response.message,
        })
    }
    .instrument(span)
    .await
}
