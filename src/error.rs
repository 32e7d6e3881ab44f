//! Error handling for GPXIFY
//!
//! Centralized error types and the user-facing message for each of them.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::profile::ProfileError;
use crate::store::StoreError;
use crate::validation::FormErrors;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("{0}")]
    Form(#[from] FormErrors),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("{0}")]
    Precondition(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Expired: {0}")]
    Expired(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get error code for logs and JSON output
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidFile(_) => "InvalidFile",
            AppError::Form(_) => "ValidationError",
            AppError::Api(e) => e.error_code(),
            AppError::UploadFailed(_) => "UploadFailed",
            AppError::Store(_) => "StoreError",
            AppError::Config(_) => "ConfigurationError",
            AppError::Profile(_) => "ProfileError",
            AppError::Precondition(_) => "Precondition",
            AppError::NotFound(_) => "NotFound",
            AppError::Expired(_) => "Expired",
            AppError::Serialization(_) => "SerializationError",
            AppError::Io(_) => "IoError",
            AppError::Internal(_) => "InternalError",
        }
    }

    /// Message printed to the user
    pub fn user_message(&self) -> String {
        match self {
            AppError::InvalidFile(message)
            | AppError::UploadFailed(message)
            | AppError::Precondition(message)
            | AppError::NotFound(message)
            | AppError::Expired(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Check if this error should be logged as an error vs warning
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AppError::Api(ApiError::Server { .. } | ApiError::Decode(_))
                | AppError::Store(_)
                | AppError::Serialization(_)
                | AppError::Io(_)
                | AppError::Internal(_)
        )
    }

    /// Process exit code for the binary
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::InvalidFile(_) | AppError::Form(_) | AppError::Precondition(_) => 2,
            AppError::Config(_) => 78,
            _ => 1,
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn invalid_file(message: &str) -> Self {
        AppError::InvalidFile(message.to_string())
    }

    pub fn precondition(message: &str) -> Self {
        AppError::Precondition(message.to_string())
    }

    pub fn not_found(resource: &str) -> Self {
        AppError::NotFound(format!("{resource} not found"))
    }

    pub fn internal_error(message: &str) -> Self {
        AppError::Internal(message.to_string())
    }
}
