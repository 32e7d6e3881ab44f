//! API module for GPXIFY
//!
//! Typed client for the backend REST API under `/api/v1`.

pub mod admin;
pub mod client;
pub mod contact;
pub mod error;
pub mod gpx;
pub mod race;
pub mod share;

// Re-export commonly used API components
pub use admin::AdminClient;
pub use client::{ApiClient, ADMIN_TOKEN_HEADER};
pub use error::{extract_detail, ApiError, CONNECTION_ERROR_MESSAGE};
pub use gpx::{RaceRecoveryUpload, UploadFile};
