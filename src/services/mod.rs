//! Services module for GPXIFY
//!
//! User flows built on the API client, the validators and the state store.

pub mod admin;
pub mod aid_station;
pub mod analysis;
pub mod contact;
pub mod merge;
pub mod recovery;
pub mod roadbook;
pub mod share;
pub mod upload;

// Re-export commonly used services
pub use merge::{MergeOutcome, MergeQueue};
pub use roadbook::{ExportMode, PassageTime, RunnerConfig};
pub use upload::{upload_error_message, upload_file, UploadOutcome};
