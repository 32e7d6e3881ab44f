//! Validation module for GPXIFY
//!
//! Client-side checks run before anything is sent to the backend.

pub mod forms;
pub mod gpx_file;

// Re-export commonly used types
pub use forms::{ClimbFilter, FieldError, FormErrors};
pub use gpx_file::{
    file_extension, format_validation_error, validate_gpx_file, FileSource, InMemoryFile, LocalFile,
    ValidationResult,
};
