//! Store module for GPXIFY
//!
//! Client state container and its on-disk persistence.

use std::path::PathBuf;

use thiserror::Error;

pub mod persistence;
pub mod state;

pub use persistence::{restore, snapshot, StateStore, TokenStore, STORAGE_KEY};
pub use state::{AppState, GpxFileData, Tab};

/// State store errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cannot access the state file: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file {path:?} is unreadable: {message}")]
    Corrupt { path: PathBuf, message: String },

    #[error("No loaded file matches '{0}'")]
    UnknownFile(String),

    #[error("No aid station at position {index} (there are {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
