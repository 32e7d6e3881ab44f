//! GPXIFY client library
//!
//! Client-side validation, backend API access, persisted state and the user
//! flows built on top of them.

pub mod api;
pub mod boundary;
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
#[macro_use]
pub mod logging;
pub mod models;
pub mod profile;
pub mod services;
pub mod store;
pub mod validation;

pub use config::Config;
pub use error::{AppError, AppResult};
