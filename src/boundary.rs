//! Error boundary
//!
//! Last line of defence for the binary: any panic or unexpected failure ends
//! with a short recovery screen instead of a backtrace.

use std::fmt;
use std::panic;

use crate::api::ApiError;
use crate::error::AppError;

/// Screen printed after an unexpected failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryScreen {
    pub support_email: String,
    /// Technical detail, only shown in development builds or when asked
    pub detail: Option<String>,
}

impl RecoveryScreen {
    pub fn new(support_email: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            support_email: support_email.into(),
            detail,
        }
    }
}

impl fmt::Display for RecoveryScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Oops, something went wrong.")?;
        writeln!(
            f,
            "An unexpected error occurred. Your saved files are safe; run the command again to retry."
        )?;
        if let Some(detail) = &self.detail {
            writeln!(f)?;
            writeln!(f, "Error: {detail}")?;
        }
        writeln!(f)?;
        write!(f, "If the problem persists, contact support: mailto:{}", self.support_email)
    }
}

/// Replace the default panic output with the recovery screen
pub fn install_panic_hook(support_email: String, show_details: bool) {
    panic::set_hook(Box::new(move |info| {
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();

        tracing::error!(panic = %message, location = %location, "Unhandled panic");

        let screen = RecoveryScreen::new(support_email.clone(), show_details.then_some(message));
        eprintln!("{screen}");
    }));
}

/// Text printed for a failed command
///
/// Expected failures (validation, HTTP errors, connectivity) get their
/// message; anything else gets the recovery screen.
pub fn report(error: &AppError, support_email: &str, show_details: bool) -> String {
    let unexpected = error.is_server_error() && !matches!(error, AppError::Api(ApiError::Server { .. }));
    if unexpected {
        RecoveryScreen::new(support_email, show_details.then(|| error.to_string())).to_string()
    } else {
        format!("Error: {}", error.user_message())
    }
}
