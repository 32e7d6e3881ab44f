//! Logging configuration for GPXIFY
//!
//! Structured logging setup with appropriate levels and formatting. Events go
//! to stderr so that command output on stdout stays machine-readable.

use std::path::Path;

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

use crate::config::LogFormat;
use crate::validation::ValidationResult;

/// Initialize the client logging system
///
/// `RUST_LOG` takes precedence over `level`. Calling this twice is harmless,
/// the second subscriber is simply not installed.
pub fn init_logging(level: &str, format: LogFormat) {
    let default_filter = format!("gpxify={level}");

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let output = match format {
        LogFormat::Json => json_layer().boxed(),
        LogFormat::Console => console_layer().boxed(),
    };

    let installed = Registry::default()
        .with(output.with_filter(env_filter))
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(format = %format, "Logging system initialized");
    }
}

/// JSON logging layer for log collection
fn json_layer() -> impl Layer<Registry> + Send + Sync {
    fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
}

/// Console logging layer for interactive use
fn console_layer() -> impl Layer<Registry> + Send + Sync {
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .with_ansi(true)
        .with_writer(std::io::stderr)
}

/// Create a span for a backend request
#[macro_export]
macro_rules! api_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "api_request",
            method = %$method,
            path = %$path,
            status_code = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Create a span for a user flow (upload, merge, roadbook...)
#[macro_export]
macro_rules! flow_span {
    ($flow:expr) => {
        tracing::info_span!(
            "user_flow",
            flow = %$flow,
            file = tracing::field::Empty,
        )
    };
    ($flow:expr, $file:expr) => {
        tracing::info_span!(
            "user_flow",
            flow = %$flow,
            file = %$file,
        )
    };
}

/// Log client startup
pub fn log_startup() {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        git_commit = option_env!("GIT_COMMIT").unwrap_or("unknown"),
        build_time = option_env!("BUILD_TIME").unwrap_or("unknown"),
        "GPXIFY starting up"
    );
}

/// Log a completed backend request
pub fn log_api_request(method: &str, path: &str, status: Option<u16>, duration_ms: u64) {
    match status {
        Some(code) if code < 400 => tracing::info!(
            method = %method,
            path = %path,
            status_code = code,
            duration_ms = duration_ms,
            "Backend request completed"
        ),
        Some(code) => tracing::warn!(
            method = %method,
            path = %path,
            status_code = code,
            duration_ms = duration_ms,
            "Backend request rejected"
        ),
        None => tracing::warn!(
            method = %method,
            path = %path,
            duration_ms = duration_ms,
            "Backend unreachable"
        ),
    }
}

/// Log the outcome of a GPX file validation
pub fn log_validation_outcome(file_name: &str, size: u64, result: &ValidationResult) {
    if result.valid {
        tracing::debug!(
            file = %file_name,
            size_bytes = size,
            warnings = result.warnings().len(),
            "GPX file accepted"
        );
    } else {
        tracing::info!(
            file = %file_name,
            size_bytes = size,
            error = ?result.error,
            "GPX file rejected"
        );
    }
}

/// Log a write of the persisted state
pub fn log_state_persisted(path: &Path, files: usize, aid_stations: usize) {
    tracing::debug!(
        path = %path.display(),
        files = files,
        aid_stations = aid_stations,
        "Client state persisted"
    );
}

/// Log error with context
pub fn log_error(error: &str, context: &str) {
    tracing::error!(
        error = %error,
        context = %context,
        "Client error occurred"
    );
}

/// Log warning with context
pub fn log_warning(warning: &str, context: &str) {
    tracing::warn!(
        warning = %warning,
        context = %context,
        "Client warning"
    );
}
