//! GPX File Validation
//!
//! Structural checks run on a GPX file before it is sent to the backend.
//! Oversized or obviously malformed files are rejected locally; odd but
//! harmless properties are reported as warnings.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Maximum accepted file size in bytes (25 MiB)
pub const MAX_FILE_SIZE: u64 = 25 * 1024 * 1024;

/// Number of leading bytes inspected by the structural check (50 KiB)
pub const STRUCTURE_PREFIX_BYTES: usize = 50 * 1024;

/// Accepted file extensions, lowercase and dot-prefixed
pub const ALLOWED_EXTENSIONS: &[&str] = &[".gpx"];

/// Content types accepted without a warning
pub const GPX_MIME_TYPES: &[&str] = &[
    "application/gpx+xml",
    "application/xml",
    "text/xml",
    // Several operating systems report .gpx files as raw bytes
    "application/octet-stream",
];

/// Outcome of a validation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether the file may be uploaded
    pub valid: bool,

    /// First blocking problem, set only when `valid` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Non-blocking remarks, `None` when there are none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warnings: Option<Vec<String>>,
}

impl ValidationResult {
    /// A passing result without warnings
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
            warnings: None,
        }
    }

    /// A passing result carrying warnings; an empty list collapses to `None`
    pub fn ok_with_warnings(warnings: Vec<String>) -> Self {
        Self {
            valid: true,
            error: None,
            warnings: if warnings.is_empty() { None } else { Some(warnings) },
        }
    }

    /// A failing result
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
            warnings: None,
        }
    }

    /// Warnings as a slice, empty when there are none
    pub fn warnings(&self) -> &[String] {
        self.warnings.as_deref().unwrap_or(&[])
    }
}

/// A file offered for upload
///
/// Mirrors what a browser exposes about a picked file: its name, its size,
/// the content type the platform reported, and a way to read its first bytes.
pub trait FileSource {
    /// File name including extension
    fn name(&self) -> &str;

    /// Size in bytes
    fn size(&self) -> u64;

    /// Content type reported by the platform, if any
    fn content_type(&self) -> Option<&str>;

    /// Read at most `limit` bytes from the start of the file
    fn read_prefix(&self, limit: usize) -> io::Result<Vec<u8>>;
}

/// A file on the local disk
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    size: u64,
    content_type: Option<String>,
}

impl LocalFile {
    /// Stat a file on disk. Local files carry no reported content type.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let metadata = std::fs::metadata(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path,
            name,
            size: metadata.len(),
            content_type: None,
        })
    }

    /// Attach a reported content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Read the whole file
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        std::fs::read(&self.path)
    }
}

impl FileSource for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn read_prefix(&self, limit: usize) -> io::Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(limit.min(usize::try_from(self.size).unwrap_or(usize::MAX)));
        File::open(&self.path)?
            .take(limit as u64)
            .read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

/// A file held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl InMemoryFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl FileSource for InMemoryFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn read_prefix(&self, limit: usize) -> io::Result<Vec<u8>> {
        Ok(self.bytes[..limit.min(self.bytes.len())].to_vec())
    }
}

/// Size in MiB, as shown to users
#[allow(clippy::cast_precision_loss)]
pub fn size_in_mib(bytes: u64) -> f64 {
    bytes as f64 / 1024.0 / 1024.0
}

/// Reject files above [`MAX_FILE_SIZE`]. Only the upper bound is enforced.
pub fn validate_file_size<F: FileSource + ?Sized>(file: &F) -> ValidationResult {
    if file.size() > MAX_FILE_SIZE {
        return ValidationResult::invalid(format!(
            "File too large ({:.1} MB). Maximum size: 25 MB.",
            size_in_mib(file.size())
        ));
    }
    ValidationResult::ok()
}

/// Lowercase extension from the last dot, empty when the name has none
pub fn file_extension(name: &str) -> String {
    let lower = name.to_lowercase();
    match lower.rfind('.') {
        Some(index) => lower[index..].to_string(),
        None => String::new(),
    }
}

/// Reject files whose extension is not `.gpx`
pub fn validate_file_extension<F: FileSource + ?Sized>(file: &F) -> ValidationResult {
    let extension = file_extension(file.name());

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return ValidationResult::invalid(format!(
            "Unsupported extension \"{extension}\". Please upload a .gpx file."
        ));
    }
    ValidationResult::ok()
}

/// Warn about unusual content types. Never fails: platforms disagree on
/// what a `.gpx` file is.
pub fn validate_mime_type<F: FileSource + ?Sized>(file: &F) -> ValidationResult {
    let mut warnings = Vec::new();

    if let Some(content_type) = file.content_type().filter(|t| !t.is_empty()) {
        if !GPX_MIME_TYPES.contains(&content_type) {
            warnings.push(format!(
                "Unusual MIME type: {content_type}. The file will be processed anyway."
            ));
        }
    }

    ValidationResult::ok_with_warnings(warnings)
}

/// Check the first [`STRUCTURE_PREFIX_BYTES`] of the file for GPX structure
pub fn validate_structure<F: FileSource + ?Sized>(file: &F) -> ValidationResult {
    let prefix = match file.read_prefix(STRUCTURE_PREFIX_BYTES) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(file = %file.name(), error = %e, "Failed to read file prefix");
            return ValidationResult::invalid("Error while reading the file.");
        }
    };

    inspect_content(&String::from_utf8_lossy(&prefix))
}

/// Structural checks on already-decoded text
pub fn inspect_content(content: &str) -> ValidationResult {
    let trimmed = content.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');

    if !trimmed.starts_with("<?xml") {
        return ValidationResult::invalid(
            "The file does not look like a valid XML document (missing <?xml declaration).",
        );
    }

    if !content.contains("<gpx") {
        return ValidationResult::invalid(
            "The file has no <gpx> element. It is not a valid GPX file.",
        );
    }

    let has_track = content.contains("<trk");
    let has_route = content.contains("<rte");
    let has_waypoints = content.contains("<wpt");

    if !has_track && !has_route && !has_waypoints {
        return ValidationResult::invalid(
            "The GPX file contains no track/route/waypoint data.",
        );
    }

    let mut warnings = Vec::new();
    if !has_track {
        warnings.push(
            "The file contains routes or waypoints but no track data (no <trk> element)."
                .to_string(),
        );
    }

    ValidationResult::ok_with_warnings(warnings)
}

/// Full validation: size, extension, content type, then structure.
///
/// The first failing check wins; warnings from the content type and
/// structure checks are accumulated on success.
pub fn validate_gpx_file<F: FileSource + ?Sized>(file: &F) -> ValidationResult {
    let size_check = validate_file_size(file);
    if !size_check.valid {
        return finish(file, size_check);
    }

    let extension_check = validate_file_extension(file);
    if !extension_check.valid {
        return finish(file, extension_check);
    }

    let mut warnings = validate_mime_type(file).warnings.unwrap_or_default();

    let structure_check = validate_structure(file);
    if !structure_check.valid {
        return finish(file, structure_check);
    }
    warnings.extend(structure_check.warnings.unwrap_or_default());

    finish(file, ValidationResult::ok_with_warnings(warnings))
}

fn finish<F: FileSource + ?Sized>(file: &F, result: ValidationResult) -> ValidationResult {
    crate::logging::log_validation_outcome(file.name(), file.size(), &result);
    if let Some(error) = &result.error {
        debug!(file = %file.name(), error = %error, "GPX file rejected");
    }
    result
}

/// Single message for display: the error when invalid, warnings joined by
/// newlines otherwise.
pub fn format_validation_error(result: &ValidationResult) -> String {
    if result.valid {
        return result.warnings().join("\n");
    }
    result.error.clone().unwrap_or_else(|| "Invalid file".to_string())
}
