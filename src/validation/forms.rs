//! Form Validation
//!
//! Field-level validation for the values a user types in before an action is
//! submitted: aid stations, pacing, race recovery, merge, segment ranges,
//! climb filters, contact messages and race slugs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::gpx_file::{file_extension, FileSource, MAX_FILE_SIZE};
use crate::models::aid_station::{AidStation, PacingMode};
use crate::models::contact::ContactRequest;
use crate::models::track::ClimbSegment;

static PACE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?$").expect("valid pace pattern"));

static OFFICIAL_TIME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2}):([0-5]\d):([0-5]\d)$|^([0-5]?\d):([0-5]\d)$")
        .expect("valid official time pattern")
});

static MERGED_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_\-\s]+$").expect("valid merged name pattern"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("valid slug pattern"));

/// Maximum aid stations accepted in one table
pub const MAX_AID_STATIONS: usize = 50;

/// Bounds on the number of files in one merge
pub const MIN_MERGE_FILES: usize = 2;
pub const MAX_MERGE_FILES: usize = 10;

/// Accepted flat pace, km/h
pub const MIN_PACE_KMH: f64 = 1.0;
pub const MAX_PACE_KMH: f64 = 60.0;

/// A single field failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every failure found in one form, in the order the fields were checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormErrors {
    pub errors: Vec<FieldError>,
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join(", "))
    }
}

impl std::error::Error for FormErrors {}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortcut for a form with a single failing field
    pub fn single(field: &str, message: &str) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: &str) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// First message recorded for `field`
    pub fn field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// First message overall
    pub fn first(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Merge another form's errors under a field prefix
    fn absorb(&mut self, prefix: &str, other: FormErrors) {
        for error in other.errors {
            self.errors.push(FieldError {
                field: format!("{prefix}.{}", error.field),
                message: error.message,
            });
        }
    }
}

/// Parse a user-typed distance in kilometres
pub fn parse_distance_km(raw: &str) -> Result<f64, FormErrors> {
    match raw.trim().replace(',', ".").parse::<f64>() {
        Ok(km) if km.is_finite() && km >= 0.0 => Ok(km),
        _ => Err(FormErrors::single("distance_km", "Invalid distance")),
    }
}

/// Validate one aid station; the name is trimmed
pub fn validate_aid_station(name: &str, distance_km: f64) -> Result<AidStation, FormErrors> {
    let mut errors = FormErrors::new();
    let name = name.trim();

    if name.is_empty() {
        errors.add("name", "Name is required");
    } else if name.chars().count() > 100 {
        errors.add("name", "Name is too long (max 100 characters)");
    }

    if !distance_km.is_finite() || distance_km < 0.0 {
        errors.add("distance_km", "Distance cannot be negative");
    } else if distance_km > 1000.0 {
        errors.add("distance_km", "Distance is too large (max 1000 km)");
    }

    errors.into_result(AidStation {
        name: name.to_string(),
        distance_km,
    })
}

/// Validate a custom pace in km/h, typed as text
pub fn validate_custom_pace(raw: &str) -> Result<f64, FormErrors> {
    if !PACE_PATTERN.is_match(raw) {
        return Err(FormErrors::single("custom_pace", "Pace must be a number"));
    }
    let pace: f64 = raw
        .parse()
        .map_err(|_| FormErrors::single("custom_pace", "Pace must be a number"))?;

    validate_pace(pace)
}

/// Range check shared by every pace entry point
pub fn validate_pace(pace: f64) -> Result<f64, FormErrors> {
    if !pace.is_finite() {
        return Err(FormErrors::single("custom_pace", "Pace must be a number"));
    }
    if pace < MIN_PACE_KMH {
        return Err(FormErrors::single("custom_pace", "Pace must be at least 1"));
    }
    if pace > MAX_PACE_KMH {
        return Err(FormErrors::single("custom_pace", "Pace cannot exceed 60"));
    }
    Ok(pace)
}

/// Validate the aid-station table settings and resolve the pacing mode
pub fn validate_table_config(
    use_naismith: bool,
    custom_pace: &str,
    aid_stations: &[AidStation],
) -> Result<PacingMode, FormErrors> {
    let mut errors = FormErrors::new();

    let pacing = if use_naismith {
        PacingMode::Naismith
    } else {
        match validate_custom_pace(custom_pace) {
            Ok(pace) => PacingMode::CustomPace(pace),
            Err(e) => {
                errors.absorb("config", e);
                PacingMode::Naismith
            }
        }
    };

    if aid_stations.is_empty() {
        errors.add("aid_stations", "At least one aid station is required");
    } else if aid_stations.len() > MAX_AID_STATIONS {
        errors.add("aid_stations", "Maximum 50 aid stations");
    }

    for (index, station) in aid_stations.iter().enumerate() {
        if let Err(e) = validate_aid_station(&station.name, station.distance_km) {
            errors.absorb(&format!("aid_stations.{index}"), e);
        }
    }

    errors.into_result(pacing)
}

/// Presence, size and extension checks for a required GPX form field
pub fn validate_gpx_field<F: FileSource + ?Sized>(
    field: &str,
    file: &F,
    missing_message: &str,
) -> Result<(), FormErrors> {
    if file.size() == 0 {
        return Err(FormErrors::single(field, missing_message));
    }
    if file.size() > MAX_FILE_SIZE {
        return Err(FormErrors::single(field, "File is too large (max 25MB)"));
    }
    if file_extension(file.name()) != ".gpx" {
        return Err(FormErrors::single(field, "File must be in .gpx format"));
    }
    Ok(())
}

/// Official finish time as `HH:MM:SS` or `MM:SS`
pub fn validate_official_time(raw: &str) -> Result<(), FormErrors> {
    if OFFICIAL_TIME_PATTERN.is_match(raw) {
        Ok(())
    } else {
        Err(FormErrors::single(
            "official_time",
            "Invalid format. Use HH:MM:SS or MM:SS",
        ))
    }
}

/// Race recovery form: both traces and the official time
pub fn validate_race_recovery<A, B>(
    official_gpx: &A,
    incomplete_gpx: &B,
    official_time: &str,
) -> Result<(), FormErrors>
where
    A: FileSource + ?Sized,
    B: FileSource + ?Sized,
{
    let mut errors = FormErrors::new();

    if let Err(e) = validate_gpx_field("official_gpx", official_gpx, "The official GPX file is required") {
        errors.errors.extend(e.errors);
    }
    if let Err(e) = validate_gpx_field(
        "incomplete_gpx",
        incomplete_gpx,
        "The incomplete GPX file is required",
    ) {
        errors.errors.extend(e.errors);
    }
    if let Err(e) = validate_official_time(official_time) {
        errors.errors.extend(e.errors);
    }

    errors.into_result(())
}

/// Merge form: file count and output name. Returns the trimmed name.
pub fn validate_merge(file_count: usize, merged_name: &str) -> Result<String, FormErrors> {
    let mut errors = FormErrors::new();

    if file_count < MIN_MERGE_FILES {
        errors.add("files", "Select at least 2 files to merge");
    } else if file_count > MAX_MERGE_FILES {
        errors.add("files", "At most 10 files can be merged");
    }

    let name = merged_name.trim();
    if name.is_empty() {
        errors.add("merged_name", "File name is required");
    } else if name.chars().count() > 255 {
        errors.add("merged_name", "Name is too long (max 255 characters)");
    } else if !MERGED_NAME_PATTERN.is_match(name) {
        errors.add(
            "merged_name",
            "Name may only contain letters, digits, spaces, dashes and underscores",
        );
    }

    errors.into_result(name.to_string())
}

/// Kilometre range for segment export and climb detection
pub fn validate_segment(start_km: f64, end_km: f64) -> Result<(), FormErrors> {
    let mut errors = FormErrors::new();

    if !start_km.is_finite() {
        errors.add("start_km", "Start kilometre must be a number");
    } else if start_km < 0.0 {
        errors.add("start_km", "Start kilometre cannot be negative");
    }
    if !end_km.is_finite() {
        errors.add("end_km", "End kilometre must be a number");
    } else if end_km < 0.0 {
        errors.add("end_km", "End kilometre cannot be negative");
    }
    if errors.is_empty() && end_km <= start_km {
        errors.add("end_km", "End kilometre must be greater than start kilometre");
    }

    errors.into_result(())
}

/// Contact form. Name and message are trimmed before their length is checked.
pub fn validate_contact_form(name: &str, email: &str, message: &str) -> Result<ContactRequest, FormErrors> {
    let mut errors = FormErrors::new();

    let name = name.trim();
    match name.chars().count() {
        0..=1 => errors.add("name", "Name must be at least 2 characters"),
        2..=100 => {}
        _ => errors.add("name", "Name is too long (max 100 characters)"),
    }

    let email = email.trim();
    if !EMAIL_PATTERN.is_match(email) {
        errors.add("email", "Invalid email address");
    } else if email.chars().count() > 255 {
        errors.add("email", "Email is too long");
    }

    let message = message.trim();
    match message.chars().count() {
        0..=9 => errors.add("message", "Message must be at least 10 characters"),
        10..=2000 => {}
        _ => errors.add("message", "Message is too long (max 2000 characters)"),
    }

    errors.into_result(ContactRequest {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// Race slug as accepted by the backend
pub fn validate_slug(slug: &str) -> Result<(), FormErrors> {
    if SLUG_PATTERN.is_match(slug) {
        Ok(())
    } else {
        Err(FormErrors::single(
            "slug",
            "Slug may only contain lowercase letters, digits and dashes",
        ))
    }
}

/// Thresholds used to filter detected climbs for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClimbFilter {
    /// Minimum D+ in meters
    pub min_elevation_gain: f64,
    /// Minimum length in km
    pub min_distance_km: f64,
    /// Minimum average gradient in percent
    pub min_gradient: f64,
}

impl Default for ClimbFilter {
    fn default() -> Self {
        Self {
            min_elevation_gain: 10.0,
            min_distance_km: 0.1,
            min_gradient: 1.0,
        }
    }
}

impl ClimbFilter {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        if !self.min_elevation_gain.is_finite() {
            errors.add("min_elevation_gain", "Elevation gain must be a number");
        } else if self.min_elevation_gain.fract() != 0.0 {
            errors.add("min_elevation_gain", "Elevation gain must be a whole number");
        } else if self.min_elevation_gain < 10.0 {
            errors.add("min_elevation_gain", "Minimum elevation gain must be at least 10m");
        } else if self.min_elevation_gain > 5000.0 {
            errors.add("min_elevation_gain", "Minimum elevation gain cannot exceed 5000m");
        }

        if !self.min_distance_km.is_finite() {
            errors.add("min_distance_km", "Minimum distance must be a number");
        } else if self.min_distance_km < 0.1 {
            errors.add("min_distance_km", "Minimum distance must be at least 0.1km");
        } else if self.min_distance_km > 100.0 {
            errors.add("min_distance_km", "Minimum distance cannot exceed 100km");
        }

        if !self.min_gradient.is_finite() {
            errors.add("min_gradient", "Minimum gradient must be a number");
        } else if self.min_gradient < 1.0 {
            errors.add("min_gradient", "Minimum gradient must be at least 1%");
        } else if self.min_gradient > 50.0 {
            errors.add("min_gradient", "Minimum gradient cannot exceed 50%");
        }

        errors.into_result(())
    }

    /// Keep the climbs meeting every threshold, in their original order
    pub fn apply(&self, climbs: Vec<ClimbSegment>) -> Vec<ClimbSegment> {
        climbs
            .into_iter()
            .filter(|c| {
                c.elevation_gain >= self.min_elevation_gain
                    && c.distance_km >= self.min_distance_km
                    && c.avg_gradient >= self.min_gradient
            })
            .collect()
    }
}
