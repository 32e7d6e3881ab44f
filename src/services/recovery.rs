//! Race Recovery Service
//!
//! Rebuilds a full race trace from a recording that stopped early, the
//! official course and the official finish time.

use std::path::Path;

use crate::api::{ApiClient, RaceRecoveryUpload, UploadFile};
use crate::error::AppResult;
use crate::validation::forms::validate_race_recovery;
use crate::validation::{FileSource, LocalFile};

/// Race recovery inputs as typed by the user
#[derive(Debug, Clone)]
pub struct RecoveryForm<'a> {
    pub incomplete_gpx: &'a Path,
    pub official_gpx: &'a Path,
    pub official_time: &'a str,
    pub approx_distance_km: Option<f64>,
}

/// Download name of a recovered trace
pub fn recovered_filename(incomplete_name: &str) -> String {
    let stem = incomplete_name
        .rsplit_once('.')
        .map_or(incomplete_name, |(stem, _)| stem);
    format!("{stem}_recovered.gpx")
}

/// Validate the form, upload both traces and return the recovered GPX
pub async fn recover(api: &ApiClient, form: &RecoveryForm<'_>) -> AppResult<(String, Vec<u8>)> {
    let incomplete = LocalFile::open(form.incomplete_gpx)?;
    let official = LocalFile::open(form.official_gpx)?;

    validate_race_recovery(&official, &incomplete, form.official_time)?;

    tracing::info!(
        incomplete = %incomplete.name(),
        official = %official.name(),
        official_time = %form.official_time,
        "Recovering race trace"
    );

    let upload = RaceRecoveryUpload {
        incomplete: UploadFile::from_local(&incomplete)?,
        complete: UploadFile::from_local(&official)?,
        official_time: form.official_time.to_string(),
        approx_distance_km: form.approx_distance_km,
    };

    let gpx = api.recover_race(upload).await?;
    Ok((recovered_filename(incomplete.name()), gpx))
}
