//! Analysis Service
//!
//! Work on the selected track: segment export and climb detection. Both send
//! the track points back to the backend with a kilometre range.

use crate::api::ApiClient;
use crate::error::{AppError, AppResult};
use crate::models::{ClimbSegment, ExportSegmentRequest, Track};
use crate::store::AppState;
use crate::validation::forms::validate_segment;
use crate::validation::ClimbFilter;

fn selected_track(state: &AppState) -> AppResult<&Track> {
    state
        .selected_track()
        .ok_or_else(|| AppError::precondition("No track loaded. Upload a GPX file first."))
}

/// Request for the `[start_km, end_km]` range of a track
pub fn segment_request(track: &Track, start_km: f64, end_km: f64) -> AppResult<ExportSegmentRequest> {
    validate_segment(start_km, end_km)?;

    Ok(ExportSegmentRequest {
        track_points: track.points.clone(),
        start_km,
        end_km,
        track_name: track.display_name().to_string(),
    })
}

/// Download name of an exported segment
pub fn segment_filename(track_name: &str, start_km: f64, end_km: f64) -> String {
    let base: String = track_name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{base}_km{start_km:.1}-{end_km:.1}.gpx")
}

/// Export a range of the selected track as GPX
pub async fn export_segment(
    api: &ApiClient,
    state: &AppState,
    start_km: f64,
    end_km: f64,
) -> AppResult<(String, Vec<u8>)> {
    let track = selected_track(state)?;
    let request = segment_request(track, start_km, end_km)?;
    let gpx = api.export_segment(&request).await?;
    Ok((segment_filename(&request.track_name, start_km, end_km), gpx))
}

/// Climbs of the selected track over its whole length, filtered for display
pub async fn detect_climbs(api: &ApiClient, state: &AppState, filter: &ClimbFilter) -> AppResult<Vec<ClimbSegment>> {
    filter.validate()?;
    let track = selected_track(state)?;

    let end_km = track
        .points
        .last()
        .map_or_else(|| track.total_distance_km(), |p| p.distance_km());
    if end_km <= 0.0 {
        return Err(AppError::precondition("The selected track has no distance."));
    }

    let request = segment_request(track, 0.0, end_km)?;
    let climbs = api.detect_climbs(&request).await?;
    let total = climbs.len();
    let kept = filter.apply(climbs);

    tracing::info!(detected = total, kept = kept.len(), "Climbs detected");
    Ok(kept)
}
