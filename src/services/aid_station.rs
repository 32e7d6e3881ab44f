//! Aid Station Service
//!
//! Planning aid stations on the selected track, generating the per-segment
//! table on the backend and exporting it.

use crate::api::ApiClient;
use crate::error::{AppError, AppResult};
use crate::format::{escape_csv, format_minutes};
use crate::models::{AidStation, AidStationTableRequest, AidStationTableResponse, Track, TrackStatistics};
use crate::store::{AppState, StateStore};
use crate::validation::forms::{validate_aid_station, validate_table_config};

/// Default name of the exported table
pub const CSV_FILE_NAME: &str = "aid_station_table.csv";

const CSV_HEADERS: [&str; 8] = [
    "From",
    "To",
    "Distance (km)",
    "D+ (m)",
    "D- (m)",
    "Avg gradient (%)",
    "Estimated time",
    "Cumulative time",
];

/// Insert a station after every station at the same or a lower distance
pub fn insert_sorted(stations: &mut Vec<AidStation>, station: AidStation) {
    let index = stations.partition_point(|s| s.distance_km <= station.distance_km);
    stations.insert(index, station);
}

/// Validate and add a station, keeping the list ordered by distance
pub fn add_station(store: &StateStore, name: &str, distance_km: f64) -> AppResult<AidStation> {
    let station = validate_aid_station(name, distance_km)?;

    store.update(|state| {
        let mut stations = std::mem::take(&mut state.aid_stations);
        insert_sorted(&mut stations, station.clone());
        state.set_aid_stations(stations);
        Ok(())
    })?;

    Ok(station)
}

/// Remove a station; the generated table no longer matches and is dropped
pub fn remove_station(store: &StateStore, index: usize) -> AppResult<AidStation> {
    let removed = store.update(|state| {
        let removed = state.remove_aid_station(index)?;
        state.set_aid_station_table(None);
        Ok(removed)
    })?;
    Ok(removed)
}

/// Check that a table can be generated from this state
pub fn require_table_inputs(state: &AppState) -> AppResult<&Track> {
    let track = state
        .selected_track()
        .ok_or_else(|| AppError::precondition("No track loaded. Upload a GPX file first."))?;

    if state.aid_stations.len() < 2 {
        return Err(AppError::precondition("At least 2 aid stations are required."));
    }

    Ok(track)
}

/// Generate the table for the selected track and keep it in the state
pub async fn generate_table(
    api: &ApiClient,
    store: &StateStore,
    use_naismith: bool,
    custom_pace: &str,
) -> AppResult<AidStationTableResponse> {
    let mut state = store.load()?;
    let track = require_table_inputs(&state)?;
    let pacing = validate_table_config(use_naismith, custom_pace, &state.aid_stations)?;

    let request = AidStationTableRequest::new(track.points.clone(), state.aid_stations.clone(), pacing);
    tracing::info!(
        stations = request.aid_stations.len(),
        pacing = %pacing,
        "Generating aid station table"
    );

    let table = api.generate_aid_station_table(&request).await?;

    state.set_aid_station_table(Some(table.clone()));
    store.save(&state)?;

    Ok(table)
}

/// CSV export: BOM, header, one row per segment, blank line, totals
pub fn table_to_csv(table: &AidStationTableResponse) -> String {
    let mut lines = Vec::with_capacity(table.segments.len() + 3);

    lines.push(
        CSV_HEADERS
            .iter()
            .map(|h| escape_csv(h))
            .collect::<Vec<_>>()
            .join(","),
    );

    for (index, segment) in table.segments.iter().enumerate() {
        lines.push(
            [
                escape_csv(&segment.from_station),
                escape_csv(&segment.to_station),
                format!("{:.2}", segment.distance_km),
                format!("{:.0}", segment.elevation_gain),
                format!("{:.0}", segment.elevation_loss),
                format!("{:.1}", segment.avg_gradient),
                escape_csv(&format_minutes(segment.estimated_time_minutes)),
                escape_csv(&format_minutes(Some(table.cumulative_minutes(index)))),
            ]
            .join(","),
        );
    }

    lines.push(String::new());
    lines.push(format!(
        "Total,{:.2} km,{:.0} m,{:.0} m,,{},",
        table.total_distance_km,
        table.total_elevation_gain,
        table.total_elevation_loss,
        escape_csv(&format_minutes(table.total_time_minutes)),
    ));

    format!("\u{FEFF}{}", lines.join("\n"))
}

/// One track per table segment, cut from the selected track
pub fn segment_tracks(track: &Track, table: &AidStationTableResponse) -> Vec<Track> {
    table
        .segments
        .iter()
        .map(|segment| Track {
            name: Some(format!("{} → {}", segment.from_station, segment.to_station)),
            points: track.points_between_km(segment.start_km, segment.end_km),
            statistics: TrackStatistics {
                total_distance: segment.distance_km * 1000.0,
                total_elevation_gain: segment.elevation_gain,
                total_elevation_loss: segment.elevation_loss,
                ..TrackStatistics::default()
            },
        })
        .collect()
}
