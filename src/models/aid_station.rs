//! Aid Station Model
//!
//! Named checkpoints along a route and the per-segment table the backend
//! computes between consecutive stations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::track::TrackPoint;

/// Checkpoint entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AidStation {
    pub name: String,
    pub distance_km: f64,
}

impl AidStation {
    pub fn new(name: impl Into<String>, distance_km: f64) -> Self {
        Self {
            name: name.into(),
            distance_km,
        }
    }
}

/// How the backend estimates segment times
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PacingMode {
    /// Naismith rule, computed server-side
    #[default]
    Naismith,
    /// Flat pace in km/h
    CustomPace(f64),
}

impl fmt::Display for PacingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacingMode::Naismith => write!(f, "Naismith"),
            PacingMode::CustomPace(pace) => write!(f, "{pace} km/h"),
        }
    }
}

/// Body of `POST /gpx/aid-station-table`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AidStationTableRequest {
    pub track_points: Vec<TrackPoint>,
    pub aid_stations: Vec<AidStation>,
    pub use_naismith: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_pace_kmh: Option<f64>,
}

impl AidStationTableRequest {
    pub fn new(track_points: Vec<TrackPoint>, aid_stations: Vec<AidStation>, pacing: PacingMode) -> Self {
        let (use_naismith, custom_pace_kmh) = match pacing {
            PacingMode::Naismith => (true, None),
            PacingMode::CustomPace(pace) => (false, Some(pace)),
        };

        Self {
            track_points,
            aid_stations,
            use_naismith,
            custom_pace_kmh,
        }
    }
}

/// One row of the aid-station table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AidStationSegment {
    pub from_station: String,
    pub to_station: String,
    pub start_km: f64,
    pub end_km: f64,
    pub distance_km: f64,
    pub elevation_gain: f64,
    pub elevation_loss: f64,
    pub avg_gradient: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time_minutes: Option<f64>,
}

/// Response of `POST /gpx/aid-station-table`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AidStationTableResponse {
    #[serde(default = "default_true")]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub segments: Vec<AidStationSegment>,
    pub total_distance_km: f64,
    pub total_elevation_gain: f64,
    pub total_elevation_loss: f64,
    #[serde(
        default,
        alias = "total_estimated_time_minutes",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_time_minutes: Option<f64>,
}

fn default_true() -> bool {
    true
}

impl AidStationTableResponse {
    /// Sum of estimated times up to and including segment `index`
    pub fn cumulative_minutes(&self, index: usize) -> f64 {
        self.segments
            .iter()
            .take(index + 1)
            .filter_map(|s| s.estimated_time_minutes)
            .sum()
    }
}
