//! Track Model
//!
//! Track data as returned by the backend after parsing a GPX file. The
//! backend computes distances and statistics; the client only reads them.

use serde::{Deserialize, Serialize};

/// Single GPS coordinate (waypoints)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

/// Track point with cumulative distance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,

    /// Cumulative distance from the start, in meters
    pub distance: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl TrackPoint {
    pub fn distance_km(&self) -> f64 {
        self.distance / 1000.0
    }
}

/// Statistics computed by the backend for one track
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackStatistics {
    /// Meters
    pub total_distance: f64,
    /// D+ in meters
    pub total_elevation_gain: f64,
    /// D- in meters
    pub total_elevation_loss: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_elevation: Option<f64>,
    /// Seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

/// A single track of a GPX file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub points: Vec<TrackPoint>,
    pub statistics: TrackStatistics,
}

impl Track {
    /// Points whose cumulative distance lies within `[start_km, end_km]`
    pub fn points_between_km(&self, start_km: f64, end_km: f64) -> Vec<TrackPoint> {
        let start = start_km * 1000.0;
        let end = end_km * 1000.0;
        self.points
            .iter()
            .filter(|p| p.distance >= start && p.distance <= end)
            .cloned()
            .collect()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.statistics.total_distance / 1000.0
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unnamed track")
    }
}

/// Parsed content of one GPX file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpxData {
    pub filename: String,
    pub tracks: Vec<Track>,
    #[serde(default)]
    pub waypoints: Vec<Coordinate>,
}

/// Body of `POST /gpx/upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<GpxData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_id: Option<String>,
}

/// Body of `GET /gpx/test`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub message: String,
    pub version: String,
}

/// Climb detected by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimbSegment {
    pub start_km: f64,
    pub end_km: f64,
    pub distance_km: f64,
    /// D+ in meters
    pub elevation_gain: f64,
    /// D- in meters
    #[serde(default)]
    pub elevation_loss: f64,
    /// Percent
    pub avg_gradient: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climb_type: Option<String>,
}

impl ClimbSegment {
    pub fn new(start_km: f64, end_km: f64, elevation_gain: f64, avg_gradient: f64) -> Self {
        Self {
            start_km,
            end_km,
            distance_km: end_km - start_km,
            elevation_gain,
            elevation_loss: 0.0,
            avg_gradient,
            climb_type: None,
        }
    }

    /// Display label for the backend's climb classification
    pub fn type_label(&self) -> &'static str {
        match self.climb_type.as_deref() {
            Some("type_a") => "Type A",
            Some(_) => "Type B",
            None => "Climb",
        }
    }
}

/// Body of `POST /gpx/export-segment` and `POST /gpx/detect-climbs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSegmentRequest {
    pub track_points: Vec<TrackPoint>,
    pub start_km: f64,
    pub end_km: f64,
    pub track_name: String,
}
