//! Shared fixtures for unit tests

#![allow(dead_code)]

use gpxify::models::{
    AidStationSegment, AidStationTableResponse, GpxData, Track, TrackPoint, TrackStatistics,
};
use gpxify::store::GpxFileData;

pub const FULL_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Col de la Croix</name>
    <trkseg>
      <trkpt lat="45.9000" lon="6.8000"><ele>1000</ele></trkpt>
      <trkpt lat="45.9090" lon="6.8000"><ele>1100</ele></trkpt>
      <trkpt lat="45.9180" lon="6.8000"><ele>1250</ele></trkpt>
    </trkseg>
  </trk>
</gpx>
"#;

pub const WAYPOINT_ONLY_GPX: &str = r#"<?xml version="1.0"?>
<gpx version="1.1" creator="test">
  <wpt lat="45.9" lon="6.8"><name>Refuge</name></wpt>
</gpx>
"#;

pub fn point(distance_m: f64, elevation: f64) -> TrackPoint {
    TrackPoint {
        lat: 45.9 + distance_m / 111_000.0,
        lon: 6.8,
        elevation: Some(elevation),
        distance: distance_m,
        time: None,
    }
}

/// A 10 km track with one point per kilometre
pub fn sample_track() -> Track {
    let points = (0..=10)
        .map(|km| point(f64::from(km) * 1000.0, 1000.0 + f64::from(km) * 50.0))
        .collect();

    Track {
        name: Some("Col de la Croix".to_string()),
        points,
        statistics: TrackStatistics {
            total_distance: 10_000.0,
            total_elevation_gain: 500.0,
            total_elevation_loss: 0.0,
            ..TrackStatistics::default()
        },
    }
}

pub fn sample_file(id: &str, name: &str) -> GpxFileData {
    GpxFileData::new(
        Some(id.to_string()),
        name,
        GpxData {
            filename: name.to_string(),
            tracks: vec![sample_track()],
            waypoints: Vec::new(),
        },
    )
}

pub fn segment(from: &str, to: &str, start_km: f64, end_km: f64, minutes: Option<f64>) -> AidStationSegment {
    AidStationSegment {
        from_station: from.to_string(),
        to_station: to.to_string(),
        start_km,
        end_km,
        distance_km: end_km - start_km,
        elevation_gain: (end_km - start_km) * 50.0,
        elevation_loss: 0.0,
        avg_gradient: 5.0,
        estimated_time_minutes: minutes,
    }
}

pub fn sample_table() -> AidStationTableResponse {
    AidStationTableResponse {
        success: true,
        message: None,
        segments: vec![
            segment("Start", "Refuge", 0.0, 4.0, Some(65.0)),
            segment("Refuge", "Finish", 4.0, 10.0, Some(100.0)),
        ],
        total_distance_km: 10.0,
        total_elevation_gain: 500.0,
        total_elevation_loss: 0.0,
        total_time_minutes: Some(165.0),
    }
}
