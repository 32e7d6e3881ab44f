//! Elevation profile
//!
//! Client-side profile of a raw GPX document: cumulative great-circle
//! distance along the track points, downsampled for display.

use std::io::Cursor;

use serde::Serialize;
use thiserror::Error;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Maximum number of points kept for display
pub const MAX_PROFILE_POINTS: usize = 500;

/// Profile errors
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Cannot parse GPX content: {0}")]
    Parse(String),

    #[error("The GPX content has no track points")]
    NoTrackPoints,
}

/// Point of the profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfilePoint {
    /// Cumulative distance in km
    pub distance_km: f64,
    /// Meters, 0 when the point has no elevation
    pub elevation: f64,
}

/// Great-circle distance in km between two coordinates in degrees
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Track points of every track and segment, in document order
pub fn parse_profile(content: &str) -> Result<Vec<ProfilePoint>, ProfileError> {
    let gpx = gpx::read(Cursor::new(content.as_bytes()))
        .map_err(|e| ProfileError::Parse(e.to_string()))?;

    let mut points = Vec::new();
    let mut total = 0.0;
    let mut previous: Option<(f64, f64)> = None;

    for track in &gpx.tracks {
        for segment in &track.segments {
            for waypoint in &segment.points {
                let geo = waypoint.point();
                let (lat, lon) = (geo.y(), geo.x());

                if let Some((prev_lat, prev_lon)) = previous {
                    total += haversine_km(prev_lat, prev_lon, lat, lon);
                }
                previous = Some((lat, lon));

                points.push(ProfilePoint {
                    distance_km: total,
                    elevation: waypoint.elevation.unwrap_or(0.0),
                });
            }
        }
    }

    if points.is_empty() {
        return Err(ProfileError::NoTrackPoints);
    }

    Ok(points)
}

/// Keep every `ceil(len / max)`-th point; short profiles are returned as is
pub fn downsample(points: &[ProfilePoint], max: usize) -> Vec<ProfilePoint> {
    if max == 0 || points.len() <= max {
        return points.to_vec();
    }

    let step = points.len().div_ceil(max);
    points.iter().step_by(step).copied().collect()
}

/// Summary of a profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProfileSummary {
    pub total_distance_km: f64,
    pub min_elevation: f64,
    pub max_elevation: f64,
}

pub fn summarize(points: &[ProfilePoint]) -> Option<ProfileSummary> {
    let last = points.last()?;
    let (min, max) = points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.elevation), hi.max(p.elevation))
        });

    Some(ProfileSummary {
        total_distance_km: last.distance_km,
        min_elevation: min,
        max_elevation: max,
    })
}
