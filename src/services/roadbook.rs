//! Roadbook Service
//!
//! Passage-time planning on a published race: estimated arrival at every aid
//! station from a departure time and a flat pace, plus a printable text
//! roadbook for the runner or the crew.

use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::api::ApiClient;
use crate::error::{AppError, AppResult};
use crate::format::{format_distance, format_elapsed, format_elevation};
use crate::models::{Race, RaceAidStation, RavitoType, SunTimes, SunTimesRequest};
use crate::validation::forms::{MAX_PACE_KMH, MIN_PACE_KMH};

/// Flat pace used when the runner gives none, in km/h
pub const DEFAULT_PACE_KMH: f64 = 5.0;

/// Meters of climb worth one hour, halved in the estimate
const CLIMB_METERS_PER_HOUR: f64 = 600.0;

/// Who the printed roadbook is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportMode {
    #[default]
    Runner,
    Assistance,
}

impl ExportMode {
    pub fn label(self) -> &'static str {
        match self {
            ExportMode::Runner => "Runner",
            ExportMode::Assistance => "Crew",
        }
    }
}

/// Runner settings for one race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Local departure date and time
    pub departure_time: NaiveDateTime,
    /// Flasks carried by default
    pub flask_capacity: u8,
    /// Per-station flask count, by station index
    #[serde(default)]
    pub flask_capacities: HashMap<usize, u8>,
    /// Flat pace in km/h replacing the default
    #[serde(default)]
    pub pace_override: Option<f64>,
    /// Notes by station id, or by index for stations without one
    #[serde(default)]
    pub notes: HashMap<String, String>,
}

impl RunnerConfig {
    pub fn new(departure_time: NaiveDateTime) -> Self {
        Self {
            departure_time,
            flask_capacity: 2,
            flask_capacities: HashMap::new(),
            pace_override: None,
            notes: HashMap::new(),
        }
    }

    /// Pace used for the estimate
    pub fn pace_kmh(&self) -> f64 {
        self.pace_override
            .filter(|p| (MIN_PACE_KMH..=MAX_PACE_KMH).contains(p))
            .unwrap_or(DEFAULT_PACE_KMH)
    }

    pub fn flasks_at(&self, index: usize) -> u8 {
        self.flask_capacities
            .get(&index)
            .copied()
            .unwrap_or(self.flask_capacity)
    }
}

/// Estimated passage at one aid station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassageTime {
    pub station: RaceAidStation,
    pub arrival: NaiveDateTime,
    /// Rounded minutes since the start
    pub time_from_start_minutes: i64,
}

/// Hours from the start to a station: distance at the flat pace, plus half an
/// hour per 600 m of station altitude
pub fn estimated_hours(station: &RaceAidStation, pace_kmh: f64) -> f64 {
    let elevation_penalty = station.elevation.unwrap_or(0.0) / CLIMB_METERS_PER_HOUR / 2.0;
    station.distance_km / pace_kmh + elevation_penalty
}

/// Passage times at every station, in race order
pub fn passage_times(race: &Race, config: &RunnerConfig) -> AppResult<Vec<PassageTime>> {
    let pace = config.pace_kmh();

    race.aid_stations
        .iter()
        .map(|station| {
            let hours = estimated_hours(station, pace);
            // Sub-millisecond precision is irrelevant for a roadbook
            let millis = (hours * 3_600_000.0).round() as i64;
            let arrival = Duration::try_milliseconds(millis)
                .filter(|_| hours.is_finite())
                .and_then(|offset| config.departure_time.checked_add_signed(offset))
                .ok_or_else(|| {
                    AppError::precondition(&format!(
                        "Passage time at '{}' is out of range",
                        station.name
                    ))
                })?;
            Ok(PassageTime {
                station: station.clone(),
                arrival,
                time_from_start_minutes: (hours * 60.0).round() as i64,
            })
        })
        .collect()
}

/// Resolve a race by slug; an unknown slug is an error naming it
pub async fn find_race(api: &ApiClient, slug: &str) -> AppResult<Race> {
    api.race_by_slug(slug).await.map_err(|e| {
        if e.is_not_found() {
            AppError::not_found(&format!("Race '{slug}'"))
        } else {
            e.into()
        }
    })
}

/// Sun times on race day, when the race has a start location
///
/// A failure here only degrades the roadbook, it is logged and ignored.
pub async fn sun_times_for(api: &ApiClient, race: &Race, config: &RunnerConfig) -> Option<SunTimes> {
    let (lat, lon) = race.start_location()?;
    let request = SunTimesRequest {
        lat,
        lon,
        date: config.departure_time.date().format("%Y-%m-%d").to_string(),
    };

    match api.sun_times(&request).await {
        Ok(times) => Some(times),
        Err(e) => {
            crate::logging::log_warning(&e.to_string(), "sun times");
            None
        }
    }
}

fn type_label(station_type: RavitoType) -> &'static str {
    station_type.display_name()
}

/// Text roadbook
pub fn render(
    race: &Race,
    config: &RunnerConfig,
    passages: &[PassageTime],
    sun_times: Option<&SunTimes>,
    mode: ExportMode,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} - Roadbook {}", race.name, mode.label());
    let _ = writeln!(out, "{}", "=".repeat(race.name.chars().count() + 11 + mode.label().len()));

    if let Some(distance) = race.total_distance_km {
        let _ = write!(out, "Distance: {}", format_distance(distance));
        if let Some(gain) = race.total_elevation_gain {
            let _ = write!(out, "   D+: {}", format_elevation(gain));
        }
        out.push('\n');
    }

    let _ = writeln!(out, "Departure: {}", config.departure_time.format("%d/%m/%Y %H:%M"));
    if mode == ExportMode::Runner {
        let _ = writeln!(out, "Pace: {:.1} km/h", config.pace_kmh());
    }
    if let Some(sun) = sun_times {
        let _ = writeln!(out, "Sunrise: {}   Sunset: {}", sun.sunrise, sun.sunset);
    }
    out.push('\n');

    for (index, passage) in passages.iter().enumerate() {
        let station = &passage.station;
        if mode == ExportMode::Assistance && station.station_type != RavitoType::Assistance {
            continue;
        }

        let _ = write!(
            out,
            "{:>7}  {:<28} {:<6} {:>6}  {}  +{}",
            format!("{:.1}", station.distance_km),
            station.name,
            type_label(station.station_type),
            station
                .elevation
                .map_or_else(|| "-".to_string(), format_elevation),
            passage.arrival.format("%H:%M"),
            format_elapsed(passage.time_from_start_minutes),
        );

        if let Some(cutoff) = &station.cutoff_time {
            let _ = write!(out, "  cutoff {cutoff}");
        }

        if mode == ExportMode::Runner {
            let _ = write!(out, "  flasks {}", config.flasks_at(index));
            if let Some(note) = config
                .notes
                .get(&station.note_key(index))
                .filter(|n| !n.trim().is_empty())
            {
                let _ = write!(out, "  {note}");
            }
        }
        out.push('\n');
    }

    if let Some(last) = passages.last() {
        out.push('\n');
        let _ = writeln!(out, "Estimated duration: {}", format_elapsed(last.time_from_start_minutes));
        let _ = writeln!(out, "Estimated finish: {}", last.arrival.format("%d/%m %H:%M"));
    }

    let _ = write!(
        out,
        "\nGenerated on {} with GPXIFY\n",
        chrono::Local::now().format("%d/%m/%Y")
    );
    out
}
