//! Roadbook computation tests

use chrono::{NaiveDate, NaiveDateTime};
use gpxify::models::{Race, RaceAidStation, RavitoType, SunTimes};
use gpxify::services::roadbook::{estimated_hours, passage_times, render, DEFAULT_PACE_KMH};
use gpxify::services::{ExportMode, RunnerConfig};

fn departure() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 8, 28)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap()
}

fn station(id: Option<&str>, name: &str, km: f64, elevation: f64, station_type: RavitoType) -> RaceAidStation {
    RaceAidStation {
        id: id.map(str::to_string),
        name: name.to_string(),
        distance_km: km,
        elevation: Some(elevation),
        station_type,
        services: None,
        cutoff_time: None,
        position_order: 0,
    }
}

fn race() -> Race {
    Race {
        id: "r1".to_string(),
        name: "Grand Raid".to_string(),
        slug: "grand-raid".to_string(),
        description: None,
        gpx_content: String::new(),
        total_distance_km: Some(25.0),
        total_elevation_gain: Some(1800.0),
        total_elevation_loss: Some(1800.0),
        start_location_lat: Some(45.92),
        start_location_lon: Some(6.87),
        is_published: true,
        aid_stations: vec![
            station(Some("s-1"), "Refuge", 10.0, 600.0, RavitoType::Eau),
            station(None, "Village", 20.0, 1200.0, RavitoType::Assistance),
            station(None, "Col", 25.0, 0.0, RavitoType::Bouffe),
        ],
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_estimate_adds_half_hour_per_600m() {
    let refuge = &race().aid_stations[0];
    assert!((estimated_hours(refuge, DEFAULT_PACE_KMH) - 2.5).abs() < 1e-9);
}

#[test]
fn test_passage_times_from_departure() {
    let passages = passage_times(&race(), &RunnerConfig::new(departure())).unwrap();

    let arrivals: Vec<_> = passages
        .iter()
        .map(|p| p.arrival.format("%H:%M").to_string())
        .collect();
    assert_eq!(arrivals, ["08:30", "11:00", "11:00"]);
    assert_eq!(passages[1].time_from_start_minutes, 300);
}

#[test]
fn test_pace_override() {
    let mut config = RunnerConfig::new(departure());
    config.pace_override = Some(10.0);
    let passages = passage_times(&race(), &config).unwrap();
    assert_eq!(passages[0].time_from_start_minutes, 90);

    config.pace_override = Some(0.0);
    assert!((config.pace_kmh() - DEFAULT_PACE_KMH).abs() < f64::EPSILON);
}

#[test]
fn test_pace_outside_bounds_uses_default() {
    let mut config = RunnerConfig::new(departure());
    for pace in [1e-9, 0.5, 61.0, f64::NAN, f64::INFINITY] {
        config.pace_override = Some(pace);
        assert!((config.pace_kmh() - DEFAULT_PACE_KMH).abs() < f64::EPSILON);
    }

    config.pace_override = Some(1e-9);
    let mut race = race();
    race.aid_stations.truncate(1);
    race.aid_stations[0].distance_km = 100.0;
    let passages = passage_times(&race, &config).unwrap();
    assert_eq!(passages[0].time_from_start_minutes, 100 * 60 / 5 + 30);
}

#[test]
fn test_passage_time_out_of_range_is_an_error() {
    let config = RunnerConfig::new(departure());
    let mut race = race();
    race.aid_stations[2].distance_km = 1e15;

    let error = passage_times(&race, &config).unwrap_err();
    assert_eq!(error.error_code(), "Precondition");
    assert!(error.to_string().contains("Col"));
}

#[test]
fn test_runner_roadbook() {
    let race = race();
    let mut config = RunnerConfig::new(departure());
    config.flask_capacities.insert(1, 3);
    config.notes.insert("s-1".to_string(), "Refill both".to_string());
    config.notes.insert("2".to_string(), "Jacket".to_string());

    let passages = passage_times(&race, &config).unwrap();
    let sun = SunTimes {
        sunrise: "06:42".to_string(),
        sunset: "20:31".to_string(),
        ..SunTimes::default()
    };
    let text = render(&race, &config, &passages, Some(&sun), ExportMode::Runner);

    assert!(text.starts_with("Grand Raid - Roadbook Runner\n"));
    assert!(text.contains("Departure: 28/08/2026 06:00"));
    assert!(text.contains("Pace: 5.0 km/h"));
    assert!(text.contains("Sunrise: 06:42   Sunset: 20:31"));
    assert!(text.contains("Refill both"));
    assert!(text.contains("Jacket"));
    assert!(text.contains("flasks 3"));
    assert!(text.contains("Estimated duration: 5h00"));
    assert!(text.contains("with GPXIFY"));
}

#[test]
fn test_assistance_roadbook_lists_crew_stations_only() {
    let race = race();
    let mut config = RunnerConfig::new(departure());
    config.notes.insert("s-1".to_string(), "Refill both".to_string());

    let passages = passage_times(&race, &config).unwrap();
    let text = render(&race, &config, &passages, None, ExportMode::Assistance);

    assert!(text.starts_with("Grand Raid - Roadbook Crew\n"));
    assert!(text.contains("Village"));
    assert!(!text.contains("Refuge"));
    assert!(!text.contains("flasks"));
    assert!(!text.contains("Refill both"));
    assert!(!text.contains("Pace:"));
}
