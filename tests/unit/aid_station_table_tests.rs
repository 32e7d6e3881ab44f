//! Aid station table export tests

use gpxify::services::aid_station::{require_table_inputs, segment_tracks, table_to_csv};
use gpxify::store::AppState;
use gpxify::models::AidStation;

use crate::test_utils::{sample_file, sample_table, sample_track, segment};

#[test]
fn test_csv_layout() {
    let csv = table_to_csv(&sample_table());
    let body = csv.strip_prefix('\u{FEFF}').expect("BOM first");
    let lines: Vec<_> = body.split('\n').collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(
        lines[0],
        "From,To,Distance (km),D+ (m),D- (m),Avg gradient (%),Estimated time,Cumulative time"
    );
    assert_eq!(lines[1], "Start,Refuge,4.00,200,0,5.0,1h05,1h05");
    assert_eq!(lines[2], "Refuge,Finish,6.00,300,0,5.0,1h40,2h45");
    assert_eq!(lines[3], "");
    assert_eq!(lines[4], "Total,10.00 km,500 m,0 m,,2h45,");
}

#[test]
fn test_csv_escapes_station_names() {
    let mut table = sample_table();
    table.segments[0].to_station = "Refuge \"Le Lac\", bas".to_string();

    let csv = table_to_csv(&table);
    assert!(csv.contains(r#"Start,"Refuge ""Le Lac"", bas",4.00"#));
}

#[test]
fn test_csv_without_estimates() {
    let mut table = sample_table();
    table.segments = vec![segment("Start", "Finish", 0.0, 10.0, None)];
    table.total_time_minutes = None;

    let csv = table_to_csv(&table);
    assert!(csv.contains("Start,Finish,10.00,500,0,5.0,-,-"));
    assert!(csv.ends_with("Total,10.00 km,500 m,0 m,,-,"));
}

#[test]
fn test_segment_tracks_cut_the_track() {
    let segments = segment_tracks(&sample_track(), &sample_table());

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].display_name(), "Start → Refuge");
    assert_eq!(segments[0].points.len(), 5);
    assert_eq!(segments[1].points.len(), 7);
    assert!((segments[1].total_distance_km() - 6.0).abs() < 1e-9);
}

#[test]
fn test_table_needs_a_track_and_two_stations() {
    let mut state = AppState::default();
    assert!(require_table_inputs(&state).is_err());

    state.add_file(sample_file("a", "a.gpx"));
    state.add_aid_station(AidStation::new("Start", 0.0));
    assert!(require_table_inputs(&state).is_err());

    state.add_aid_station(AidStation::new("Finish", 10.0));
    assert_eq!(require_table_inputs(&state).unwrap().points.len(), 11);
}
