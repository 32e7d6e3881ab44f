//! Form validation tests

use gpxify::models::{AidStation, PacingMode};
use gpxify::validation::forms::{
    parse_distance_km, validate_aid_station, validate_contact_form, validate_custom_pace, validate_merge,
    validate_official_time, validate_race_recovery, validate_segment, validate_slug,
    validate_table_config,
};
use gpxify::validation::{ClimbFilter, InMemoryFile};

use crate::test_utils::FULL_GPX;

#[test]
fn test_aid_station_name_is_trimmed() {
    let station = validate_aid_station("  Refuge  ", 12.5).unwrap();
    assert_eq!(station, AidStation::new("Refuge", 12.5));
}

#[test]
fn test_aid_station_bounds() {
    assert!(validate_aid_station("Start", 0.0).is_ok());
    assert!(validate_aid_station("Far", 1000.0).is_ok());

    let errors = validate_aid_station("", -1.0).unwrap_err();
    assert_eq!(errors.field("name"), Some("Name is required"));
    assert_eq!(errors.field("distance_km"), Some("Distance cannot be negative"));

    let errors = validate_aid_station(&"x".repeat(101), 1000.1).unwrap_err();
    assert!(errors.field("name").unwrap().contains("100"));
    assert!(errors.field("distance_km").unwrap().contains("1000"));
}

#[test]
fn test_distance_accepts_decimal_comma() {
    assert_eq!(parse_distance_km("12,5").unwrap(), 12.5);
    assert_eq!(parse_distance_km(" 7 ").unwrap(), 7.0);
    assert!(parse_distance_km("twelve").is_err());
}

#[test]
fn test_custom_pace() {
    assert_eq!(validate_custom_pace("8.5").unwrap(), 8.5);
    assert!(validate_custom_pace("1").is_ok());
    assert!(validate_custom_pace("60").is_ok());
    assert_eq!(
        validate_custom_pace("0.5").unwrap_err().first(),
        Some("Pace must be at least 1")
    );
    assert_eq!(
        validate_custom_pace("61").unwrap_err().first(),
        Some("Pace cannot exceed 60")
    );
    assert_eq!(
        validate_custom_pace("fast").unwrap_err().first(),
        Some("Pace must be a number")
    );
}

#[test]
fn test_table_config_ignores_pace_with_naismith() {
    let stations = vec![AidStation::new("Start", 0.0), AidStation::new("Finish", 10.0)];

    assert_eq!(
        validate_table_config(true, "not a pace", &stations).unwrap(),
        PacingMode::Naismith
    );
    assert_eq!(
        validate_table_config(false, "6", &stations).unwrap(),
        PacingMode::CustomPace(6.0)
    );
    assert!(validate_table_config(false, "not a pace", &stations).is_err());
}

#[test]
fn test_table_config_station_count() {
    let errors = validate_table_config(true, "", &[]).unwrap_err();
    assert!(errors.field("aid_stations").is_some());

    let many: Vec<_> = (0..51).map(|i| AidStation::new(format!("S{i}"), f64::from(i))).collect();
    let errors = validate_table_config(true, "", &many).unwrap_err();
    assert_eq!(errors.field("aid_stations"), Some("Maximum 50 aid stations"));
}

#[test]
fn test_official_time_formats() {
    for valid in ["12:34:56", "1:00:00", "45:30", "5:09"] {
        assert!(validate_official_time(valid).is_ok(), "{valid}");
    }
    for invalid in ["12:60:00", "123:00:00", "1h30", "", "45:3"] {
        assert!(validate_official_time(invalid).is_err(), "{invalid}");
    }
}

#[test]
fn test_race_recovery_reports_every_field() {
    let empty = InMemoryFile::new("official.gpx", Vec::new());
    let wrong = InMemoryFile::new("stopped.fit", FULL_GPX);

    let errors = validate_race_recovery(&empty, &wrong, "soon").unwrap_err();

    assert_eq!(errors.errors.len(), 3);
    assert_eq!(
        errors.field("official_gpx"),
        Some("The official GPX file is required")
    );
    assert_eq!(errors.field("incomplete_gpx"), Some("File must be in .gpx format"));
    assert!(errors.field("official_time").is_some());
}

#[test]
fn test_merge_form() {
    assert_eq!(validate_merge(2, "  Tour du lac  ").unwrap(), "Tour du lac");
    assert!(validate_merge(1, "Tour").is_err());
    assert!(validate_merge(11, "Tour").is_err());
    assert!(validate_merge(3, "Tour/../etc").is_err());
    assert!(validate_merge(3, "   ").is_err());
}

#[test]
fn test_segment_range() {
    assert!(validate_segment(0.0, 5.0).is_ok());
    assert!(validate_segment(5.0, 5.0).is_err());
    assert!(validate_segment(-1.0, 5.0).is_err());
}

#[test]
fn test_segment_range_rejects_non_finite() {
    let errors = validate_segment(f64::NAN, f64::NAN).unwrap_err();
    assert_eq!(errors.field("start_km"), Some("Start kilometre must be a number"));
    assert_eq!(errors.field("end_km"), Some("End kilometre must be a number"));

    assert!(validate_segment(0.0, f64::INFINITY).is_err());
    assert!(validate_segment(f64::NEG_INFINITY, 5.0).is_err());
}

#[test]
fn test_slug() {
    assert!(validate_slug("utmb-2026").is_ok());
    assert!(validate_slug("UTMB").is_err());
    assert!(validate_slug("a b").is_err());
}

#[test]
fn test_climb_filter_defaults_are_valid() {
    assert!(ClimbFilter::default().validate().is_ok());
}

#[test]
fn test_climb_filter_rejects_non_finite() {
    let filter = ClimbFilter {
        min_distance_km: f64::NAN,
        min_gradient: f64::INFINITY,
        ..ClimbFilter::default()
    };
    let errors = filter.validate().unwrap_err();
    assert!(errors.field("min_distance_km").is_some());
    assert!(errors.field("min_gradient").is_some());
    assert!(errors.field("min_elevation_gain").is_none());
}

#[test]
fn test_contact_form_trims_fields() {
    let request = validate_contact_form("  Ana  ", " ana@example.com ", "  Great tool, thanks!  ").unwrap();
    assert_eq!(request.name, "Ana");
    assert_eq!(request.email, "ana@example.com");
    assert_eq!(request.message, "Great tool, thanks!");
}

#[test]
fn test_contact_form_bounds() {
    let errors = validate_contact_form(" A ", "not-an-email", "   short   ").unwrap_err();
    assert_eq!(errors.field("name"), Some("Name must be at least 2 characters"));
    assert_eq!(errors.field("email"), Some("Invalid email address"));
    assert_eq!(errors.field("message"), Some("Message must be at least 10 characters"));

    let long_name = "n".repeat(101);
    let long_email = format!("{}@example.com", "a".repeat(250));
    let long_message = "m".repeat(2001);
    let errors = validate_contact_form(&long_name, &long_email, &long_message).unwrap_err();
    assert_eq!(errors.field("name"), Some("Name is too long (max 100 characters)"));
    assert_eq!(errors.field("email"), Some("Email is too long"));
    assert_eq!(errors.field("message"), Some("Message is too long (max 2000 characters)"));

    assert!(validate_contact_form("Jo", "jo@example.com", &"m".repeat(2000)).is_ok());
}
