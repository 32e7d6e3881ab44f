//! GPX file validation tests

use std::io::Write;

use gpxify::validation::gpx_file::{MAX_FILE_SIZE, STRUCTURE_PREFIX_BYTES};
use gpxify::validation::{format_validation_error, validate_gpx_file, InMemoryFile, LocalFile};

use crate::test_utils::{FULL_GPX, WAYPOINT_ONLY_GPX};

#[test]
fn test_full_gpx_is_valid_without_warnings() {
    let file = InMemoryFile::new("course.gpx", FULL_GPX).with_content_type("application/gpx+xml");
    let result = validate_gpx_file(&file);

    assert!(result.valid);
    assert_eq!(result.error, None);
    assert_eq!(result.warnings, None);
}

#[test]
fn test_oversized_file_reports_its_size() {
    let size = 30 * 1024 * 1024;
    let file = InMemoryFile::new("big.gpx", vec![b' '; size]);
    let result = validate_gpx_file(&file);

    assert!(!result.valid);
    let error = result.error.unwrap();
    assert!(error.contains("30.0 MB"), "{error}");
    assert!(error.contains("25 MB"), "{error}");
}

#[test]
fn test_size_ceiling_is_inclusive() {
    let mut at_limit = FULL_GPX.as_bytes().to_vec();
    at_limit.resize(usize::try_from(MAX_FILE_SIZE).unwrap(), b' ');
    assert!(validate_gpx_file(&InMemoryFile::new("limit.gpx", at_limit.clone())).valid);

    at_limit.push(b' ');
    let result = validate_gpx_file(&InMemoryFile::new("limit.gpx", at_limit));
    assert!(!result.valid);
    assert!(result.error.unwrap().starts_with("File too large"));
}

#[test]
fn test_wrong_extension_is_named_in_error() {
    let result = validate_gpx_file(&InMemoryFile::new("track.txt", FULL_GPX));

    assert!(!result.valid);
    assert!(result.error.unwrap().contains("\".txt\""));
}

#[test]
fn test_extension_check_ignores_case() {
    assert!(validate_gpx_file(&InMemoryFile::new("TRACK.GPX", FULL_GPX)).valid);
}

#[test]
fn test_name_without_dot_fails_extension_check() {
    let result = validate_gpx_file(&InMemoryFile::new("track", FULL_GPX));

    assert!(!result.valid);
    assert!(result.error.unwrap().contains("\"\""));
}

#[test]
fn test_plain_text_is_not_xml() {
    let result = validate_gpx_file(&InMemoryFile::new("hello.gpx", "hello world"));

    assert!(!result.valid);
    assert!(result.error.unwrap().contains("XML"));
}

#[test]
fn test_zero_byte_file_fails_structure_check() {
    let result = validate_gpx_file(&InMemoryFile::new("empty.gpx", Vec::new()));

    assert!(!result.valid);
    assert!(result.error.unwrap().contains("XML"));
}

#[test]
fn test_xml_without_gpx_element() {
    let result = validate_gpx_file(&InMemoryFile::new("kml.gpx", "<?xml version=\"1.0\"?><kml></kml>"));

    assert!(!result.valid);
    assert!(result.error.unwrap().contains("<gpx>"));
}

#[test]
fn test_gpx_without_data() {
    let content = "<?xml version=\"1.0\"?><gpx version=\"1.1\"><metadata/></gpx>";
    let result = validate_gpx_file(&InMemoryFile::new("empty.gpx", content));

    assert!(!result.valid);
    assert!(result.error.unwrap().contains("track/route/waypoint"));
}

#[test]
fn test_waypoints_only_is_valid_with_warning() {
    let result = validate_gpx_file(&InMemoryFile::new("pois.gpx", WAYPOINT_ONLY_GPX));

    assert!(result.valid);
    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].contains("no track data"));
}

#[test]
fn test_unusual_mime_type_only_warns() {
    let file = InMemoryFile::new("course.gpx", FULL_GPX).with_content_type("image/png");
    let result = validate_gpx_file(&file);

    assert!(result.valid);
    assert!(result.warnings()[0].contains("image/png"));
}

#[test]
fn test_warnings_accumulate() {
    let file = InMemoryFile::new("pois.gpx", WAYPOINT_ONLY_GPX).with_content_type("text/plain");
    let result = validate_gpx_file(&file);

    assert!(result.valid);
    assert_eq!(result.warnings().len(), 2);
    assert_eq!(format_validation_error(&result).lines().count(), 2);
}

#[test]
fn test_markers_beyond_prefix_are_not_seen() {
    let mut content = String::from("<?xml version=\"1.0\"?>");
    content.push_str(&" ".repeat(STRUCTURE_PREFIX_BYTES));
    content.push_str("<gpx><trk></trk></gpx>");

    assert!(!validate_gpx_file(&InMemoryFile::new("padded.gpx", content)).valid);
}

#[test]
fn test_validation_is_idempotent() {
    let file = InMemoryFile::new("pois.gpx", WAYPOINT_ONLY_GPX).with_content_type("text/plain");
    assert_eq!(validate_gpx_file(&file), validate_gpx_file(&file));
}

#[test]
fn test_local_file_reads_from_disk() {
    let mut tmp = tempfile::Builder::new().suffix(".gpx").tempfile().unwrap();
    tmp.write_all(FULL_GPX.as_bytes()).unwrap();

    let file = LocalFile::open(tmp.path()).unwrap();
    let result = validate_gpx_file(&file);

    assert!(result.valid);
    assert_eq!(result.warnings, None);
}

#[test]
fn test_local_file_track_beyond_prefix() {
    let mut tmp = tempfile::Builder::new().suffix(".gpx").tempfile().unwrap();
    tmp.write_all(b"<?xml version=\"1.0\"?><gpx>").unwrap();
    tmp.write_all(&vec![b' '; 60 * 1024]).unwrap();
    tmp.write_all(b"<trk></trk></gpx>").unwrap();

    let result = validate_gpx_file(&LocalFile::open(tmp.path()).unwrap());

    assert!(!result.valid);
    assert!(format_validation_error(&result).contains("track"));
}
