//! Display formatters
//!
//! Distances, elevations, durations and CSV cells as shown in tables and
//! exports.

/// `12.35 km`
pub fn format_distance(km: f64) -> String {
    format!("{km:.2} km")
}

/// `1234 m`
pub fn format_elevation(meters: f64) -> String {
    format!("{meters:.0} m")
}

/// `5.2%`
pub fn format_gradient(percent: f64) -> String {
    format!("{percent:.1}%")
}

/// Whole minutes, rounded, never negative
fn whole_minutes(minutes: f64) -> u64 {
    if minutes.is_finite() && minutes > 0.0 {
        // Saturating float-to-int conversion
        minutes.round() as u64
    } else {
        0
    }
}

/// Long form: `2h 5min`, or `45min` under an hour
pub fn format_duration(minutes: f64) -> String {
    let total = whole_minutes(minutes);
    let (hours, mins) = (total / 60, total % 60);

    if hours > 0 {
        format!("{hours}h {mins}min")
    } else {
        format!("{mins}min")
    }
}

fn compact(total_minutes: u64) -> String {
    format!("{}h{:02}", total_minutes / 60, total_minutes % 60)
}

/// Compact form used in tables: `2h05`, `0h45`, or `-` when there is no estimate
pub fn format_minutes(minutes: Option<f64>) -> String {
    match minutes {
        Some(value) if value > 0.0 => compact(whole_minutes(value)),
        _ => "-".to_string(),
    }
}

/// Compact form of a duration from the start, zero included: `0h00`, `3h30`
pub fn format_elapsed(minutes: i64) -> String {
    compact(u64::try_from(minutes).unwrap_or(0))
}

/// Quote a CSV cell when it contains a separator, a quote or a line break
pub fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
