//! Merge Model
//!
//! Request and response shapes for merging several GPX files into one track.

use serde::{Deserialize, Serialize};

use super::track::GpxData;

/// Merge settings sent to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeOptions {
    /// Time gap, in seconds, above which two points are considered a break
    pub gap_threshold_seconds: u32,

    /// Join breaks with a straight line instead of starting a new segment
    pub interpolate_gaps: bool,

    /// Order files by timestamp instead of the manual order
    pub sort_by_time: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            gap_threshold_seconds: 300,
            interpolate_gaps: true,
            sort_by_time: false,
        }
    }
}

/// Raw content of one file to merge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpxFileContent {
    pub filename: String,
    pub content: String,
}

/// Body of `POST /gpx/merge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub files: Vec<GpxFileContent>,
    pub options: MergeOptions,
    pub merged_track_name: String,
}

/// Response of `POST /gpx/merge`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub merged_gpx: String,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<GpxData>,
}

/// Download name for a merged track: whitespace runs become underscores
pub fn merged_filename(track_name: &str) -> String {
    let joined = track_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{joined}.gpx")
}
