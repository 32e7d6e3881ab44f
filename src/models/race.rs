//! Race Model
//!
//! Race metadata managed from the admin panel and read by the roadbook:
//! published races, their aid stations ("ravitos") and sun times.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// What an aid station offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RavitoType {
    /// Water only
    Eau,
    /// Solid food
    Bouffe,
    /// Crew access
    Assistance,
}

impl Default for RavitoType {
    fn default() -> Self {
        RavitoType::Eau
    }
}

impl RavitoType {
    /// Get display name for this station type
    pub fn display_name(&self) -> &'static str {
        match self {
            RavitoType::Eau => "Water",
            RavitoType::Bouffe => "Food",
            RavitoType::Assistance => "Crew",
        }
    }
}

/// Aid station attached to a race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceAidStation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub distance_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(rename = "type", default)]
    pub station_type: RavitoType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_time: Option<String>,
    pub position_order: u32,
}

impl RaceAidStation {
    /// Key of the runner's note for this station: its id, or its list index
    pub fn note_key(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| index.to_string())
    }
}

/// Full race, as returned by `GET /races/{slug}` and the admin endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub gpx_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elevation_loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_location_lon: Option<f64>,
    pub is_published: bool,
    #[serde(default)]
    pub aid_stations: Vec<RaceAidStation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Race {
    /// Start coordinates when both are known
    pub fn start_location(&self) -> Option<(f64, f64)> {
        Some((self.start_location_lat?, self.start_location_lon?))
    }
}

/// Race list entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSummary {
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance_km: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elevation_gain: Option<f64>,
    pub is_published: bool,
}

/// Body of `POST /admin/races`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceCreate {
    pub name: String,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub gpx_content: String,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub aid_stations: Vec<RaceAidStation>,
}

/// Body of `PUT /admin/races/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RaceUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpx_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_published: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aid_stations: Option<Vec<RaceAidStation>>,
}

/// Body of `POST /admin/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

/// Response of `POST /admin/login`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Aid station extracted from free text by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRavito {
    pub name: String,
    pub distance_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub station_type: Option<RavitoType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutoff_time: Option<String>,
}

impl ParsedRavito {
    /// Convert into a race aid station at `position_order` (1-based)
    pub fn into_race_aid_station(self, position_order: u32) -> RaceAidStation {
        RaceAidStation {
            id: None,
            name: self.name,
            distance_km: self.distance_km,
            elevation: self.elevation,
            station_type: self.station_type.unwrap_or_default(),
            services: self.services,
            cutoff_time: self.cutoff_time,
            position_order,
        }
    }
}

/// Structured result of parsing a free-text aid station table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedRavitoTable {
    pub ravitos: Vec<ParsedRavito>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_distance: Option<f64>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl ParsedRavitoTable {
    /// Race aid stations numbered in parse order
    pub fn into_race_aid_stations(self) -> Vec<RaceAidStation> {
        self.ravitos
            .into_iter()
            .zip(1u32..)
            .map(|(ravito, position)| ravito.into_race_aid_station(position))
            .collect()
    }
}

/// Body of `POST /admin/parse-ravito-table`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseRavitoTableRequest {
    pub raw_text: String,
}

/// Response of `POST /admin/parse-ravito-table`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseRavitoTableResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ParsedRavitoTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sunrise and sunset for a race start
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimes {
    pub sunrise: String,
    pub sunset: String,
    #[serde(default)]
    pub solar_noon: String,
    #[serde(default)]
    pub day_length: String,
    #[serde(default)]
    pub civil_twilight_begin: String,
    #[serde(default)]
    pub civil_twilight_end: String,
}

/// Body of `POST /ptp/sun-times`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SunTimesRequest {
    pub lat: f64,
    pub lon: f64,
    /// `YYYY-MM-DD`
    pub date: String,
}

/// Response of `POST /ptp/sun-times`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SunTimesResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SunTimes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
