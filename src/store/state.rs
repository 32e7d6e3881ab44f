//! Client state
//!
//! Loaded files, the current selection, the aid stations being planned and the
//! last generated table. Every mutation goes through an action method so the
//! selection can never point at a file that is gone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use super::StoreError;
use crate::models::{AidStation, AidStationTableResponse, GpxData, Track};

/// Dashboard tab
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Tab {
    #[default]
    Analyze,
    Merge,
    AidStations,
    RaceRecovery,
}

/// A file uploaded to and parsed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpxFileData {
    pub id: String,
    pub name: String,
    pub data: GpxData,
    pub uploaded_at: DateTime<Utc>,
}

impl GpxFileData {
    /// Wrap a backend parse result, keeping the backend id when it sent one
    pub fn new(file_id: Option<String>, name: impl Into<String>, data: GpxData) -> Self {
        Self {
            id: file_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: name.into(),
            data,
            uploaded_at: Utc::now(),
        }
    }

    pub fn first_track(&self) -> Option<&Track> {
        self.data.tracks.first()
    }
}

/// Whole client state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub files: Vec<GpxFileData>,
    #[serde(default)]
    pub selected_file_id: Option<String>,
    #[serde(default)]
    pub aid_stations: Vec<AidStation>,
    #[serde(default)]
    pub aid_station_table: Option<AidStationTableResponse>,
    /// Not persisted, every run starts on the default tab
    #[serde(skip)]
    pub active_tab: Tab,
}

impl AppState {
    /// Append a file and select it
    pub fn add_file(&mut self, file: GpxFileData) {
        self.selected_file_id = Some(file.id.clone());
        self.files.push(file);
    }

    /// Remove a file; a removed selection moves to the first remaining file
    pub fn remove_file(&mut self, id: &str) -> Option<GpxFileData> {
        let index = self.files.iter().position(|f| f.id == id)?;
        let removed = self.files.remove(index);

        if self.selected_file_id.as_deref() == Some(id) {
            self.selected_file_id = self.files.first().map(|f| f.id.clone());
        }

        Some(removed)
    }

    /// Select a loaded file
    pub fn select_file(&mut self, id: &str) -> Result<(), StoreError> {
        if !self.files.iter().any(|f| f.id == id) {
            return Err(StoreError::UnknownFile(id.to_string()));
        }
        self.selected_file_id = Some(id.to_string());
        Ok(())
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
        self.selected_file_id = None;
    }

    pub fn set_aid_stations(&mut self, stations: Vec<AidStation>) {
        self.aid_stations = stations;
    }

    pub fn add_aid_station(&mut self, station: AidStation) {
        self.aid_stations.push(station);
    }

    pub fn remove_aid_station(&mut self, index: usize) -> Result<AidStation, StoreError> {
        self.check_station_index(index)?;
        Ok(self.aid_stations.remove(index))
    }

    pub fn update_aid_station(&mut self, index: usize, station: AidStation) -> Result<(), StoreError> {
        self.check_station_index(index)?;
        self.aid_stations[index] = station;
        Ok(())
    }

    pub fn clear_aid_stations(&mut self) {
        self.aid_stations.clear();
        self.aid_station_table = None;
    }

    pub fn set_aid_station_table(&mut self, table: Option<AidStationTableResponse>) {
        self.aid_station_table = table;
    }

    pub fn set_active_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    pub fn selected_file(&self) -> Option<&GpxFileData> {
        let id = self.selected_file_id.as_deref()?;
        self.files.iter().find(|f| f.id == id)
    }

    /// First track of the selected file
    pub fn selected_track(&self) -> Option<&Track> {
        self.selected_file()?.first_track()
    }

    /// Find a file by id or, failing that, by name
    pub fn find_file(&self, key: &str) -> Option<&GpxFileData> {
        self.files
            .iter()
            .find(|f| f.id == key)
            .or_else(|| self.files.iter().find(|f| f.name == key))
    }

    fn check_station_index(&self, index: usize) -> Result<(), StoreError> {
        if index < self.aid_stations.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.aid_stations.len(),
            })
        }
    }
}
