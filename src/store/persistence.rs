//! State persistence
//!
//! The persisted state lives in one JSON document under the `gpxify-storage`
//! key, in the same `{ state, version }` envelope the web front end writes to
//! local storage. The admin token is kept in a separate file so that sharing
//! the state never leaks it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::AppState;
use super::StoreError;
use crate::logging::log_state_persisted;

/// Key of the persisted document
pub const STORAGE_KEY: &str = "gpxify-storage";

/// Version of the persisted layout
pub const STORAGE_VERSION: u32 = 0;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: AppState,
    #[serde(default)]
    version: u32,
}

/// JSON file holding the persisted client state
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the state; a missing file or key yields the default state
    pub fn load(&self) -> Result<AppState, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppState::default()),
            Err(e) => return Err(e.into()),
        };

        let mut document: Value = serde_json::from_str(&raw).map_err(|e| self.corrupt(&e))?;

        match document.get_mut(STORAGE_KEY).map(Value::take) {
            Some(entry) => {
                let envelope: Envelope = serde_json::from_value(entry).map_err(|e| self.corrupt(&e))?;
                if envelope.version > STORAGE_VERSION {
                    crate::logging::log_warning(
                        &format!("state written by a newer version ({})", envelope.version),
                        "state load",
                    );
                }
                Ok(envelope.state)
            }
            None => Ok(AppState::default()),
        }
    }

    /// Write the state, replacing the file atomically
    pub fn save(&self, state: &AppState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let document = serde_json::json!({
            STORAGE_KEY: {
                "state": snapshot(state)?,
                "version": STORAGE_VERSION,
            }
        });
        let content = serde_json::to_string_pretty(&document).map_err(|e| self.corrupt(&e))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        log_state_persisted(&self.path, state.files.len(), state.aid_stations.len());
        Ok(())
    }

    /// Load, apply `action`, save; returns what the action returned
    pub fn update<T, F>(&self, action: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut AppState) -> Result<T, StoreError>,
    {
        let mut state = self.load()?;
        let result = action(&mut state)?;
        self.save(&state)?;
        Ok(result)
    }

    fn corrupt(&self, error: &serde_json::Error) -> StoreError {
        StoreError::Corrupt {
            path: self.path.clone(),
            message: error.to_string(),
        }
    }
}

/// Persisted subset of the state as a JSON value, as sent to share links
pub fn snapshot(state: &AppState) -> Result<Value, StoreError> {
    serde_json::to_value(state).map_err(|e| StoreError::Corrupt {
        path: PathBuf::from(STORAGE_KEY),
        message: e.to_string(),
    })
}

/// Rebuild a state from a shared snapshot
pub fn restore(snapshot: Value) -> Result<AppState, StoreError> {
    serde_json::from_value(snapshot).map_err(|e| StoreError::Corrupt {
        path: PathBuf::from(STORAGE_KEY),
        message: e.to_string(),
    })
}

/// File holding the admin session token
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(token) => Ok(Some(token.trim().to_string()).filter(|t| !t.is_empty())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}
