//! GPX endpoints
//!
//! Upload, segment export, climb detection, aid-station tables, merging and
//! race recovery. All track computation happens on the backend.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::{
    AidStationTableRequest, AidStationTableResponse, ClimbSegment, ConnectionInfo,
    ExportSegmentRequest, MergeRequest, MergeResponse, UploadResponse,
};
use crate::validation::{FileSource, LocalFile};

/// A file sent as a multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a local file fully
    pub fn from_local(file: &LocalFile) -> std::io::Result<Self> {
        Ok(Self::new(file.name(), file.read_all()?))
    }

    fn into_part(self) -> Result<Part, ApiError> {
        Part::bytes(self.bytes)
            .file_name(self.name)
            .mime_str("application/gpx+xml")
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))
    }
}

/// Inputs of a race recovery
#[derive(Debug, Clone)]
pub struct RaceRecoveryUpload {
    /// Recording that stopped early
    pub incomplete: UploadFile,
    /// Full course
    pub complete: UploadFile,
    /// `HH:MM:SS` or `MM:SS`
    pub official_time: String,
    pub approx_distance_km: Option<f64>,
}

impl ApiClient {
    /// `POST /gpx/upload`
    pub async fn upload_gpx(&self, file: UploadFile) -> Result<UploadResponse, ApiError> {
        let form = Form::new().part("file", file.into_part()?);
        let request = self.request(Method::POST, &["gpx", "upload"])?.multipart(form);
        self.send_json(request).await
    }

    /// `GET /gpx/test`
    pub async fn test_connection(&self) -> Result<ConnectionInfo, ApiError> {
        self.get_json(&["gpx", "test"]).await
    }

    /// `POST /gpx/export-segment`, returns GPX bytes
    pub async fn export_segment(&self, request: &ExportSegmentRequest) -> Result<Vec<u8>, ApiError> {
        let request = self
            .request(Method::POST, &["gpx", "export-segment"])?
            .json(request);
        self.send_bytes(request).await
    }

    /// `POST /gpx/detect-climbs`
    pub async fn detect_climbs(&self, request: &ExportSegmentRequest) -> Result<Vec<ClimbSegment>, ApiError> {
        self.post_json(&["gpx", "detect-climbs"], request).await
    }

    /// `POST /gpx/aid-station-table`
    pub async fn generate_aid_station_table(
        &self,
        request: &AidStationTableRequest,
    ) -> Result<AidStationTableResponse, ApiError> {
        let response: AidStationTableResponse =
            self.post_json(&["gpx", "aid-station-table"], request).await?;

        if response.success {
            Ok(response)
        } else {
            Err(ApiError::Rejected(response.message.unwrap_or_else(|| {
                "Aid station table generation failed".to_string()
            })))
        }
    }

    /// `POST /gpx/merge`
    pub async fn merge_files(&self, request: &MergeRequest) -> Result<MergeResponse, ApiError> {
        let response: MergeResponse = self.post_json(&["gpx", "merge"], request).await?;

        if response.success {
            Ok(response)
        } else {
            Err(ApiError::Rejected(if response.message.is_empty() {
                "Merge failed".to_string()
            } else {
                response.message
            }))
        }
    }

    /// `POST /race/recover`, returns the reconstructed GPX
    pub async fn recover_race(&self, upload: RaceRecoveryUpload) -> Result<Vec<u8>, ApiError> {
        let mut form = Form::new()
            .part("incomplete_gpx", upload.incomplete.into_part()?)
            .part("complete_gpx", upload.complete.into_part()?)
            .text("official_time", upload.official_time);

        if let Some(km) = upload.approx_distance_km {
            form = form.text("approx_distance_km", km.to_string());
        }

        let request = self.request(Method::POST, &["race", "recover"])?.multipart(form);
        self.send_bytes(request).await
    }
}
