//! Public race endpoints used by the roadbook

use super::client::ApiClient;
use super::error::ApiError;
use crate::models::{Race, RaceSummary, SunTimes, SunTimesRequest, SunTimesResponse};

impl ApiClient {
    /// `GET /races`
    pub async fn published_races(&self) -> Result<Vec<RaceSummary>, ApiError> {
        self.get_json(&["races"]).await
    }

    /// `GET /races/{slug}`
    pub async fn race_by_slug(&self, slug: &str) -> Result<Race, ApiError> {
        self.get_json(&["races", slug]).await
    }

    /// `POST /ptp/sun-times`
    pub async fn sun_times(&self, request: &SunTimesRequest) -> Result<SunTimes, ApiError> {
        let response: SunTimesResponse = self.post_json(&["ptp", "sun-times"], request).await?;

        match response.data {
            Some(times) if response.success => Ok(times),
            _ => Err(ApiError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "Sun times unavailable".to_string()),
            )),
        }
    }
}
