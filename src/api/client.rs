//! Backend HTTP client
//!
//! Thin wrapper over `reqwest` that knows the backend base URL, applies the
//! request timeout and classifies every response.

use std::time::{Duration, Instant};

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::Instrument;
use url::Url;

use super::error::ApiError;
use crate::config::{Config, API_PREFIX};
use crate::logging::log_api_request;

/// Header carrying the admin session token
pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Client for the GPXIFY REST API
///
/// One request per call, awaited to completion. Nothing is retried.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ApiClient {
    /// Build a client from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let base_url = config
            .api_base_url()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        Self::new(base_url, config.request_timeout_duration())
    }

    /// Build a client for `base_url` (without the `/api/v1` prefix)
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ApiError> {
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidRequest(format!(
                "'{base_url}' cannot be used as a base URL"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("gpxify/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of an endpoint, e.g. `["share", id]` -> `{base}/api/v1/share/{id}`
    ///
    /// Segments are percent-encoded, so slugs and ids cannot escape the path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| ApiError::InvalidRequest(self.base_url.to_string()))?;
            path.pop_if_empty()
                .extend(API_PREFIX.split('/').filter(|s| !s.is_empty()))
                .extend(segments);
        }
        Ok(url)
    }

    /// Start a request against an endpoint
    pub(crate) fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(segments)?;
        Ok(self.http.request(method, url))
    }

    /// Send a request and turn non-success statuses into errors
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let request = request
            .build()
            .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
        let method = request.method().to_string();
        let path = request.url().path().to_string();

        let span = crate::api_span!(method, path);
        let started = Instant::now();

        async {
            let result = self.http.execute(request).await;
            let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

            match result {
                Err(e) => {
                    log_api_request(&method, &path, None, elapsed);
                    Err(ApiError::network(&e))
                }
                Ok(response) => {
                    let status = response.status();
                    tracing::Span::current().record("status_code", status.as_u16());
                    tracing::Span::current().record("duration_ms", elapsed);
                    log_api_request(&method, &path, Some(status.as_u16()), elapsed);

                    if status.is_success() {
                        Ok(response)
                    } else {
                        let body = response.text().await.unwrap_or_default();
                        Err(ApiError::from_status(status, &body))
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Send and decode a JSON body
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(|e| ApiError::network(&e))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send and return the raw body (GPX downloads)
    pub(crate) async fn send_bytes(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(|e| ApiError::network(&e))?;
        Ok(bytes.to_vec())
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        self.send_json(self.request(Method::GET, segments)?).await
    }

    pub(crate) async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(Method::POST, segments)?.json(body)).await
    }
}
