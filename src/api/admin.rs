//! Admin endpoints
//!
//! Race CRUD behind a session token obtained from `POST /admin/login` and sent
//! back in the `X-Admin-Token` header.

use reqwest::{Method, RequestBuilder};

use super::client::{ApiClient, ADMIN_TOKEN_HEADER};
use super::error::ApiError;
use crate::models::{
    AdminLoginRequest, AdminLoginResponse, ParseRavitoTableRequest, ParseRavitoTableResponse,
    ParsedRavitoTable, Race, RaceCreate, RaceSummary, RaceUpdate,
};

/// Authenticated admin session
#[derive(Debug, Clone)]
pub struct AdminClient {
    api: ApiClient,
    token: Option<String>,
}

impl AdminClient {
    pub fn new(api: ApiClient, token: Option<String>) -> Self {
        Self { api, token }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    fn authorized(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let token = self.token.as_deref().ok_or(ApiError::MissingToken)?;
        Ok(self.api.request(method, segments)?.header(ADMIN_TOKEN_HEADER, token))
    }

    /// `POST /admin/login`, keeps the returned token
    pub async fn login(&mut self, password: &str) -> Result<String, ApiError> {
        let response: AdminLoginResponse = self
            .api
            .post_json(
                &["admin", "login"],
                &AdminLoginRequest {
                    password: password.to_string(),
                },
            )
            .await?;

        match response.token {
            Some(token) if response.success => {
                self.token = Some(token.clone());
                Ok(token)
            }
            _ => Err(ApiError::Rejected(
                response
                    .message
                    .unwrap_or_else(|| "Login failed".to_string()),
            )),
        }
    }

    /// `POST /admin/logout`, forgets the token even when the call fails
    pub async fn logout(&mut self) -> Result<(), ApiError> {
        let request = self.authorized(Method::POST, &["admin", "logout"])?;
        self.token = None;
        self.api.send(request).await.map(|_| ())
    }

    /// `GET /admin/races`, drafts included
    pub async fn list_races(&self) -> Result<Vec<RaceSummary>, ApiError> {
        self.api
            .send_json(self.authorized(Method::GET, &["admin", "races"])?)
            .await
    }

    /// `GET /admin/races/{id}`
    pub async fn get_race(&self, id: &str) -> Result<Race, ApiError> {
        self.api
            .send_json(self.authorized(Method::GET, &["admin", "races", id])?)
            .await
    }

    /// `POST /admin/races`
    pub async fn create_race(&self, race: &RaceCreate) -> Result<Race, ApiError> {
        let request = self.authorized(Method::POST, &["admin", "races"])?.json(race);
        self.api.send_json(request).await
    }

    /// `PUT /admin/races/{id}`
    pub async fn update_race(&self, id: &str, update: &RaceUpdate) -> Result<Race, ApiError> {
        let request = self
            .authorized(Method::PUT, &["admin", "races", id])?
            .json(update);
        self.api.send_json(request).await
    }

    /// `DELETE /admin/races/{id}`
    pub async fn delete_race(&self, id: &str) -> Result<(), ApiError> {
        let request = self.authorized(Method::DELETE, &["admin", "races", id])?;
        self.api.send(request).await.map(|_| ())
    }

    /// `POST /admin/parse-ravito-table`
    pub async fn parse_ravito_table(&self, raw_text: &str) -> Result<ParsedRavitoTable, ApiError> {
        let request = self
            .authorized(Method::POST, &["admin", "parse-ravito-table"])?
            .json(&ParseRavitoTableRequest {
                raw_text: raw_text.to_string(),
            });
        let response: ParseRavitoTableResponse = self.api.send_json(request).await?;

        match response.data {
            Some(table) if response.success => Ok(table),
            _ => Err(ApiError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "Could not parse the aid station table".to_string()),
            )),
        }
    }
}
