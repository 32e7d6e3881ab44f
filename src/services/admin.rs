//! Admin Service
//!
//! Session handling for the admin panel and assembly of race bodies from a
//! GPX file and a parsed aid-station table.

use std::path::Path;

use crate::api::{AdminClient, ApiClient};
use crate::error::{AppError, AppResult};
use crate::models::{RaceAidStation, RaceCreate};
use crate::store::TokenStore;
use crate::validation::forms::validate_slug;
use crate::validation::{format_validation_error, validate_gpx_file, FormErrors, LocalFile};

/// Admin client using the stored token, or the configured one when none is stored
pub fn session(api: ApiClient, tokens: &TokenStore, configured: Option<String>) -> AppResult<AdminClient> {
    let token = tokens.load()?.or(configured);
    Ok(AdminClient::new(api, token))
}

/// Log in and remember the token
pub async fn login(admin: &mut AdminClient, tokens: &TokenStore, password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(FormErrors::single("password", "Password is required").into());
    }
    let token = admin.login(password).await?;
    tokens.save(&token)?;
    tracing::info!("Admin session opened");
    Ok(())
}

/// Log out; the stored token is dropped even if the backend call fails
pub async fn logout(admin: &mut AdminClient, tokens: &TokenStore) -> AppResult<()> {
    let result = admin.logout().await;
    tokens.clear()?;
    result?;
    Ok(())
}

/// Inputs of a new race
#[derive(Debug, Clone)]
pub struct RaceDraft<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub description: Option<&'a str>,
    pub gpx_path: &'a Path,
    pub is_published: bool,
    pub aid_stations: Vec<RaceAidStation>,
}

/// Validate a draft and read its GPX into a creation body
pub fn build_race(draft: RaceDraft<'_>) -> AppResult<RaceCreate> {
    let mut errors = FormErrors::new();
    let name = draft.name.trim();

    if name.is_empty() {
        errors.add("name", "Name is required");
    }
    if draft.slug.is_empty() {
        errors.add("slug", "Slug is required");
    } else if let Err(e) = validate_slug(draft.slug) {
        errors.errors.extend(e.errors);
    }
    if !errors.is_empty() {
        return Err(errors.into());
    }

    let file = LocalFile::open(draft.gpx_path)?;
    let validation = validate_gpx_file(&file);
    if !validation.valid {
        return Err(AppError::InvalidFile(format_validation_error(&validation)));
    }
    let gpx_content = String::from_utf8_lossy(&file.read_all()?).into_owned();

    Ok(RaceCreate {
        name: name.to_string(),
        slug: draft.slug.to_string(),
        description: draft
            .description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string),
        gpx_content,
        is_published: draft.is_published,
        aid_stations: draft.aid_stations,
    })
}
