//! In-process mock of the GPXIFY backend
//!
//! Serves canned responses on an ephemeral port and records what it received.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use gpxify::api::{AdminClient, ApiClient};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use url::Url;

pub const ADMIN_PASSWORD: &str = "secret";
pub const ADMIN_TOKEN: &str = "tok-1";

/// Slug whose lookup answers only after `SLOW_RESPONSE`
pub const SLOW_RACE_SLUG: &str = "slow-race";
pub const SLOW_RESPONSE: Duration = Duration::from_secs(2);

/// What the mock received
#[derive(Debug, Default)]
pub struct Recorded {
    pub upload_body: Option<Vec<u8>>,
    pub saved_state: Option<Value>,
    pub merge_request: Option<Value>,
    pub table_request: Option<Value>,
    pub admin_tokens: Vec<Option<String>>,
    pub deleted_shares: Vec<String>,
    pub contact_messages: Vec<Value>,
}

type Shared = Arc<Mutex<Recorded>>;
type Reply = (StatusCode, Json<Value>);

pub struct MockBackend {
    pub url: Url,
    pub recorded: Shared,
}

impl MockBackend {
    pub async fn spawn() -> Self {
        let recorded = Shared::default();
        let app = router(recorded.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: Url::parse(&format!("http://{addr}")).unwrap(),
            recorded,
        }
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(self.url.clone(), Duration::from_secs(5)).unwrap()
    }

    /// A client that gives up after `timeout`
    pub fn client_with_timeout(&self, timeout: Duration) -> ApiClient {
        ApiClient::new(self.url.clone(), timeout).unwrap()
    }

    pub fn admin(&self, token: Option<&str>) -> AdminClient {
        AdminClient::new(self.client(), token.map(str::to_string))
    }

    pub fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap()
    }
}

/// A client pointed at a port nothing listens on
pub async fn unreachable_client() -> ApiClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    ApiClient::new(Url::parse(&format!("http://{addr}")).unwrap(), Duration::from_secs(5)).unwrap()
}

fn router(recorded: Shared) -> Router {
    Router::new()
        .route("/api/v1/gpx/test", get(connection_test))
        .route("/api/v1/gpx/upload", post(upload))
        .route("/api/v1/gpx/detect-climbs", post(detect_climbs))
        .route("/api/v1/gpx/aid-station-table", post(aid_station_table))
        .route("/api/v1/gpx/merge", post(merge))
        .route("/api/v1/share/save", post(save_share))
        .route("/api/v1/share/:id", get(get_share).delete(delete_share))
        .route("/api/v1/races/:slug", get(race_by_slug))
        .route("/api/v1/ptp/sun-times", post(sun_times))
        .route("/api/v1/admin/login", post(admin_login))
        .route("/api/v1/admin/races", get(admin_races))
        .route("/api/v1/contact/send", post(contact))
        .with_state(recorded)
}

pub fn track_points() -> Value {
    json!([
        { "lat": 45.900, "lon": 6.8, "elevation": 1000.0, "distance": 0.0 },
        { "lat": 45.909, "lon": 6.8, "elevation": 1100.0, "distance": 1000.0 },
        { "lat": 45.918, "lon": 6.8, "elevation": 1250.0, "distance": 2000.0 }
    ])
}

fn gpx_data(filename: &str) -> Value {
    json!({
        "filename": filename,
        "tracks": [{
            "name": "Col de la Croix",
            "points": track_points(),
            "statistics": {
                "total_distance": 2000.0,
                "total_elevation_gain": 250.0,
                "total_elevation_loss": 0.0
            }
        }],
        "waypoints": []
    })
}

async fn connection_test() -> Json<Value> {
    Json(json!({ "message": "GPX API is working", "version": "1.0.0" }))
}

async fn upload(State(recorded): State<Shared>, body: Bytes) -> Reply {
    let text = String::from_utf8_lossy(&body).into_owned();
    recorded.lock().unwrap().upload_body = Some(body.to_vec());

    if text.contains("<rejected/>") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "Invalid GPX: no track point" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "File uploaded",
            "file_id": "file-1",
            "data": gpx_data("course.gpx")
        })),
    )
}

async fn detect_climbs() -> Reply {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({
            "detail": [
                { "loc": ["body", "track_points"], "msg": "field required", "type": "missing" }
            ]
        })),
    )
}

async fn aid_station_table(State(recorded): State<Shared>, Json(request): Json<Value>) -> Json<Value> {
    recorded.lock().unwrap().table_request = Some(request);
    Json(json!({
        "success": true,
        "segments": [{
            "from_station": "Start",
            "to_station": "Summit",
            "start_km": 0.0,
            "end_km": 2.0,
            "distance_km": 2.0,
            "elevation_gain": 250.0,
            "elevation_loss": 0.0,
            "avg_gradient": 12.5,
            "estimated_time_minutes": 42.0
        }],
        "total_distance_km": 2.0,
        "total_elevation_gain": 250.0,
        "total_elevation_loss": 0.0,
        "total_time_minutes": 42.0
    }))
}

async fn merge(State(recorded): State<Shared>, Json(request): Json<Value>) -> Json<Value> {
    let name = request["merged_track_name"].as_str().unwrap_or_default().to_string();
    recorded.lock().unwrap().merge_request = Some(request);
    Json(json!({
        "success": true,
        "message": "Merged",
        "merged_gpx": format!("<?xml version=\"1.0\"?><gpx><trk><name>{name}</name></trk></gpx>"),
        "warnings": ["Gap of 12 minutes interpolated"]
    }))
}

async fn save_share(State(recorded): State<Shared>, Json(request): Json<Value>) -> Json<Value> {
    recorded.lock().unwrap().saved_state = Some(request["state_json"].clone());
    Json(json!({
        "success": true,
        "share_id": "xK9mP2vL",
        "url": "/share/xK9mP2vL",
        "expires_at": "2026-11-18T10:00:00"
    }))
}

async fn get_share(State(recorded): State<Shared>, Path(id): Path<String>) -> Reply {
    match id.as_str() {
        "expired" => (
            StatusCode::GONE,
            Json(json!({ "detail": "This share has expired" })),
        ),
        "xK9mP2vL" => {
            let state = recorded.lock().unwrap().saved_state.clone().unwrap_or(Value::Null);
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "share_id": id,
                    "state_json": state,
                    "created_at": "2026-10-19T10:00:00",
                    "view_count": 3
                })),
            )
        }
        _ => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Share not found" })),
        ),
    }
}

async fn delete_share(State(recorded): State<Shared>, Path(id): Path<String>) -> Reply {
    recorded.lock().unwrap().deleted_shares.push(id);
    (StatusCode::OK, Json(json!({ "success": true, "message": "Deleted" })))
}

async fn race_by_slug(Path(slug): Path<String>) -> Reply {
    if slug == SLOW_RACE_SLUG {
        tokio::time::sleep(SLOW_RESPONSE).await;
    }
    if slug != "grand-raid" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Race not found" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "id": "r1",
            "name": "Grand Raid",
            "slug": "grand-raid",
            "total_distance_km": 20.0,
            "start_location_lat": 45.92,
            "start_location_lon": 6.87,
            "is_published": true,
            "aid_stations": [
                { "name": "Refuge", "distance_km": 10.0, "elevation": 600.0, "type": "eau", "position_order": 1 },
                { "name": "Village", "distance_km": 20.0, "type": "assistance", "position_order": 2 }
            ]
        })),
    )
}

async fn sun_times() -> Reply {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "detail": "Sun service down" })),
    )
}

async fn admin_login(Json(request): Json<Value>) -> Reply {
    if request["password"] == ADMIN_PASSWORD {
        (
            StatusCode::OK,
            Json(json!({ "success": true, "token": ADMIN_TOKEN })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid password" })),
        )
    }
}

async fn admin_races(State(recorded): State<Shared>, headers: HeaderMap) -> Reply {
    let token = headers
        .get("x-admin-token")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let authorized = token.as_deref() == Some(ADMIN_TOKEN);
    recorded.lock().unwrap().admin_tokens.push(token);

    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid or expired admin token" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!([
            { "id": "r1", "name": "Grand Raid", "slug": "grand-raid", "is_published": true },
            { "id": "r2", "name": "Draft Race", "slug": "draft-race", "is_published": false }
        ])),
    )
}

async fn contact(State(recorded): State<Shared>, Json(request): Json<Value>) -> Json<Value> {
    recorded.lock().unwrap().contact_messages.push(request);
    Json(json!({ "success": true, "message": "Message received" }))
}
