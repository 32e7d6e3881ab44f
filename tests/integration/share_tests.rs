//! Share link tests

use gpxify::error::AppError;
use gpxify::models::{AidStation, GpxData};
use gpxify::services::share;
use gpxify::store::{GpxFileData, StateStore};
use tempfile::TempDir;

use crate::mock_backend::MockBackend;

fn seeded_store(dir: &TempDir) -> StateStore {
    let store = StateStore::new(dir.path().join("gpxify-storage.json"));
    store
        .update(|state| {
            state.add_file(GpxFileData::new(
                Some("f1".to_string()),
                "lake.gpx",
                GpxData {
                    filename: "lake.gpx".to_string(),
                    tracks: Vec::new(),
                    waypoints: Vec::new(),
                },
            ));
            state.add_aid_station(AidStation::new("Start", 0.0));
            Ok(())
        })
        .unwrap();
    store
}

#[tokio::test]
async fn test_save_then_load_into_another_store() {
    let backend = MockBackend::spawn().await;
    let api = backend.client();
    let source_dir = TempDir::new().unwrap();
    let source = seeded_store(&source_dir);

    let response = share::save(&api, &source).await.unwrap();
    assert_eq!(
        share::share_link("https://gpx.ninja/", &response),
        "https://gpx.ninja/share/xK9mP2vL"
    );
    assert_eq!(
        backend.recorded().saved_state.as_ref().unwrap()["selectedFileId"],
        "f1"
    );

    let target_dir = TempDir::new().unwrap();
    let target = StateStore::new(target_dir.path().join("gpxify-storage.json"));
    let loaded = share::load(&api, &target, &response.share_id).await.unwrap();

    assert_eq!(loaded, source.load().unwrap());
    assert_eq!(target.load().unwrap(), loaded);
}

#[tokio::test]
async fn test_nothing_to_share() {
    let backend = MockBackend::spawn().await;
    let dir = TempDir::new().unwrap();
    let store = StateStore::new(dir.path().join("gpxify-storage.json"));

    let error = share::save(&backend.client(), &store).await.unwrap_err();

    assert!(matches!(error, AppError::Precondition(_)));
    assert!(backend.recorded().saved_state.is_none());
}

#[tokio::test]
async fn test_missing_and_expired_shares() {
    let backend = MockBackend::spawn().await;
    let api = backend.client();

    let missing = share::fetch(&api, "nope").await.unwrap_err();
    assert!(matches!(missing, AppError::NotFound(_)));

    let expired = share::fetch(&api, "expired").await.unwrap_err();
    assert!(matches!(expired, AppError::Expired(_)));
}

#[tokio::test]
async fn test_failed_load_keeps_local_state() {
    let backend = MockBackend::spawn().await;
    let dir = TempDir::new().unwrap();
    let store = seeded_store(&dir);
    let before = store.load().unwrap();

    assert!(share::load(&backend.client(), &store, "expired").await.is_err());
    assert_eq!(store.load().unwrap(), before);
}

#[tokio::test]
async fn test_delete_share() {
    let backend = MockBackend::spawn().await;
    share::delete(&backend.client(), "xK9mP2vL").await.unwrap();

    assert_eq!(backend.recorded().deleted_shares, ["xK9mP2vL"]);
}
