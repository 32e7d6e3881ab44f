//! Models module for GPXIFY
//!
//! Data-transfer shapes mirrored from the backend request and response bodies.
//! The backend is the source of truth for every computed field.

pub mod aid_station;
pub mod contact;
pub mod merge;
pub mod race;
pub mod share;
pub mod track;

// Re-export commonly used types
pub use aid_station::{
    AidStation, AidStationSegment, AidStationTableRequest, AidStationTableResponse, PacingMode,
};
pub use contact::ContactRequest;
pub use merge::{merged_filename, GpxFileContent, MergeOptions, MergeRequest, MergeResponse};
pub use race::{
    AdminLoginRequest, AdminLoginResponse, ParseRavitoTableRequest, ParseRavitoTableResponse,
    ParsedRavito, ParsedRavitoTable, Race, RaceAidStation, RaceCreate, RaceSummary, RaceUpdate,
    RavitoType, SunTimes, SunTimesRequest, SunTimesResponse,
};
pub use share::{Acknowledgement, SaveStateRequest, SaveStateResponse, SharedStateResponse};
pub use track::{
    ClimbSegment, ConnectionInfo, Coordinate, ExportSegmentRequest, GpxData, Track, TrackPoint,
    TrackStatistics, UploadResponse,
};
