//! Integration Tests
//!
//! Flows against an in-process mock of the GPXIFY backend.

mod mock_backend;

mod contact_tests;
mod share_tests;
