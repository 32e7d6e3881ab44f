//! Unit Tests
//!
//! Client-side behavior that needs no backend: file validation, forms,
//! persisted state, table export and roadbook computation.

mod test_utils;

mod aid_station_table_tests;
mod form_validation_tests;
mod gpx_validation_tests;
mod roadbook_tests;
