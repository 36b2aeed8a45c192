//! Shared helpers for integration tests

use marker_manager::maps::api::{InMemoryMapsApi, RecordedCall};
use marker_manager::markers::api::MarkerManager;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

#[allow(dead_code)]
pub fn setup() -> (Arc<InMemoryMapsApi>, MarkerManager) {
    let api = Arc::new(InMemoryMapsApi::new("integration"));
    let manager = MarkerManager::new(api.clone());
    (api, manager)
}

#[allow(dead_code)]
pub fn methods(calls: &[RecordedCall]) -> Vec<&'static str> {
    calls.iter().map(RecordedCall::method).collect()
}

/// Write `contents` to a temporary file that lives as long as the handle
#[allow(dead_code)]
pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}
