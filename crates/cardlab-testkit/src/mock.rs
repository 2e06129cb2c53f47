//! Mock server infrastructure for testing
//!
//! A single shared mockito server keeps parallel tests from racing over
//! ports. Acquire the lock only while creating or removing mocks; mocks
//! clean themselves up on drop.

use lazy_static::lazy_static;
use mockito::{Mock, Server, ServerGuard};
use std::sync::Mutex;

use crate::fixtures;

lazy_static! {
    /// Global shared mockito server for all tests
    pub static ref SHARED_MOCK_SERVER: Mutex<ServerGuard> = Mutex::new(Server::new());
}

/// Get reference to shared mock server
///
/// Use unique URL paths per test to avoid mock collisions, and hold the
/// lock only during mock setup.
pub fn get_shared_mock_server() -> std::sync::MutexGuard<'static, ServerGuard> {
    SHARED_MOCK_SERVER.lock().unwrap_or_else(|poisoned| {
        // The server stays functional after a panicking test; access is
        // still serialized and isolation comes from unique mock paths.
        poisoned.into_inner()
    })
}

/// Mount the canonical fixture tree at `prefix` on the given server.
///
/// Returns the mocks; keep them alive for the duration of the test.
pub fn mount_template_tree(server: &mut ServerGuard, prefix: &str) -> Vec<Mock> {
    let base = format!(
        "{}/templates/{}/{}",
        prefix,
        fixtures::REGION_ID,
        fixtures::INSTITUTION_ID
    );
    vec![
        server
            .mock("GET", format!("{}/templates/manifest.json", prefix).as_str())
            .with_status(200)
            .with_body(fixtures::SAMPLE_MANIFEST)
            .create(),
        server
            .mock("GET", format!("{}/config.json", base).as_str())
            .with_status(200)
            .with_body(fixtures::SAMPLE_CONFIG)
            .create(),
        server
            .mock(
                "GET",
                format!("{}/{}.html", base, fixtures::DOCUMENT_ID).as_str(),
            )
            .with_status(200)
            .with_body(fixtures::SAMPLE_DOCUMENT)
            .create(),
        server
            .mock("GET", format!("{}/style.css", base).as_str())
            .with_status(200)
            .with_body(fixtures::SAMPLE_STYLESHEET)
            .create(),
    ]
}
