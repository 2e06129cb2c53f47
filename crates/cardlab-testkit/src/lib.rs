//! Test utilities for cardlab
//!
//! This crate provides shared testing utilities used across the cardlab
//! workspace: canned template fixtures, a shared mockito server, and
//! temp-dir helpers.

use tempfile::TempDir;

pub mod fixtures;
pub mod mock;

pub use fixtures::{write_template_tree, SAMPLE_CONFIG, SAMPLE_DOCUMENT, SAMPLE_MANIFEST};
pub use mock::get_shared_mock_server;

/// Creates a temporary directory within `.tmp/` at the project root
///
/// This ensures all test temporary files are centralized in a single location
/// that is gitignored and easy to clean up manually if needed.
///
/// # Panics
///
/// Panics if the current directory cannot be determined or the directory
/// cannot be created.
pub fn temp_dir_in_workspace() -> TempDir {
    let workspace_root = std::env::current_dir().expect("Failed to get current directory");

    let tmp_base = workspace_root.join(".tmp");
    std::fs::create_dir_all(&tmp_base).expect("Failed to create .tmp directory");

    TempDir::new_in(&tmp_base).expect("Failed to create temporary directory in .tmp/")
}
