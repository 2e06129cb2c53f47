//! Integration tests for the cardlab CLI

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;

use cardlab_testkit::{temp_dir_in_workspace, write_template_tree};

fn cardlab() -> Command {
    Command::new(cargo_bin!(env!("CARGO_PKG_NAME")))
}

fn template_args(root: &Path) -> Vec<String> {
    vec!["--templates".to_string(), root.display().to_string()]
}

#[test]
fn test_cli_version_flag() {
    cardlab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("cardlab"));
}

#[test]
fn test_cli_help_flag() {
    cardlab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_catalog_json_lists_regions() {
    let temp = temp_dir_in_workspace();
    write_template_tree(temp.path()).unwrap();

    cardlab()
        .arg("catalog")
        .args(template_args(temp.path()))
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"schema_version\": \"1.0\""))
        .stdout(predicate::str::contains("Netherlands"))
        .stdout(predicate::str::contains("tu-delft"));
}

#[test]
fn test_catalog_human_output() {
    let temp = temp_dir_in_workspace();
    write_template_tree(temp.path()).unwrap();

    cardlab()
        .arg("catalog")
        .args(template_args(temp.path()))
        .assert()
        .success()
        .stdout(predicate::str::contains("Netherlands (nl)"))
        .stdout(predicate::str::contains("TU Delft (tu-delft)"));
}

#[test]
fn test_catalog_requires_a_store() {
    cardlab()
        .arg("catalog")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--base-url or --templates"));
}

#[test]
fn test_catalog_missing_store_is_an_error() {
    let temp = temp_dir_in_workspace();

    cardlab()
        .arg("catalog")
        .args(template_args(&temp.path().join("nowhere")))
        .assert()
        .failure()
        .stderr(predicate::str::contains("RESOURCE_UNAVAILABLE"));
}

#[test]
fn test_render_json_with_fields_file() {
    let temp = temp_dir_in_workspace();
    write_template_tree(temp.path()).unwrap();
    let fields = temp.path().join("fields.toml");
    fs::write(
        &fields,
        "studentName = \"Ada Lovelace\"\nenrollmentDate = \"2024-09-01\"\n",
    )
    .unwrap();

    cardlab()
        .arg("render")
        .args(template_args(temp.path()))
        .args(["--region", "nl", "--institution", "tu-delft"])
        .arg("--fields")
        .arg(&fields)
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Ada Lovelace"))
        // studyPeriod defaults to 4 years in the fixture config
        .stdout(predicate::str::contains("2028-09-01"))
        .stdout(predicate::str::contains("\"document_id\": \"studentCard\""));
}

#[test]
fn test_render_with_attachment_and_viewport() {
    let temp = temp_dir_in_workspace();
    write_template_tree(temp.path()).unwrap();
    let photo = temp.path().join("photo.png");
    fs::write(&photo, [0x89, 0x50, 0x4E, 0x47]).unwrap();

    cardlab()
        .arg("render")
        .args(template_args(temp.path()))
        .args(["--region", "nl", "--institution", "tu-delft"])
        .arg("--attach")
        .arg(format!("studentPhoto={}", photo.display()))
        .args(["--viewport", "505.5x800"])
        .arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("data:image/png;base64,"))
        .stdout(predicate::str::contains("\"transform\": 0.45"));
}

#[test]
fn test_render_unknown_region_fails() {
    let temp = temp_dir_in_workspace();
    write_template_tree(temp.path()).unwrap();

    cardlab()
        .arg("render")
        .args(template_args(temp.path()))
        .args(["--region", "atlantis", "--institution", "tu-delft"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("MALFORMED_SELECTION"));
}

#[test]
fn test_render_unknown_document_fails() {
    let temp = temp_dir_in_workspace();
    write_template_tree(temp.path()).unwrap();

    cardlab()
        .arg("render")
        .args(template_args(temp.path()))
        .args(["--region", "nl", "--institution", "tu-delft"])
        .args(["--document", "libraryPass"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("MALFORMED_SELECTION"));
}
