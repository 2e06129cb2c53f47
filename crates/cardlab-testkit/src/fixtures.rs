//! Canned template fixtures
//!
//! A small but complete template tree: one manifest with two regions, one
//! institution config, and one document fragment exercising every binding
//! rule (text, date, file) plus the computed keys. The ids used here are
//! `nl` / `tu-delft` / `studentCard` throughout.

use std::io;
use std::path::Path;

pub const REGION_ID: &str = "nl";
pub const INSTITUTION_ID: &str = "tu-delft";
pub const DOCUMENT_ID: &str = "studentCard";

pub const SAMPLE_MANIFEST: &str = r#"{
  "regions": [
    {
      "id": "nl",
      "name": "Netherlands",
      "institutions": [
        { "id": "tu-delft", "name": "TU Delft" },
        { "id": "leiden", "name": "Leiden University" }
      ]
    },
    {
      "id": "de",
      "name": "Germany",
      "institutions": [
        { "id": "tu-berlin", "name": "TU Berlin" }
      ]
    }
  ]
}"#;

pub const SAMPLE_CONFIG: &str = r#"{
  "commonFieldDefaults": {
    "institutionName": "TU Delft",
    "studyPeriod": "4",
    "enrollmentDate": ""
  },
  "documents": {
    "studentCard": {
      "name": "Student Card",
      "available": true,
      "fieldDefaults": {
        "studentName": "J. Doe"
      }
    },
    "libraryPass": {
      "name": "Library Pass",
      "available": false
    }
  }
}"#;

pub const SAMPLE_DOCUMENT: &str = r#"<div id="form-snippet">
  <input id="studentName" type="text" data-bind-to="studentName">
  <input id="birthDate" type="date" data-bind-to="birthDate">
  <input id="studentPhoto" type="file" data-bind-to="studentPhoto">
</div>
<div id="preview-snippet">
  <div data-width="1011" data-height="638">
    <span data-preview-id="studentName"></span>
    <span data-preview-id="birthDate"></span>
    <img data-preview-id="studentPhoto">
    <span data-preview-id="academicYear" data-full-year="true"></span>
    <span data-preview-id="issueDate"></span>
    <span data-preview-id="validDate"></span>
    <p data-preview-id="notice"></p>
  </div>
</div>"#;

pub const SAMPLE_STYLESHEET: &str = "/* fixture stylesheet */\n";

/// Write the canonical fixture tree under `root/templates/` so directory
/// backed stores can serve it.
pub fn write_template_tree(root: &Path) -> io::Result<()> {
    let templates = root.join("templates");
    let institution = templates.join(REGION_ID).join(INSTITUTION_ID);
    std::fs::create_dir_all(&institution)?;

    std::fs::write(templates.join("manifest.json"), SAMPLE_MANIFEST)?;
    std::fs::write(institution.join("config.json"), SAMPLE_CONFIG)?;
    std::fs::write(
        institution.join(format!("{}.html", DOCUMENT_ID)),
        SAMPLE_DOCUMENT,
    )?;
    std::fs::write(institution.join("style.css"), SAMPLE_STYLESHEET)?;
    Ok(())
}
