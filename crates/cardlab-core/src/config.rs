//! Per-institution config schema
//!
//! Fetched lazily when an institution is selected and replaced wholesale
//! on every institution change - the engine never merges two configs.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// config.json schema for one institution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionConfig {
    /// Defaults for the common (institution-wide) form fields
    #[serde(default)]
    pub common_field_defaults: BTreeMap<String, String>,

    /// Document types offered by this institution, keyed by document id.
    /// Declaration order is preserved; it drives the document list and the
    /// auto-selected first available document.
    #[serde(default)]
    pub documents: IndexMap<String, DocumentDescriptor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDescriptor {
    pub name: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub field_defaults: BTreeMap<String, String>,
}

impl InstitutionConfig {
    /// Parse a config document
    pub fn from_json(content: &str) -> crate::error::Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| crate::error::CardlabError::ConfigInvalid(e.to_string()))
    }

    /// Documents with `available == true`, in declaration order
    pub fn available_documents(&self) -> impl Iterator<Item = (&str, &DocumentDescriptor)> {
        self.documents
            .iter()
            .filter(|(_, d)| d.available)
            .map(|(id, d)| (id.as_str(), d))
    }

    /// First available document id, if any
    pub fn first_available(&self) -> Option<&str> {
        self.available_documents().next().map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "commonFieldDefaults": {
            "institutionName": "University of Amsterdam",
            "institutionAddress": "Spui 21"
        },
        "documents": {
            "student-card": {
                "name": "Student card",
                "available": true,
                "fieldDefaults": { "studyPeriod": "4" }
            },
            "enrollment-letter": {
                "name": "Enrollment letter",
                "available": false
            }
        }
    }"#;

    #[test]
    fn test_parse_config() {
        let config = InstitutionConfig::from_json(CONFIG).unwrap();
        assert_eq!(
            config.common_field_defaults.get("institutionName").unwrap(),
            "University of Amsterdam"
        );
        assert_eq!(config.documents.len(), 2);
        let card = &config.documents["student-card"];
        assert!(card.available);
        assert_eq!(card.field_defaults.get("studyPeriod").unwrap(), "4");
    }

    #[test]
    fn test_available_filtering() {
        let config = InstitutionConfig::from_json(CONFIG).unwrap();
        let available: Vec<&str> = config.available_documents().map(|(id, _)| id).collect();
        assert_eq!(available, vec!["student-card"]);
        assert_eq!(config.first_available(), Some("student-card"));
    }

    #[test]
    fn test_documents_keep_declaration_order() {
        // "studentCard" sorts after "libraryPass" but is declared first
        let config = InstitutionConfig::from_json(
            r#"{
                "documents": {
                    "studentCard": { "name": "Student card", "available": true },
                    "libraryPass": { "name": "Library pass", "available": true }
                }
            }"#,
        )
        .unwrap();
        let ids: Vec<&str> = config.available_documents().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["studentCard", "libraryPass"]);
        assert_eq!(config.first_available(), Some("studentCard"));
    }

    #[test]
    fn test_empty_config_parses() {
        let config = InstitutionConfig::from_json("{}").unwrap();
        assert!(config.common_field_defaults.is_empty());
        assert!(config.first_available().is_none());
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let result = InstitutionConfig::from_json("[1, 2]");
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .starts_with("CONFIG_INVALID"));
    }
}
