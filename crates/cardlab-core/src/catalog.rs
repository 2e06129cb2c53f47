//! Catalog manifest schema - the immutable region/institution listing

use serde::{Deserialize, Serialize};

/// manifest.json schema - loaded once at startup, read-only for the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub institutions: Vec<Institution>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Institution {
    pub id: String,
    pub name: String,
}

impl Catalog {
    /// Parse a manifest document
    pub fn from_json(content: &str) -> crate::error::Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| crate::error::CardlabError::ManifestInvalid(e.to_string()))
    }

    /// Look up a region by id
    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    /// Institutions for a region, empty if the region is unknown
    pub fn institutions(&self, region_id: &str) -> &[Institution] {
        self.region(region_id)
            .map(|r| r.institutions.as_slice())
            .unwrap_or(&[])
    }

    /// Look up an institution within a region
    pub fn institution(&self, region_id: &str, institution_id: &str) -> Option<&Institution> {
        self.institutions(region_id)
            .iter()
            .find(|i| i.id == institution_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"{
        "regions": [
            {
                "id": "nl",
                "name": "Netherlands",
                "institutions": [
                    { "id": "uva", "name": "University of Amsterdam" },
                    { "id": "tud", "name": "TU Delft" }
                ]
            },
            { "id": "de", "name": "Germany", "institutions": [] }
        ]
    }"#;

    #[test]
    fn test_parse_manifest() {
        let catalog = Catalog::from_json(MANIFEST).unwrap();
        assert_eq!(catalog.regions.len(), 2);
        assert_eq!(catalog.regions[0].name, "Netherlands");
        assert_eq!(catalog.institutions("nl").len(), 2);
    }

    #[test]
    fn test_region_lookup() {
        let catalog = Catalog::from_json(MANIFEST).unwrap();
        assert!(catalog.region("nl").is_some());
        assert!(catalog.region("fr").is_none());
        assert!(catalog.institutions("fr").is_empty());
    }

    #[test]
    fn test_institution_lookup_is_region_scoped() {
        let catalog = Catalog::from_json(MANIFEST).unwrap();
        assert!(catalog.institution("nl", "uva").is_some());
        assert!(catalog.institution("de", "uva").is_none());
    }

    #[test]
    fn test_malformed_manifest_is_an_error() {
        let result = Catalog::from_json("{ not json");
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.starts_with("MANIFEST_INVALID"), "got: {}", msg);
    }

    #[test]
    fn test_missing_regions_defaults_to_empty() {
        let catalog = Catalog::from_json("{}").unwrap();
        assert!(catalog.regions.is_empty());
    }
}
