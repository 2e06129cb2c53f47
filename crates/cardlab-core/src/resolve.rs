//! Selection-tuple path resolution
//!
//! Resource paths are built deterministically from the current selection so
//! that any caching layer between the engine and the resource store keys on
//! the same path for the same tuple. Two properties are load-bearing:
//!
//! - **Stable**: the same selection tuple always yields the same path.
//! - **Injective**: distinct tuples yield distinct paths. This holds because
//!   every id is validated to be a single, separator-free path component
//!   before it is joined into a path.
//!
//! Ids that would escape the template tree (`..`, `a/b`, absolute paths) are
//! rejected with `MALFORMED_SELECTION` before any fetch happens.

use crate::error::{CardlabError, Result};

/// Well-known location of the catalog manifest
pub const MANIFEST_PATH: &str = "templates/manifest.json";

/// Check whether an id is safe to use as a single path component
///
/// Allowed: non-empty ASCII alphanumerics plus `-`, `_` and interior `.`.
/// Rejected: separators, parent/current-dir components, leading dots.
pub fn is_safe_id(id: &str) -> bool {
    if id.is_empty() || id.starts_with('.') {
        return false;
    }
    id.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

fn checked<'a>(id: &'a str, what: &str) -> Result<&'a str> {
    if is_safe_id(id) {
        Ok(id)
    } else {
        Err(CardlabError::MalformedSelection(format!(
            "{} id '{}' is not a safe path component",
            what, id
        )))
    }
}

/// Path of the catalog manifest
pub fn manifest_path() -> String {
    MANIFEST_PATH.to_string()
}

/// Path of an institution's config document
pub fn config_path(region: &str, institution: &str) -> Result<String> {
    Ok(format!(
        "templates/{}/{}/config.json",
        checked(region, "region")?,
        checked(institution, "institution")?
    ))
}

/// Path of a document's markup fragment
pub fn document_path(region: &str, institution: &str, document: &str) -> Result<String> {
    Ok(format!(
        "templates/{}/{}/{}.html",
        checked(region, "region")?,
        checked(institution, "institution")?,
        checked(document, "document")?
    ))
}

/// Path of an institution's stylesheet
pub fn stylesheet_path(region: &str, institution: &str) -> Result<String> {
    Ok(format!(
        "templates/{}/{}/style.css",
        checked(region, "region")?,
        checked(institution, "institution")?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_stable() {
        let a = document_path("nl", "uva", "student-card").unwrap();
        let b = document_path("nl", "uva", "student-card").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "templates/nl/uva/student-card.html");
    }

    #[test]
    fn test_distinct_tuples_yield_distinct_paths() {
        let tuples = [
            ("nl", "uva", "student-card"),
            ("nl", "uva", "enrollment-letter"),
            ("nl", "tud", "student-card"),
            ("de", "uva", "student-card"),
        ];
        let mut paths: Vec<String> = tuples
            .iter()
            .map(|(r, i, d)| document_path(r, i, d).unwrap())
            .collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), tuples.len(), "paths must be injective");
    }

    #[test]
    fn test_config_and_stylesheet_paths() {
        assert_eq!(
            config_path("nl", "uva").unwrap(),
            "templates/nl/uva/config.json"
        );
        assert_eq!(
            stylesheet_path("nl", "uva").unwrap(),
            "templates/nl/uva/style.css"
        );
    }

    #[test]
    fn test_unsafe_ids_rejected() {
        for bad in ["", "..", "../x", "a/b", "/abs", ".hidden", "a\\b", "a b"] {
            assert!(!is_safe_id(bad), "id '{}' should be unsafe", bad);
            let err = document_path("nl", "uva", bad).unwrap_err();
            assert!(
                err.to_string().starts_with("MALFORMED_SELECTION"),
                "id '{}' should be rejected before any fetch, got: {}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_interior_dot_is_allowed() {
        assert!(is_safe_id("card.v2"));
        assert!(is_safe_id("uva-2024"));
        assert!(is_safe_id("tu_delft"));
    }
}
