//! Resource store backends
//!
//! Two interchangeable template sources: an HTTP store fetching from a base
//! URL and a directory store reading from a local template tree. Both key
//! every resource on the deterministic paths from `cardlab_core::resolve`,
//! and both map every failure to `RESOURCE_UNAVAILABLE` with the resource
//! path attached.

use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use url::Url;

use cardlab_core::engine::ResourceStore;
use cardlab_core::error::{CardlabError, Result};
use cardlab_core::resolve;

use crate::client::build_default_client;

/// Template store backed by an HTTP server
pub struct HttpResourceStore {
    base_url: Url,
    client: Client,
}

impl HttpResourceStore {
    /// Create a store rooted at `base_url`. A missing trailing slash is
    /// added so relative resource paths join under the base, not beside it.
    pub fn new(base_url: &str) -> Result<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| CardlabError::unavailable(normalized.clone(), e))?;
        let client =
            build_default_client().map_err(|e| CardlabError::unavailable(base_url.as_str(), e))?;
        Ok(Self { base_url, client })
    }

    fn fetch(&self, path: &str) -> Result<String> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| CardlabError::unavailable(path, e))?;
        let response = self
            .client
            .get(url.as_str())
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| CardlabError::unavailable(path, e))?;
        response.text().map_err(|e| CardlabError::unavailable(path, e))
    }
}

impl ResourceStore for HttpResourceStore {
    fn fetch_manifest(&self) -> Result<String> {
        self.fetch(&resolve::manifest_path())
    }

    fn fetch_config(&self, region: &str, institution: &str) -> Result<String> {
        self.fetch(&resolve::config_path(region, institution)?)
    }

    fn fetch_document(&self, region: &str, institution: &str, document: &str) -> Result<String> {
        self.fetch(&resolve::document_path(region, institution, document)?)
    }
}

/// Template store backed by a local directory
pub struct DirResourceStore {
    root: PathBuf,
}

impl DirResourceStore {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn read(&self, path: &str) -> Result<String> {
        std::fs::read_to_string(self.root.join(path))
            .map_err(|e| CardlabError::unavailable(path, e))
    }
}

impl ResourceStore for DirResourceStore {
    fn fetch_manifest(&self) -> Result<String> {
        self.read(&resolve::manifest_path())
    }

    fn fetch_config(&self, region: &str, institution: &str) -> Result<String> {
        self.read(&resolve::config_path(region, institution)?)
    }

    fn fetch_document(&self, region: &str, institution: &str, document: &str) -> Result<String> {
        self.read(&resolve::document_path(region, institution, document)?)
    }
}
