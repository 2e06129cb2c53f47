use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardlabError {
    // Resource errors
    #[error("RESOURCE_UNAVAILABLE: failed to load {resource}: {reason}")]
    ResourceUnavailable { resource: String, reason: String },

    // Selection errors
    #[error("MALFORMED_SELECTION: {0}")]
    MalformedSelection(String),

    // Parse errors
    #[error("MANIFEST_INVALID: failed to parse catalog manifest: {0}")]
    ManifestInvalid(String),

    #[error("CONFIG_INVALID: failed to parse institution config: {0}")]
    ConfigInvalid(String),

    #[error("FRAGMENT_INVALID: failed to parse document fragment: {0}")]
    FragmentInvalid(String),
}

impl CardlabError {
    /// Build a ResourceUnavailable error for a named resource.
    pub fn unavailable(resource: impl Into<String>, reason: impl ToString) -> Self {
        CardlabError::ResourceUnavailable {
            resource: resource.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CardlabError>;
