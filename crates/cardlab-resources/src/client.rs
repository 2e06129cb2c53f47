//! HTTP client construction for template stores

use reqwest::blocking::Client;
use std::time::Duration;

/// Default timeout for template requests (30 seconds)
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default user agent for cardlab requests
pub const USER_AGENT: &str = "cardlab";

/// Builds HTTP client with appropriate settings for template stores
///
/// # Errors
///
/// Returns error if client construction fails
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Builds HTTP client with default timeout
pub fn build_default_client() -> Result<Client, reqwest::Error> {
    build_client(DEFAULT_TIMEOUT)
}
