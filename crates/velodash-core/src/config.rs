//! Runtime configuration for connecting to the rental service.

use std::time::Duration;

use url::Url;

/// Everything the core needs to talk to the service.
///
/// Built by `velodash-config` from the profile file + environment, or
/// directly from CLI flags by the binary.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service base URL (e.g., `https://velocite.example.com`).
    pub url: Url,
    /// BCP-47 language tag sent as `Accept-Language` (e.g., "fr").
    pub language: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ServiceConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            language: "fr".into(),
            timeout: Duration::from_secs(30),
        }
    }
}
