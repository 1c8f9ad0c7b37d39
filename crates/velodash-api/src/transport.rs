// Shared transport configuration for building reqwest::Client instances.
//
// Keeps timeout and header settings in one place so every consumer of
// the rental API builds its client the same way.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    /// Accept-Language sent with every request; the service localizes
    /// some branding strings server-side.
    pub language: Option<String>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            language: None,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, crate::error::Error> {
        let mut headers = HeaderMap::new();
        if let Some(ref lang) = self.language {
            if let Ok(value) = HeaderValue::from_str(lang) {
                headers.insert(reqwest::header::ACCEPT_LANGUAGE, value);
            }
        }

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("velodash/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(client)
    }

    /// Build a `reqwest::Client` carrying a bearer token for the
    /// authenticated (administrative) endpoints.
    pub fn build_client_with_token(
        &self,
        token: &secrecy::SecretString,
    ) -> Result<reqwest::Client, crate::error::Error> {
        use secrecy::ExposeSecret;

        let mut headers = HeaderMap::new();
        if let Some(ref lang) = self.language {
            if let Ok(value) = HeaderValue::from_str(lang) {
                headers.insert(reqwest::header::ACCEPT_LANGUAGE, value);
            }
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|e| crate::error::Error::Authentication {
                message: format!("invalid token header value: {e}"),
            })?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("velodash/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(client)
    }
}
