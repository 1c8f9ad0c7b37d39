// Hand-crafted async HTTP client for the Velocité rental service API.
//
// Base path: /api/
// Public endpoints need no auth; /api/auth/login issues a bearer token
// for the administrative surface.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::types::{
    CompanyResponse, LoginRequest, PricingResponse, ReviewCreate, ReviewResponse, SessionResponse,
};

// ── Error response shape from the service ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the rental service's public API.
///
/// Communicates via JSON REST endpoints under `/api/`.
pub struct RentalClient {
    http: reqwest::Client,
    base_url: Url,
}

impl RentalClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a base URL and transport config.
    pub fn new(base_url: &str, transport: &crate::TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client` (caller manages headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Normalize the base URL so it always ends with `/api/`.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();

        if path.ends_with("/api") {
            url.set_path(&format!("{path}/"));
        } else {
            url.set_path(&format!("{path}/api/"));
        }

        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"pricing/calculate"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        // base_url always ends with `/api/`, so joining a relative path works.
        Ok(self.base_url.join(path)?)
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// Parse a response: 2xx bodies deserialize into `T`, everything else
    /// becomes a structured error.
    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            let body = resp.text().await?;
            return serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body,
            });
        }

        let body = resp.text().await.unwrap_or_default();
        let parsed: ErrorResponse = serde_json::from_str(&body).unwrap_or(ErrorResponse {
            message: None,
            code: None,
        });
        let message = parsed
            .message
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_owned());

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication { message });
        }

        Err(Error::Api {
            message,
            code: parsed.code,
            status: status.as_u16(),
        })
    }

    // ── Pricing ──────────────────────────────────────────────────────

    /// Fetch the server-computed pricing snapshot for a point in time.
    ///
    /// `hour_of_day` is passed explicitly so the server applies the
    /// matching time-of-day rules; `at` disambiguates the exact instant.
    /// Idempotent -- the caller may retry freely.
    pub async fn fetch_pricing(
        &self,
        at: DateTime<Utc>,
        hour_of_day: u32,
    ) -> Result<PricingResponse, Error> {
        self.get_with_params(
            "pricing/calculate",
            &[
                ("hour", hour_of_day.to_string()),
                ("at", at.to_rfc3339()),
            ],
        )
        .await
    }

    // ── Company ──────────────────────────────────────────────────────

    /// Fetch company branding fields for the landing screen.
    pub async fn company_info(&self) -> Result<CompanyResponse, Error> {
        self.get("company").await
    }

    // ── Reviews ──────────────────────────────────────────────────────

    /// List published customer reviews, newest first.
    pub async fn list_reviews(&self) -> Result<Vec<ReviewResponse>, Error> {
        self.get("reviews").await
    }

    /// Submit a new review. The service moderates before publishing.
    pub async fn submit_review(&self, review: &ReviewCreate) -> Result<ReviewResponse, Error> {
        self.post("reviews", review).await
    }

    // ── Authentication ───────────────────────────────────────────────

    /// Exchange credentials for a session token.
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionResponse, Error> {
        self.post(
            "auth/login",
            &LoginRequest {
                username: username.to_owned(),
                password: password.to_owned(),
            },
        )
        .await
    }
}
