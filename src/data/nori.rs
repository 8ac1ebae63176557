//! Nori API client
//!
//! The lootpool endpoint is guarded by a CSRF token. A session is opened by
//! requesting `/api/tokens`, which sets a `csrf_token` cookie; the lootpool
//! request must send that cookie back and carry the token in `X-CSRF-Token`.
//! Cookies are kept in the client's cookie store between the two requests.

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

/// Base URL for the Nori API
pub const NORI_BASE_URL: &str = "https://nori.fish";

/// Cookie holding the CSRF token
const CSRF_COOKIE: &str = "csrf_token";

/// Header the lootpool endpoint expects the token in
const CSRF_HEADER: &str = "X-CSRF-Token";

/// Errors that can occur when talking to the Nori API
#[derive(Debug, Error)]
pub enum NoriError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// The token endpoint did not set a CSRF cookie
    #[error("No csrf_token cookie in response from {0}")]
    MissingToken(String),
}

/// Credentials returned by the token endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Value of the `csrf_token` cookie
    pub csrf_token: String,
}

/// Result of a lootpool request
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// The API answered 200 with this body
    Downloaded(Value),
    /// The API answered with another status
    Rejected { status: StatusCode },
}

/// Client for the Nori lootpool API
#[derive(Debug, Clone)]
pub struct NoriClient {
    client: Client,
    base_url: String,
}

impl NoriClient {
    /// Create a client for the given API base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, NoriError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder().cookie_store(true).build()?;
        Ok(Self { client, base_url })
    }

    /// URL of the token endpoint
    pub fn tokens_url(&self) -> String {
        format!("{}/api/tokens", self.base_url)
    }

    /// URL of the lootpool endpoint
    pub fn lootpool_url(&self) -> String {
        format!("{}/api/lootpool", self.base_url)
    }

    /// Opens a session by requesting a CSRF token
    ///
    /// The status code of the token response is not checked; a response
    /// without the cookie is the failure case.
    pub async fn request_token(&self) -> Result<Session, NoriError> {
        let url = self.tokens_url();
        let response = self.client.get(&url).send().await?;

        let csrf_token = response
            .cookies()
            .find(|c| c.name() == CSRF_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or(NoriError::MissingToken(url))?;

        Ok(Session { csrf_token })
    }

    /// Requests the lootpool using an open session
    ///
    /// Only a 200 response is parsed. Any other status is returned as
    /// [`FetchOutcome::Rejected`] without reading the body.
    pub async fn request_lootpool(&self, session: &Session) -> Result<FetchOutcome, NoriError> {
        let response = self
            .client
            .get(self.lootpool_url())
            .header(CSRF_HEADER, &session.csrf_token)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Ok(FetchOutcome::Rejected { status });
        }

        let text = response.text().await?;
        let body: Value = serde_json::from_str(&text)?;
        Ok(FetchOutcome::Downloaded(body))
    }
}
