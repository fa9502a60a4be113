//! Okta management API client (reqwest-based).
//!
//! Only the calls the member resources need: fetch and replace an
//! application, fetch and replace an authorization server. Every request is a
//! fresh round trip; nothing is cached.

use crate::config::ResolvedConfig;
use crate::model::{Application, AuthorizationServer};
use member_framework::StoreError;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

const USER_AGENT: &str = concat!("okta-members/", env!("CARGO_PKG_VERSION"));
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("API error ({status}): {summary}")]
    Api { status: u16, summary: String },
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<ClientError> for StoreError {
    fn from(e: ClientError) -> Self {
        let message = e.to_string();
        match e {
            ClientError::NotFound(msg) => StoreError::NotFound(msg),
            ClientError::Api { status, .. }
                if status == StatusCode::TOO_MANY_REQUESTS.as_u16() || status >= 500 =>
            {
                StoreError::Transient(message)
            }
            ClientError::Api { .. } | ClientError::InvalidConfig(_) => StoreError::Invalid(message),
            ClientError::Http(_) | ClientError::Parse(_) => StoreError::Transient(message),
        }
    }
}

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    #[serde(default)]
    error_code: String,
    #[serde(default)]
    error_summary: String,
    #[serde(default)]
    error_causes: Vec<ApiErrorCause>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorCause {
    #[serde(default)]
    error_summary: String,
}

impl ApiErrorBody {
    fn describe(&self) -> String {
        let mut summary = if self.error_code.is_empty() {
            self.error_summary.clone()
        } else {
            format!("{}: {}", self.error_code, self.error_summary)
        };
        let causes: Vec<&str> = self
            .error_causes
            .iter()
            .map(|c| c.error_summary.as_str())
            .filter(|s| !s.is_empty())
            .collect();
        if !causes.is_empty() {
            summary.push_str(&format!(", causes: {}", causes.join("; ")));
        }
        summary
    }
}

fn build_http_client(timeout: Duration) -> Result<Client, ClientError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| ClientError::InvalidConfig(format!("Failed to build HTTP client: {e}")))
}

#[derive(Debug, Clone)]
pub struct OktaClient {
    base_url: Url,
    token: SecretString,
    http_client: Client,
}

impl OktaClient {
    pub fn new(config: &ResolvedConfig) -> Result<Self, ClientError> {
        let http_client = build_http_client(config.request_timeout)?;
        Self::with_http_client(config.endpoint.clone(), config.api_token.clone(), http_client)
    }

    /// Builds a client around a pre-built `reqwest::Client` (for testing).
    pub fn with_http_client(
        base_url: Url,
        token: SecretString,
        http_client: Client,
    ) -> Result<Self, ClientError> {
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidConfig(format!(
                "{base_url} cannot be used as a base URL"
            )));
        }
        Ok(Self {
            base_url,
            token,
            http_client,
        })
    }

    /// Convenience constructor used by tests and tooling.
    pub fn for_endpoint(endpoint: &str, token: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(endpoint)
            .map_err(|e| ClientError::InvalidConfig(format!("endpoint {endpoint:?}: {e}")))?;
        let http_client = build_http_client(DEFAULT_REQUEST_TIMEOUT)?;
        Self::with_http_client(base_url, SecretString::from(token.to_string()), http_client)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Applications ──────────────────────────────────────────────────

    /// GET /api/v1/apps/:id
    pub async fn get_application(&self, id: &str) -> Result<Application, ClientError> {
        let url = self.endpoint(&["api", "v1", "apps", id])?;
        self.get(url).await
    }

    /// PUT /api/v1/apps/:id
    pub async fn update_application(
        &self,
        id: &str,
        app: &Application,
    ) -> Result<Application, ClientError> {
        let url = self.endpoint(&["api", "v1", "apps", id])?;
        self.put(url, app).await
    }

    // ── Authorization Servers ─────────────────────────────────────────

    /// GET /api/v1/authorizationServers/:id
    pub async fn get_authorization_server(
        &self,
        id: &str,
    ) -> Result<AuthorizationServer, ClientError> {
        let url = self.endpoint(&["api", "v1", "authorizationServers", id])?;
        self.get(url).await
    }

    /// PUT /api/v1/authorizationServers/:id
    pub async fn update_authorization_server(
        &self,
        id: &str,
        server: &AuthorizationServer,
    ) -> Result<AuthorizationServer, ClientError> {
        let url = self.endpoint(&["api", "v1", "authorizationServers", id])?;
        self.put(url, server).await
    }

    // ── Internal HTTP Methods ─────────────────────────────────────────

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidConfig(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorization(&self) -> String {
        format!("SSWS {}", self.token.expose_secret())
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        debug!("GET {}", url.path());
        let response = self
            .http_client
            .get(url)
            .header("Authorization", self.authorization())
            .header("Accept", "application/json")
            .send()
            .await?;
        self.handle_response(response).await
    }

    async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ClientError> {
        debug!("PUT {}", url.path());
        let response = self
            .http_client
            .put(url)
            .header("Authorization", self.authorization())
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    // ── Response Handling ─────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let path = response.url().path().to_string();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body)
                .map_err(|e| ClientError::Parse(format!("{path}: {e}")));
        }

        let summary = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|parsed| parsed.describe())
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body.clone()
                }
            });

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(format!("{path}: {summary}")));
        }

        warn!(status = status.as_u16(), %path, %summary, "API request failed");
        Err(ClientError::Api {
            status: status.as_u16(),
            summary,
        })
    }
}
