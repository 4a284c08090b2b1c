//! HTTP client for the claims API.
//!
//! Every request carries the `Authorization` header of an injected [`Session`]; nothing
//! reads a global token. Generic GET helpers decode JSON (optionally unwrapping the
//! `{ "body": "<json>" }` envelope some endpoints return) and the domain methods in
//! [`api`] implement the [`ClaimsApi`] trait the workflow crate depends on.

pub mod api;
pub mod envelope;
pub mod error;

use anyhow::Context;
use claimdesk_core::{AuthScheme, ClientConfig};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use api::{ClaimStatusResponse, ClaimsApi, DocumentLink, UploadSlot, UploadedFile};
pub use error::ClientError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Authentication strategy for the API.
#[derive(Clone)]
pub enum Auth {
    /// `Authorization: {token}` (identity-provider id token, no scheme prefix)
    IdToken(String),
    /// `Authorization: Bearer {token}`
    Bearer(String),
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Auth::IdToken(_) => f.write_str("IdToken(<redacted>)"),
            Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
        }
    }
}

/// Signed-in user's session as issued by the identity provider.
#[derive(Clone, Debug)]
pub struct Session {
    auth: Auth,
}

impl Session {
    pub fn new(auth: Auth) -> Self {
        Self { auth }
    }

    pub fn id_token(token: impl Into<String>) -> Self {
        Self::new(Auth::IdToken(token.into()))
    }

    pub fn bearer(token: impl Into<String>) -> Self {
        Self::new(Auth::Bearer(token.into()))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        match config.auth_scheme {
            AuthScheme::IdToken => Self::id_token(config.token.clone()),
            AuthScheme::Bearer => Self::bearer(config.token.clone()),
        }
    }

    pub fn authorization_header(&self) -> String {
        match &self.auth {
            Auth::IdToken(token) => token.clone(),
            Auth::Bearer(token) => format!("Bearer {}", token),
        }
    }
}

/// HTTP client for the claims API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, session, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Session,
        timeout: Duration,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::with_timeout(
            config.api_endpoint.clone(),
            Session::from_config(config),
            config.request_timeout(),
        )
    }

    /// Create client from environment: CLAIMS_API_ENDPOINT, CLAIMS_ID_TOKEN, CLAIMS_AUTH_SCHEME.
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ClientConfig::from_env().context("Failed to load client configuration")?;
        Self::from_config(&config).context("Failed to create HTTP client")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.header(
            reqwest::header::AUTHORIZATION,
            self.session.authorization_header(),
        )
    }

    /// GET with optional query parameters, returning the raw JSON value.
    pub async fn get_value(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, ClientError> {
        let url = self.build_url(path);
        let mut request = self.apply_auth(self.client.get(&url));

        if !query.is_empty() {
            request = request.query(query);
        }

        tracing::debug!(path = %path, "Sending claims API request");
        let response = request.send().await.map_err(ClientError::Transport)?;
        read_json(response).await
    }

    /// GET and deserialize the JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let value = self.get_value(path, query).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET and deserialize, unwrapping a `{ "body": "<json>" }` envelope first.
    pub async fn get_enveloped<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let value = envelope::unwrap(self.get_value(path, query).await?)?;
        Ok(serde_json::from_value(value)?)
    }

    /// Raw client for requests outside the API (pre-signed upload slots).
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Turn a non-2xx response into `ClientError::Status`, otherwise parse the body as JSON.
async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, ClientError> {
    let status = response.status();
    let text = response.text().await.map_err(ClientError::Transport)?;

    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body: if text.is_empty() {
                "Unknown error".to_string()
            } else {
                text
            },
        });
    }

    if text.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }

    Ok(serde_json::from_str(&text)?)
}

// Re-export domain types for convenience.
pub use claimdesk_core::models::{ClaimFile, ClaimReport, ClaimSummary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_token_header_has_no_prefix() {
        assert_eq!(Session::id_token("abc").authorization_header(), "abc");
        assert_eq!(Session::bearer("abc").authorization_header(), "Bearer abc");
    }

    #[test]
    fn session_debug_redacts_token() {
        let rendered = format!("{:?}", Session::bearer("very-secret"));
        assert!(!rendered.contains("very-secret"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("https://api.example.com/prod/", Session::id_token("t")).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com/prod");
        assert_eq!(
            client.build_url("/get-claims"),
            "https://api.example.com/prod/get-claims"
        );
    }

    #[test]
    fn session_follows_config_scheme() {
        let config = ClientConfig {
            api_endpoint: "http://localhost:3000".to_string(),
            auth_scheme: AuthScheme::Bearer,
            token: "tok".to_string(),
            request_timeout_secs: 5,
            poll_interval_secs: 5,
            max_poll_errors: None,
        };
        assert_eq!(
            Session::from_config(&config).authorization_header(),
            "Bearer tok"
        );
    }
}
