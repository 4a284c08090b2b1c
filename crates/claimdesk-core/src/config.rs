//! Configuration module
//!
//! Client settings are read from the environment (after loading `.env` with dotenvy).
//! The identity provider is external: the session token is handed to us, never minted here.

use std::env;
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 60;
const POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_API_ENDPOINT: &str = "http://localhost:3000";

/// How the session token is placed in the `Authorization` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthScheme {
    /// The raw identity token, as a Cognito user-pool authorizer expects.
    #[default]
    IdToken,
    /// `Bearer {token}`
    Bearer,
}

impl AuthScheme {
    pub fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "id-token" | "id_token" | "idtoken" | "raw" => Ok(AuthScheme::IdToken),
            "bearer" => Ok(AuthScheme::Bearer),
            other => Err(anyhow::anyhow!(
                "CLAIMS_AUTH_SCHEME must be 'id-token' or 'bearer', got '{}'",
                other
            )),
        }
    }
}

/// Settings for talking to the claims API.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_endpoint: String,
    pub auth_scheme: AuthScheme,
    pub token: String,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
    /// Consecutive failed status polls before a claim is marked failed. `None` keeps
    /// polling forever.
    pub max_poll_errors: Option<u32>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_endpoint", &self.api_endpoint)
            .field("auth_scheme", &self.auth_scheme)
            .field("token", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("poll_interval_secs", &self.poll_interval_secs)
            .field("max_poll_errors", &self.max_poll_errors)
            .finish()
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_endpoint = lookup("CLAIMS_API_ENDPOINT")
            .or_else(|| lookup("API_ENDPOINT"))
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let token = lookup("CLAIMS_ID_TOKEN")
            .or_else(|| lookup("CLAIMS_TOKEN"))
            .ok_or_else(|| anyhow::anyhow!("Missing session token. Set CLAIMS_ID_TOKEN or CLAIMS_TOKEN"))?;

        let auth_scheme = match lookup("CLAIMS_AUTH_SCHEME") {
            Some(value) => AuthScheme::parse(&value)?,
            None => AuthScheme::default(),
        };

        let request_timeout_secs = lookup("CLAIMS_REQUEST_TIMEOUT_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("CLAIMS_REQUEST_TIMEOUT_SECS must be a valid number"))
            })
            .transpose()?
            .unwrap_or(REQUEST_TIMEOUT_SECS);

        let poll_interval_secs = lookup("CLAIMS_POLL_INTERVAL_SECS")
            .map(|v| {
                v.parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("CLAIMS_POLL_INTERVAL_SECS must be a valid number"))
            })
            .transpose()?
            .unwrap_or(POLL_INTERVAL_SECS);

        let max_poll_errors = lookup("CLAIMS_MAX_POLL_ERRORS")
            .map(|v| {
                v.parse::<u32>()
                    .map_err(|_| anyhow::anyhow!("CLAIMS_MAX_POLL_ERRORS must be a valid number"))
            })
            .transpose()?
            .filter(|max| *max > 0);

        let config = Self {
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            auth_scheme,
            token,
            request_timeout_secs,
            poll_interval_secs,
            max_poll_errors,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.token.trim().is_empty() {
            return Err(anyhow::anyhow!("Session token must not be empty"));
        }

        if !(self.api_endpoint.starts_with("http://") || self.api_endpoint.starts_with("https://"))
        {
            return Err(anyhow::anyhow!(
                "CLAIMS_API_ENDPOINT must be an http(s) URL, got '{}'",
                self.api_endpoint
            ));
        }

        if self.poll_interval_secs == 0 {
            return Err(anyhow::anyhow!(
                "CLAIMS_POLL_INTERVAL_SECS must be greater than zero"
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "CLAIMS_REQUEST_TIMEOUT_SECS must be greater than zero"
            ));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}
