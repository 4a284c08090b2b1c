use claimdesk_core::{ErrorMetadata, LogLevel};

/// Failure talking to the claims API or to a pre-signed upload slot.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Failed to send request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl ClientError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ClientError::Transport(err) if err.is_timeout())
    }
}

impl ErrorMetadata for ClientError {
    fn error_code(&self) -> &'static str {
        match self {
            ClientError::Build(_) => "CLIENT_BUILD_ERROR",
            ClientError::Transport(_) if self.is_timeout() => "TIMEOUT",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Status { status: 401, .. } | ClientError::Status { status: 403, .. } => {
                "UNAUTHORIZED"
            }
            ClientError::Status { status: 404, .. } => "NOT_FOUND",
            ClientError::Status { .. } => "API_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Status { status, .. } => *status >= 500 || *status == 429,
            ClientError::Build(_) | ClientError::Decode(_) | ClientError::InvalidInput(_) => false,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ClientError::InvalidInput(_) => LogLevel::Debug,
            ClientError::Transport(_) | ClientError::Status { .. } => LogLevel::Warn,
            ClientError::Build(_) | ClientError::Decode(_) => LogLevel::Error,
        }
    }

    fn user_message(&self) -> String {
        match self {
            ClientError::Status { status: 401, .. } | ClientError::Status { status: 403, .. } => {
                "Your session is not authorized. Sign in again.".to_string()
            }
            ClientError::Status { status: 404, .. } => "The requested claim was not found.".to_string(),
            ClientError::Transport(_) if self.is_timeout() => {
                "The claims service did not respond in time.".to_string()
            }
            ClientError::Transport(_) => "The claims service could not be reached.".to_string(),
            other => other.to_string(),
        }
    }
}
