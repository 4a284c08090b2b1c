use claimdesk_api_client::ClientError;
use claimdesk_core::{ErrorMetadata, LogLevel};

/// Why a validated submission ended in `FAILED`.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Failed to upload {file_name}: {source}")]
    Upload {
        file_name: String,
        #[source]
        source: ClientError,
    },

    #[error("Failed to start processing: {0}")]
    StartProcessing(#[source] ClientError),
}

impl SubmissionError {
    pub fn client_error(&self) -> &ClientError {
        match self {
            SubmissionError::Upload { source, .. } => source,
            SubmissionError::StartProcessing(source) => source,
        }
    }
}

impl ErrorMetadata for SubmissionError {
    fn error_code(&self) -> &'static str {
        match self {
            SubmissionError::Upload { .. } => "UPLOAD_FAILED",
            SubmissionError::StartProcessing(_) => "START_PROCESSING_FAILED",
        }
    }

    fn is_recoverable(&self) -> bool {
        self.client_error().is_recoverable()
    }

    fn log_level(&self) -> LogLevel {
        LogLevel::Error
    }

    fn user_message(&self) -> String {
        match self {
            SubmissionError::Upload { file_name, source } => {
                format!("Could not upload {}. {}", file_name, source.user_message())
            }
            SubmissionError::StartProcessing(source) => {
                format!("Could not start processing. {}", source.user_message())
            }
        }
    }
}
