use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of one claim submission, owned by the submission controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Uploading,
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    /// Upload or processing is in flight; form controls are disabled.
    pub fn is_busy(self) -> bool {
        matches!(self, ProcessingStatus::Uploading | ProcessingStatus::Processing)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessingStatus::Completed | ProcessingStatus::Failed)
    }

    /// Forward transitions of the submission state machine. Resetting to `Idle` is
    /// handled separately by cancel and is not a transition.
    pub fn can_transition_to(self, target: ProcessingStatus) -> bool {
        use ProcessingStatus::*;
        matches!(
            (self, target),
            (Idle, Uploading)
                | (Uploading, Processing)
                | (Uploading, Failed)
                | (Processing, Completed)
                | (Processing, Failed)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessingStatus::Idle => "IDLE",
            ProcessingStatus::Uploading => "UPLOADING",
            ProcessingStatus::Processing => "PROCESSING",
            ProcessingStatus::Completed => "COMPLETED",
            ProcessingStatus::Failed => "FAILED",
        }
    }
}

impl fmt::Display for ProcessingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status string reported by `GET /claim-status/{claimId}`.
///
/// Only the two terminal values are meaningful to the poller; "PROCESSING" and anything
/// the server may add later are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStatus {
    Completed,
    Failed,
    Other(String),
}

impl RemoteStatus {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "COMPLETED" => RemoteStatus::Completed,
            "FAILED" => RemoteStatus::Failed,
            other => RemoteStatus::Other(other.to_string()),
        }
    }

    /// Local status this remote value moves a processing claim to, if any.
    pub fn terminal_status(&self) -> Option<ProcessingStatus> {
        match self {
            RemoteStatus::Completed => Some(ProcessingStatus::Completed),
            RemoteStatus::Failed => Some(ProcessingStatus::Failed),
            RemoteStatus::Other(_) => None,
        }
    }
}
