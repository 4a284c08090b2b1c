//! Status-derived user notifications for the new-claim page.

use claimdesk_core::ProcessingStatus;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationId {
    Processing,
    Completed,
    Failed,
}

impl NotificationId {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationId::Processing => "processing",
            NotificationId::Completed => "completed",
            NotificationId::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationAction {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub loading: bool,
    pub dismissible: bool,
    pub content: String,
    pub action: Option<NotificationAction>,
}

/// Notification to show for `status`, if any. The processing banner only appears once
/// the start-processing request has succeeded.
pub fn notification_for(
    status: ProcessingStatus,
    claim_id: &str,
    submitted_ok: bool,
) -> Option<Notification> {
    match status {
        ProcessingStatus::Processing if submitted_ok => Some(Notification {
            id: NotificationId::Processing,
            kind: NotificationKind::Info,
            loading: true,
            dismissible: false,
            content: format!(
                "Processing claim {}... This may take 2-5 minutes.",
                claim_id
            ),
            action: None,
        }),
        ProcessingStatus::Completed => Some(Notification {
            id: NotificationId::Completed,
            kind: NotificationKind::Success,
            loading: false,
            dismissible: true,
            content: format!("Claim {} processing completed!", claim_id),
            action: Some(NotificationAction {
                label: "View Report".to_string(),
                href: format!(
                    "/workflow/review?claim_id={}",
                    urlencoding::encode(claim_id)
                ),
            }),
        }),
        ProcessingStatus::Failed => Some(Notification {
            id: NotificationId::Failed,
            kind: NotificationKind::Error,
            loading: false,
            dismissible: true,
            content: format!("Claim {} processing failed. Please try again.", claim_id),
            action: None,
        }),
        _ => None,
    }
}

/// Label of the submit button.
pub fn submit_label(status: ProcessingStatus) -> &'static str {
    match status {
        ProcessingStatus::Uploading => "Uploading...",
        ProcessingStatus::Processing => "Processing...",
        _ => "Submit",
    }
}
