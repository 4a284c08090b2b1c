//! Claim submission workflow and review view models.
//!
//! The [`SubmissionController`] owns the new-claim form and its status state machine,
//! uploading files and starting processing through a typed two-step pipeline. While a
//! claim is processing, a [`StatusPoller`] task bound to that state queries the claim
//! status until it completes or fails. The review module loads the claims list and a
//! single report, degrading to empty results on failure.

pub mod error;
pub mod notification;
pub mod pipeline;
pub mod poller;
pub mod report_view;
pub mod review;
pub mod routes;
pub mod status;
pub mod submission;

pub use error::SubmissionError;
pub use notification::{notification_for, Notification, NotificationId, NotificationKind};
pub use pipeline::{ProcessingHandle, UploadReceipt};
pub use poller::{PollerConfig, StatusPoller};
pub use review::{ClaimDetailView, ClaimsListView, DocumentRow, ReportState};
pub use routes::Route;
pub use status::StatusHandle;
pub use submission::{SubmissionController, SubmitOutcome};
