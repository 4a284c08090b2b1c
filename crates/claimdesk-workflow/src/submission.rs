//! New-claim submission controller.
//!
//! Owns the form (claim id and files), the processing status and the status poller.
//! Status moves IDLE → UPLOADING → PROCESSING → COMPLETED | FAILED, or UPLOADING → FAILED
//! when an upload or the start-processing call fails or the submit future is dropped
//! before processing starts. COMPLETED and FAILED stay until
//! [`SubmissionController::cancel`] resets the form.

use std::collections::HashSet;
use std::sync::Arc;

use claimdesk_api_client::ClaimsApi;
use claimdesk_core::{ClaimFile, ClaimSubmission, FormErrors, ProcessingStatus};
use tokio::sync::watch;

use crate::error::SubmissionError;
use crate::notification::{self, Notification, NotificationId};
use crate::pipeline::{self, ProcessingHandle};
use crate::poller::{PollerConfig, StatusPoller};
use crate::status::StatusHandle;

/// Result of [`SubmissionController::submit`].
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent and the status is unchanged.
    Invalid(FormErrors),
    /// A submission is in flight or finished; cancel before submitting again.
    Rejected(ProcessingStatus),
    /// Files uploaded and processing started; the poller is running.
    Processing(ProcessingHandle),
    /// Upload or start-processing failed; the status is FAILED.
    Failed(SubmissionError),
}

pub struct SubmissionController {
    api: Arc<dyn ClaimsApi>,
    form: ClaimSubmission,
    submitted: bool,
    submitted_ok: bool,
    status: StatusHandle,
    poller: Option<StatusPoller>,
    poller_config: PollerConfig,
    dismissed: HashSet<NotificationId>,
}

impl std::fmt::Debug for SubmissionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionController")
            .field("form", &self.form)
            .field("submitted", &self.submitted)
            .field("status", &self.status.current())
            .field("polling", &self.poller.is_some())
            .finish()
    }
}

/// Marks the claim FAILED if [`SubmissionController::submit`] is dropped while uploading,
/// so the form can be reset with [`SubmissionController::cancel`].
struct InFlight {
    status: StatusHandle,
    claim_id: String,
    armed: bool,
}

impl InFlight {
    fn arm(status: StatusHandle, claim_id: &str) -> Self {
        Self {
            status,
            claim_id: claim_id.to_string(),
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(claim_id = %self.claim_id, "Submission abandoned before processing started");
            self.status.advance(&self.claim_id, ProcessingStatus::Failed);
        }
    }
}

impl SubmissionController {
    pub fn new(api: Arc<dyn ClaimsApi>, poller_config: PollerConfig) -> Self {
        Self {
            api,
            form: ClaimSubmission::default(),
            submitted: false,
            submitted_ok: false,
            status: StatusHandle::new(),
            poller: None,
            poller_config,
            dismissed: HashSet::new(),
        }
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProcessingStatus> {
        self.status.subscribe()
    }

    pub fn claim_id(&self) -> &str {
        &self.form.claim_id
    }

    pub fn files(&self) -> &[ClaimFile] {
        &self.form.files
    }

    /// Inputs and buttons are disabled while uploading or processing.
    pub fn controls_enabled(&self) -> bool {
        !self.status().is_busy()
    }

    pub fn submit_label(&self) -> &'static str {
        notification::submit_label(self.status())
    }

    /// Returns `false` when the form is locked.
    pub fn set_claim_id(&mut self, claim_id: impl Into<String>) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.form.claim_id = claim_id.into();
        true
    }

    /// Returns `false` when the form is locked.
    pub fn set_files(&mut self, files: Vec<ClaimFile>) -> bool {
        if !self.controls_enabled() {
            return false;
        }
        self.form.files = files;
        true
    }

    /// Inline field errors. Empty until the first submit attempt.
    pub fn field_errors(&self) -> FormErrors {
        if !self.submitted {
            return FormErrors::default();
        }
        FormErrors::check(&self.form.claim_id, &self.form.files)
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        let current = self.status();
        if current != ProcessingStatus::Idle {
            tracing::debug!(status = %current, "Submit ignored, form is not idle");
            return SubmitOutcome::Rejected(current);
        }

        self.submitted = true;
        let errors = FormErrors::check(&self.form.claim_id, &self.form.files);
        if !errors.is_empty() {
            for error in errors.iter() {
                tracing::debug!(field = %error.field, message = %error.message, "Form validation failed");
            }
            return SubmitOutcome::Invalid(errors);
        }

        let claim_id = self.form.claim_id.clone();
        self.dismissed.clear();
        self.status.advance(&claim_id, ProcessingStatus::Uploading);
        let in_flight = InFlight::arm(self.status.clone(), &claim_id);

        let receipt = match pipeline::upload_all(self.api.as_ref(), &claim_id, &self.form.files).await
        {
            Ok(receipt) => receipt,
            Err(e) => {
                in_flight.disarm();
                return self.fail(&claim_id, e);
            }
        };

        let handle = match pipeline::start_processing(self.api.as_ref(), receipt).await {
            Ok(handle) => handle,
            Err(e) => {
                in_flight.disarm();
                return self.fail(&claim_id, e);
            }
        };

        in_flight.disarm();
        self.submitted_ok = true;
        self.status.advance(&claim_id, ProcessingStatus::Processing);
        self.poller = Some(StatusPoller::spawn(
            self.api.clone(),
            claim_id,
            self.status.clone(),
            self.poller_config.clone(),
        ));

        SubmitOutcome::Processing(handle)
    }

    fn fail(&mut self, claim_id: &str, error: SubmissionError) -> SubmitOutcome {
        tracing::error!(claim_id = %claim_id, error = %error, "Claim submission failed");
        self.status.advance(claim_id, ProcessingStatus::Failed);
        SubmitOutcome::Failed(error)
    }

    /// Reset the form. Not allowed while uploading or processing; returns `false` then.
    pub fn cancel(&mut self) -> bool {
        if !self.controls_enabled() {
            tracing::debug!(status = %self.status(), "Cancel ignored while claim is in flight");
            return false;
        }
        self.poller = None;
        self.form.clear();
        self.submitted = false;
        self.submitted_ok = false;
        self.dismissed.clear();
        self.status.reset();
        true
    }

    /// Resolve once the claim reaches COMPLETED or FAILED. Returns immediately with the
    /// current status when nothing is in flight.
    pub async fn wait_for_terminal(&self) -> ProcessingStatus {
        let mut rx = self.status.subscribe();
        loop {
            let current = *rx.borrow_and_update();
            if !current.is_busy() {
                return current;
            }
            if rx.changed().await.is_err() {
                return *rx.borrow();
            }
        }
    }

    /// Whether a poll loop is still running for the current claim.
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(|p| !p.is_finished())
    }

    /// Notifications for the current status, minus dismissed ones.
    pub fn notifications(&self) -> Vec<Notification> {
        notification::notification_for(self.status(), &self.form.claim_id, self.submitted_ok)
            .into_iter()
            .filter(|n| !self.dismissed.contains(&n.id))
            .collect()
    }

    pub fn dismiss(&mut self, id: NotificationId) {
        self.dismissed.insert(id);
    }
}
