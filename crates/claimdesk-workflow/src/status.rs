use std::sync::Arc;

use claimdesk_core::ProcessingStatus;
use tokio::sync::watch;

/// Shared, observable processing status of one submission session.
///
/// The controller and its poller write through the same handle; every write goes through
/// [`ProcessingStatus::can_transition_to`], so a stale writer cannot move the claim out of a
/// state it no longer owns.
#[derive(Clone, Debug)]
pub struct StatusHandle {
    tx: Arc<watch::Sender<ProcessingStatus>>,
}

impl Default for StatusHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusHandle {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(ProcessingStatus::Idle);
        Self { tx: Arc::new(tx) }
    }

    pub fn current(&self) -> ProcessingStatus {
        *self.tx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProcessingStatus> {
        self.tx.subscribe()
    }

    /// Apply a forward transition. Returns `false` and leaves the status untouched when the
    /// transition is not allowed from the current state.
    pub fn advance(&self, claim_id: &str, target: ProcessingStatus) -> bool {
        self.tx.send_if_modified(|current| {
            if !current.can_transition_to(target) {
                tracing::debug!(
                    claim_id = %claim_id,
                    from = %current,
                    to = %target,
                    "Ignoring invalid status transition"
                );
                return false;
            }
            tracing::info!(
                claim_id = %claim_id,
                from = %current,
                to = %target,
                "Claim status changed"
            );
            *current = target;
            true
        })
    }

    pub(crate) fn reset(&self) {
        self.tx.send_replace(ProcessingStatus::Idle);
    }
}
