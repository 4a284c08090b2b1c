//! Status poller bound to the PROCESSING state.
//!
//! One task per claim. It waits one interval, queries the claim status, and repeats until
//! the server reports COMPLETED or FAILED. Each query is awaited before the next tick, so
//! at most one request is in flight. Cancelling the token (explicitly or by dropping the
//! [`StatusPoller`]) drops any in-flight request; its response is never applied.

use std::sync::Arc;
use std::time::Duration;

use claimdesk_api_client::ClaimsApi;
use claimdesk_core::{ClientConfig, ProcessingStatus};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::status::StatusHandle;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct PollerConfig {
    pub interval: Duration,
    /// Consecutive failed polls tolerated before the claim is marked FAILED.
    /// `None` retries on every tick forever.
    pub max_consecutive_errors: Option<u32>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            max_consecutive_errors: None,
        }
    }
}

impl PollerConfig {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            interval: config.poll_interval(),
            max_consecutive_errors: config.max_poll_errors,
        }
    }
}

/// Handle to a running poll loop. Dropping it stops the loop.
#[derive(Debug)]
pub struct StatusPoller {
    claim_id: String,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl StatusPoller {
    pub fn spawn(
        api: Arc<dyn ClaimsApi>,
        claim_id: impl Into<String>,
        status: StatusHandle,
        config: PollerConfig,
    ) -> Self {
        let claim_id = claim_id.into();
        let cancel = CancellationToken::new();

        tracing::info!(
            claim_id = %claim_id,
            interval_secs = config.interval.as_secs_f64(),
            "Status poller started"
        );

        let handle = tokio::spawn(poll_loop(
            api,
            claim_id.clone(),
            status,
            config,
            cancel.clone(),
        ));

        Self {
            claim_id,
            cancel,
            handle,
        }
    }

    pub fn claim_id(&self) -> &str {
        &self.claim_id
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the loop to exit on its own (terminal status) or after `stop`.
    pub async fn join(mut self) {
        if let Err(e) = (&mut self.handle).await {
            tracing::error!(claim_id = %self.claim_id, error = %e, "Status poller task panicked");
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_loop(
    api: Arc<dyn ClaimsApi>,
    claim_id: String,
    status: StatusHandle,
    config: PollerConfig,
    cancel: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + config.interval, config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut consecutive_errors: u32 = 0;

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(claim_id = %claim_id, "Status poller cancelled");
                return;
            }
            _ = ticker.tick() => {}
        }

        if status.current() != ProcessingStatus::Processing {
            tracing::debug!(claim_id = %claim_id, "Claim left PROCESSING, stopping poller");
            return;
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(claim_id = %claim_id, "Status poller cancelled with a request in flight");
                return;
            }
            result = api.claim_status(&claim_id) => result,
        };

        match result {
            Ok(response) => {
                consecutive_errors = 0;
                match response.remote_status().terminal_status() {
                    Some(target) => {
                        status.advance(&claim_id, target);
                        tracing::info!(claim_id = %claim_id, status = %target, "Status poller finished");
                        return;
                    }
                    None => {
                        tracing::debug!(
                            claim_id = %claim_id,
                            remote_status = %response.status,
                            "Claim still processing"
                        );
                    }
                }
            }
            Err(e) => {
                consecutive_errors += 1;
                tracing::warn!(
                    claim_id = %claim_id,
                    error = %e,
                    consecutive_errors,
                    "Status check failed"
                );
                if let Some(max) = config.max_consecutive_errors {
                    if consecutive_errors >= max {
                        tracing::error!(
                            claim_id = %claim_id,
                            consecutive_errors,
                            "Giving up on status checks"
                        );
                        status.advance(&claim_id, ProcessingStatus::Failed);
                        return;
                    }
                }
            }
        }
    }
}
