#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use claimdesk_api_client::{
    ClaimStatusResponse, ClaimsApi, ClientError, DocumentLink, UploadedFile,
};
use claimdesk_core::{ClaimFile, ClaimReport, ClaimSummary, ProcessingStatus};
use claimdesk_workflow::PollerConfig;
use serde_json::{json, Value};
use tokio::sync::{watch, Notify};

pub const POLL_INTERVAL: std::time::Duration = std::time::Duration::from_secs(5);

/// One scripted answer of `claim_status`.
#[derive(Debug, Clone)]
pub enum StatusReply {
    Status(&'static str),
    Error,
}

/// In-memory `ClaimsApi` with scripted status replies and call counters.
///
/// When the status script runs out every further poll answers `RUNNING`.
#[derive(Default)]
pub struct FakeClaimsApi {
    statuses: Mutex<VecDeque<StatusReply>>,
    pub upload_calls: AtomicUsize,
    pub start_calls: AtomicUsize,
    pub status_calls: AtomicUsize,
    pub link_calls: AtomicUsize,
    pub fail_upload: AtomicBool,
    /// When set, `upload_file` never completes.
    pub hang_upload: AtomicBool,
    pub fail_start: AtomicBool,
    pub fail_list: AtomicBool,
    pub fail_report: AtomicBool,
    pub fail_link: AtomicBool,
    claims: Mutex<Vec<ClaimSummary>>,
    report: Mutex<Option<Value>>,
    links: Mutex<HashMap<String, String>>,
    observer: Mutex<Option<watch::Receiver<ProcessingStatus>>>,
    /// Status seen by the fake at each upload and start-processing call.
    pub observed: Mutex<Vec<(&'static str, ProcessingStatus)>>,
    /// When set, `claim_status` waits for a permit before answering.
    pub status_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeClaimsApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_statuses(replies: Vec<StatusReply>) -> Arc<Self> {
        let api = Self::default();
        *api.statuses.lock().unwrap() = replies.into();
        Arc::new(api)
    }

    pub fn set_claims(&self, claims: Vec<ClaimSummary>) {
        *self.claims.lock().unwrap() = claims;
    }

    pub fn set_report(&self, report: Value) {
        *self.report.lock().unwrap() = Some(report);
    }

    pub fn set_link(&self, file_name: &str, url: &str) {
        self.links
            .lock()
            .unwrap()
            .insert(file_name.to_string(), url.to_string());
    }

    pub fn observe(&self, rx: watch::Receiver<ProcessingStatus>) {
        *self.observer.lock().unwrap() = Some(rx);
    }

    pub fn gate_statuses(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.status_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }

    fn record(&self, call: &'static str) {
        if let Some(rx) = self.observer.lock().unwrap().as_ref() {
            let status = *rx.borrow();
            self.observed.lock().unwrap().push((call, status));
        }
    }
}

fn server_error() -> ClientError {
    ClientError::Status {
        status: 500,
        body: "Internal Server Error".to_string(),
    }
}

#[async_trait]
impl ClaimsApi for FakeClaimsApi {
    async fn upload_file(
        &self,
        _claim_id: &str,
        file: &ClaimFile,
    ) -> Result<UploadedFile, ClientError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.record("upload");
        if self.hang_upload.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(ClientError::Status {
                status: 403,
                body: "AccessDenied".to_string(),
            });
        }
        Ok(UploadedFile {
            file_name: file.name.clone(),
            key: Some(file.name.clone()),
        })
    }

    async fn start_processing(&self, claim_id: &str) -> Result<Value, ClientError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        self.record("start");
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(json!({ "message": "started", "claimId": claim_id }))
    }

    async fn claim_status(&self, claim_id: &str) -> Result<ClaimStatusResponse, ClientError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.status_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let reply = self
            .statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(StatusReply::Status("RUNNING"));
        match reply {
            StatusReply::Status(status) => Ok(ClaimStatusResponse {
                status: status.to_string(),
                claim_id: Some(claim_id.to_string()),
            }),
            StatusReply::Error => Err(server_error()),
        }
    }

    async fn list_claims(&self) -> Result<Vec<ClaimSummary>, ClientError> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ClientError::Decode("expected value at line 1 column 1".to_string()));
        }
        Ok(self.claims.lock().unwrap().clone())
    }

    async fn claim_report(&self, _claim_id: &str) -> Result<ClaimReport, ClientError> {
        if self.fail_report.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        let value = self.report.lock().unwrap().clone().unwrap_or(Value::Null);
        Ok(serde_json::from_value(value)?)
    }

    async fn document_link(
        &self,
        _claim_id: &str,
        file_name: &str,
    ) -> Result<DocumentLink, ClientError> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_link.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(DocumentLink {
            url: self.links.lock().unwrap().get(file_name).cloned(),
        })
    }
}

pub fn poller_config() -> PollerConfig {
    PollerConfig {
        interval: POLL_INTERVAL,
        max_consecutive_errors: None,
    }
}

pub fn claim_file(name: &str) -> ClaimFile {
    ClaimFile::new(name, b"file-bytes".to_vec())
}

pub fn summary(claim_id: &str) -> ClaimSummary {
    ClaimSummary {
        claim_id: claim_id.to_string(),
        date_filed: Some("2024-05-01".to_string()),
        incident_date: Some("2024-04-28".to_string()),
        description: Some("Storm damage".to_string()),
    }
}

/// Let spawned tasks run without moving the paused clock.
pub async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
