//! Claims list and claim detail view models.
//!
//! Both views fail soft: a failed fetch is logged and leaves the view empty (list) or
//! loading (detail). Nothing is retried.

use std::collections::BTreeSet;

use claimdesk_api_client::ClaimsApi;
use claimdesk_core::{ClaimReport, ClaimSummary, DocumentReference};
use serde::Serialize;

use crate::routes::Route;

#[derive(Debug, Default)]
pub struct ClaimsListView {
    claims: Vec<ClaimSummary>,
    selected: BTreeSet<String>,
    /// Search box text. Kept for display only; the list is never filtered by it.
    pub filter_text: String,
}

impl ClaimsListView {
    pub async fn load(api: &dyn ClaimsApi) -> Self {
        let mut view = Self::default();
        view.reload(api).await;
        view
    }

    /// Replace the collection with a fresh fetch. Selection is kept for claims that are
    /// still listed.
    pub async fn reload(&mut self, api: &dyn ClaimsApi) {
        self.claims = match api.list_claims().await {
            Ok(claims) => {
                tracing::debug!(count = claims.len(), "Loaded claims");
                claims
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to fetch claims");
                Vec::new()
            }
        };
        let claims = &self.claims;
        self.selected
            .retain(|id| claims.iter().any(|c| &c.claim_id == id));
    }

    pub fn claims(&self) -> &[ClaimSummary] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn header(&self) -> String {
        format!("Claims ({})", self.claims.len())
    }

    /// Flip the selection of one row. Returns whether it is now selected.
    pub fn toggle_selected(&mut self, claim_id: &str) -> bool {
        if !self.selected.remove(claim_id) {
            self.selected.insert(claim_id.to_string());
            return true;
        }
        false
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }

    /// Route of the detail page for one row.
    pub fn detail_route(summary: &ClaimSummary) -> Route {
        Route::ReviewDetail {
            claim_id: summary.claim_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportState {
    Loading,
    Ready(Box<ClaimReport>),
}

/// One row of the "Submitted documents" table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentRow {
    pub kind: String,
    pub description: String,
    pub validity: String,
    pub reference: DocumentReference,
}

#[derive(Debug, Clone)]
pub struct ClaimDetailView {
    claim_id: String,
    state: ReportState,
}

impl ClaimDetailView {
    pub async fn load(api: &dyn ClaimsApi, claim_id: impl Into<String>) -> Self {
        let claim_id = claim_id.into();
        let state = match api.claim_report(&claim_id).await {
            Ok(report) => ReportState::Ready(Box::new(report)),
            Err(e) => {
                tracing::error!(claim_id = %claim_id, error = %e, "Failed to fetch claim report");
                ReportState::Loading
            }
        };
        Self { claim_id, state }
    }

    /// A view over an already fetched report.
    pub fn ready(claim_id: impl Into<String>, report: ClaimReport) -> Self {
        Self {
            claim_id: claim_id.into(),
            state: ReportState::Ready(Box::new(report)),
        }
    }

    pub fn claim_id(&self) -> &str {
        &self.claim_id
    }

    pub fn state(&self) -> &ReportState {
        &self.state
    }

    pub fn report(&self) -> Option<&ClaimReport> {
        match &self.state {
            ReportState::Ready(report) => Some(report),
            ReportState::Loading => None,
        }
    }

    pub fn documents(&self) -> Vec<DocumentRow> {
        let Some(report) = self.report() else {
            return Vec::new();
        };
        report
            .proof_of_damage
            .iter()
            .map(|proof| DocumentRow {
                kind: proof.kind.clone().unwrap_or_default(),
                description: proof.description.clone().unwrap_or_default(),
                validity: proof.validity.clone().unwrap_or_default(),
                reference: proof.document_reference(),
            })
            .collect()
    }

    /// URL to open for a document row. Stored files cost one signed-link request each
    /// time; failures are logged and yield `None`.
    pub async fn resolve_document(
        &self,
        api: &dyn ClaimsApi,
        reference: &DocumentReference,
    ) -> Option<String> {
        match reference {
            DocumentReference::ExternalLink { url } => Some(url.clone()),
            DocumentReference::Unavailable => None,
            DocumentReference::StoredFile { name } => {
                let claim_id = self
                    .report()
                    .and_then(|r| r.claim_id.as_deref())
                    .unwrap_or(&self.claim_id);
                match api.document_link(claim_id, name).await {
                    Ok(link) => {
                        if link.url.is_none() {
                            tracing::warn!(claim_id = %claim_id, file_name = %name, "View-file response had no url");
                        }
                        link.url
                    }
                    Err(e) => {
                        tracing::error!(
                            claim_id = %claim_id,
                            file_name = %name,
                            error = %e,
                            "Error fetching file URL"
                        );
                        None
                    }
                }
            }
        }
    }
}
